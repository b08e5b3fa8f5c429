//! Logging setup for the command-line driver.
//!
//! Installs a global tracing subscriber writing to stderr so stdout stays
//! reserved for command output. `RUST_LOG` wins when set; otherwise the
//! level is `info`, or `debug` with `--verbose`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

use crate::error::AppError;

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "licensepr=debug"
    } else {
        "licensepr=info"
    }
}

pub fn init_tracing(verbose: bool) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    Registry::default()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
