use clap::Parser;
use std::io;

use licensepr::actions;
use licensepr::api::HttpBackend;
use licensepr::cli::{Cli, Commands};
use licensepr::config;
use licensepr::controller::LicenseFormController;
use licensepr::error::AppError;
use licensepr::logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli_args = Cli::parse();

    logging::init_tracing(cli_args.verbose)?;
    tracing::debug!("Verbose mode enabled.");

    if let Some(shell) = cli_args.generate_completion {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        let app_name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, app_name, &mut io::stdout());

        return Ok(());
    }

    let Some(command) = cli_args.command else {
        <Cli as clap::CommandFactory>::command().print_help()?;
        eprintln!("\nNo action specified. Use --help for usage information.");
        std::process::exit(1);
    };

    let settings = config::resolve_settings(
        cli_args.config.as_deref(),
        cli_args.base_url,
        cli_args.token,
    )?;
    tracing::debug!(base_url = %settings.base_url, has_token = settings.token.is_some(), "resolved settings");

    let form = LicenseFormController::new(HttpBackend::new(&settings.base_url)?);

    match command {
        Commands::Params(args) => {
            actions::params::show_license_params(&form, &settings, &args.license_key).await?;
        }
        Commands::Submit(args) => {
            actions::submit::submit_license_pull_requests(&form, &settings, &args).await?;
        }
    }

    Ok(())
}
