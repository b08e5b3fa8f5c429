use crate::api::LicenseBackend;
use crate::config::Settings;
use crate::controller::{self, Event, LicenseFormController, Outcome};
use crate::display;
use crate::dom::{Document, MemoryDocument};
use crate::error::{ActionError, AppError};
use crate::page;

/// Selects `license_key` on an empty license page and returns the parameter
/// names the form rendered inputs for.
pub async fn fetch_license_params<B: LicenseBackend>(
    form: &LicenseFormController<B>,
    settings: &Settings,
    license_key: &str,
) -> Result<Vec<String>, AppError> {
    tracing::debug!(license_key, "[Action] Fetching license parameters");

    let mut doc = MemoryDocument::new();
    let license_page = page::render_license_page(&mut doc, settings.token.as_deref(), &[])?;
    controller::initialize(&mut doc)?;
    doc.set_value(license_page.selector, license_key)?;

    match form.dispatch(&mut doc, Event::LicenseChanged).await? {
        Outcome::ParametersRendered(inputs) => Ok(inputs
            .into_iter()
            .filter_map(|input| doc.attribute(input, "id"))
            .collect()),
        other => Err(ActionError::UnexpectedOutcome(format!("{:?}", other)).into()),
    }
}

pub async fn show_license_params<B: LicenseBackend>(
    form: &LicenseFormController<B>,
    settings: &Settings,
    license_key: &str,
) -> Result<(), AppError> {
    let params = fetch_license_params(form, settings, license_key).await?;
    display::print_parameter_list(license_key, &params);

    Ok(())
}
