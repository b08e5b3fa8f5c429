use chrono::Datelike;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::time::Duration;

use crate::api::LicenseBackend;
use crate::cli::SubmitArgs;
use crate::config::Settings;
use crate::constants::{PARAM_INPUT_NAME, YEAR_PARAM};
use crate::controller::{self, Event, LicenseFormController, Outcome};
use crate::display;
use crate::dom::{Document, ElementId, MemoryDocument};
use crate::error::{ActionError, AppError};
use crate::models::PullRequest;
use crate::page;

fn new_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Value for a rendered parameter input: the user's value, or the current
/// year for a `year` parameter left out.
fn value_for(param: &str, provided: &HashMap<String, String>, current_year: i32) -> Option<String> {
    provided.get(param).cloned().or_else(|| {
        (param == YEAR_PARAM).then(|| current_year.to_string())
    })
}

/// Types the provided values into the rendered inputs, one input event per
/// keystroke-equivalent, and reports the inputs still left empty.
async fn fill_param_inputs<B: LicenseBackend>(
    form: &LicenseFormController<B>,
    doc: &mut MemoryDocument,
    inputs: &[ElementId],
    provided: &HashMap<String, String>,
) -> Result<Vec<String>, AppError> {
    let current_year = chrono::Local::now().year();

    for input in inputs {
        let name = doc.attribute(*input, "id").unwrap_or_default();

        if let Some(value) = value_for(&name, provided, current_year) {
            doc.set_value(*input, &value)?;
            form.dispatch(doc, Event::ParamInput(*input)).await?;
        }
    }

    let rendered: Vec<String> = inputs
        .iter()
        .filter_map(|input| doc.attribute(*input, "id"))
        .collect();

    for name in provided.keys().filter(|name| !rendered.contains(name)) {
        tracing::warn!(param = %name, "license does not take this parameter, ignoring it");
    }

    Ok(doc.reduce_elements(PARAM_INPUT_NAME, Vec::new(), |mut missing, doc, input| {
        if doc.value(input).unwrap_or_default().is_empty() {
            missing.push(doc.attribute(input, "id").unwrap_or_default());
        }
        missing
    }))
}

/// Runs the whole license form for every repository in `args`: select the
/// license, fill its parameters, click each repository's trigger in turn.
pub async fn submit_license_pull_requests<B: LicenseBackend>(
    form: &LicenseFormController<B>,
    settings: &Settings,
    args: &SubmitArgs,
) -> Result<Vec<(String, PullRequest)>, AppError> {
    if args.repos.is_empty() {
        return Err(ActionError::NoRepositories.into());
    }

    tracing::debug!(license_key = %args.license_key, repos = ?args.repos, "[Action] Submitting license");

    let mut doc = MemoryDocument::new();
    let license_page =
        page::render_license_page(&mut doc, settings.token.as_deref(), &args.repos)?;
    controller::initialize(&mut doc)?;
    doc.set_value(license_page.selector, &args.license_key)?;

    let inputs = match form.dispatch(&mut doc, Event::LicenseChanged).await? {
        Outcome::ParametersRendered(inputs) => inputs,
        other => return Err(ActionError::UnexpectedOutcome(format!("{:?}", other)).into()),
    };

    let provided: HashMap<String, String> = args.params.iter().cloned().collect();
    let missing = fill_param_inputs(form, &mut doc, &inputs, &provided).await?;

    if !missing.is_empty() {
        return Err(ActionError::MissingParameters(missing).into());
    }

    let mut opened = Vec::with_capacity(args.repos.len());

    for org_repo in &args.repos {
        let trigger = license_page
            .trigger_for(&doc, org_repo)
            .ok_or_else(|| ActionError::TriggerIgnored(org_repo.clone()))?;
        let spinner = new_spinner(format!("Opening pull request for {}...", org_repo));

        let outcome = match form.dispatch(&mut doc, Event::SubmitClicked(trigger)).await {
            Ok(outcome) => outcome,
            Err(err) => {
                spinner.abandon_with_message(format!("Failed for {}", org_repo));
                return Err(err.into());
            }
        };
        spinner.finish_and_clear();

        match outcome {
            Outcome::PullRequestOpened { pull_request, .. } => {
                display::print_pull_request(org_repo, &pull_request);
                opened.push((org_repo.clone(), pull_request));
            }
            _ => return Err(ActionError::TriggerIgnored(org_repo.clone()).into()),
        }
    }

    Ok(opened)
}
