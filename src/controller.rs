//! License form controller.
//!
//! The form reacts to three events: a license being selected, a parameter
//! input changing, and a submit trigger being clicked. Each network-bound
//! step is split in two: a `begin_*` function that reads (and, for
//! submissions, mutates) the document up to the point where the request goes
//! out, and a function that applies the response. The document is never
//! borrowed across a request, so callers that own the event loop may deliver
//! other events while a request is in flight. [`LicenseFormController`] glues
//! the halves together around a [`LicenseBackend`] for callers that run one
//! flow at a time.

use crate::api::LicenseBackend;
use crate::constants::{
    LICENSE_INPUTS_ID, LICENSE_SELECTOR_ID, PARAM_INPUT_NAME, SPINNER_SRC, SPINNER_STYLE,
    SUBMIT_TRIGGER_NAME, TOKEN_ATTRIBUTE,
};
use crate::dom::{Document, ElementId, EventKind};
use crate::error::{DomError, FormError};
use crate::models::{PullRequest, SubmissionPayload};

/// Elements wired up by [`initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    pub selector: ElementId,
    pub triggers: Vec<ElementId>,
}

/// Everything needed to fetch the parameters of the selected license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamsRequest {
    pub license_key: String,
    pub token: String,
}

/// A submission whose trigger has been replaced by a loading indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub payload: SubmissionPayload,
    pub token: String,
    pub spinner: ElementId,
    // The trigger's former parent; the result link lands here
    pub container: ElementId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    LicenseChanged,
    ParamInput(ElementId),
    SubmitClicked(ElementId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ParametersRendered(Vec<ElementId>),
    ReadinessChanged { ready: bool },
    PullRequestOpened {
        link: ElementId,
        pull_request: PullRequest,
    },
    // No listener on the target, target detached, or target disabled
    Ignored,
}

fn license_selector<D: Document>(doc: &D) -> Result<ElementId, FormError> {
    doc.element_by_id(LICENSE_SELECTOR_ID)
        .ok_or(FormError::MissingElement(LICENSE_SELECTOR_ID))
}

// Read on every request; the page may rotate the token.
fn access_token<D: Document>(doc: &D) -> Result<String, FormError> {
    doc.body_attribute(TOKEN_ATTRIBUTE)
        .ok_or(FormError::MissingAccessToken(TOKEN_ATTRIBUTE))
}

/// Attaches the change listener to the selector and a click listener to
/// every submit trigger currently on the page.
pub fn initialize<D: Document>(doc: &mut D) -> Result<Bindings, FormError> {
    let selector = license_selector(doc)?;
    doc.add_event_listener(selector, EventKind::Change)?;

    let triggers = doc.elements_by_name(SUBMIT_TRIGGER_NAME);

    for trigger in &triggers {
        doc.add_event_listener(*trigger, EventKind::Click)?;
    }

    tracing::debug!(triggers = triggers.len(), "license form initialized");

    Ok(Bindings { selector, triggers })
}

pub fn begin_license_change<D: Document>(doc: &D) -> Result<ParamsRequest, FormError> {
    let selector = license_selector(doc)?;
    let token = access_token(doc)?;
    let license_key = doc.value(selector).unwrap_or_default();

    Ok(ParamsRequest { license_key, token })
}

pub fn toggle_submit_triggers<D: Document>(doc: &mut D, disabled: bool) -> Result<(), DomError> {
    doc.for_each_element(SUBMIT_TRIGGER_NAME, |doc, trigger| {
        doc.set_disabled(trigger, disabled)
    })
}

/// Replaces the rendered parameter inputs with one input per name.
///
/// Triggers are disabled whenever at least one parameter must be filled, so
/// a license without parameters can be submitted right away.
pub fn apply_license_params<D: Document>(
    doc: &mut D,
    params: &[String],
) -> Result<Vec<ElementId>, FormError> {
    let container = doc
        .element_by_id(LICENSE_INPUTS_ID)
        .ok_or(FormError::MissingElement(LICENSE_INPUTS_ID))?;

    doc.for_each_element(PARAM_INPUT_NAME, |doc, input| doc.remove(input))?;

    toggle_submit_triggers(doc, !params.is_empty())?;

    let mut inputs = Vec::with_capacity(params.len());

    for param in params {
        let input = doc.create_element("input");
        doc.set_attribute(input, "id", param)?;
        doc.set_attribute(input, "name", PARAM_INPUT_NAME)?;
        doc.set_attribute(input, "placeholder", param)?;
        doc.add_event_listener(input, EventKind::Input)?;
        doc.append_child(container, input)?;
        inputs.push(input);
    }

    tracing::debug!(params = ?params, "rendered license parameter inputs");

    Ok(inputs)
}

/// True when every rendered parameter input holds a value; vacuously true
/// when none are rendered.
pub fn all_params_have_value<D: Document>(doc: &D) -> bool {
    doc.reduce_elements(PARAM_INPUT_NAME, true, |state, doc, input| {
        doc.value(input).is_some_and(|value| !value.is_empty()) && state
    })
}

pub fn on_param_input<D: Document>(doc: &mut D) -> Result<bool, FormError> {
    let ready = all_params_have_value(doc);
    toggle_submit_triggers(doc, !ready)?;

    Ok(ready)
}

/// Builds the payload for `trigger` from the current state of the form.
pub fn collect_payload<D: Document>(
    doc: &D,
    trigger: ElementId,
) -> Result<SubmissionPayload, FormError> {
    let selector = license_selector(doc)?;
    let org_repo = doc.value(trigger).unwrap_or_default();
    let license_key = doc.value(selector).unwrap_or_default();

    Ok(doc.reduce_elements(
        PARAM_INPUT_NAME,
        SubmissionPayload::new(org_repo, license_key),
        |mut payload, doc, input| {
            let name = doc.attribute(input, "id").unwrap_or_default();
            let value = doc.value(input).unwrap_or_default();
            payload.set_param(name, value);
            payload
        },
    ))
}

/// Consumes `trigger`: the payload is captured, a loading indicator takes
/// the trigger's place and the trigger leaves the document for good.
pub fn begin_submission<D: Document>(
    doc: &mut D,
    trigger: ElementId,
) -> Result<PendingSubmission, FormError> {
    let container = doc
        .parent(trigger)
        .filter(|_| doc.is_connected(trigger))
        .ok_or(FormError::DetachedTrigger(trigger))?;
    let token = access_token(doc)?;
    let payload = collect_payload(doc, trigger)?;

    let spinner = doc.create_element("img");
    doc.set_attribute(spinner, "src", SPINNER_SRC)?;
    doc.set_attribute(spinner, "style", SPINNER_STYLE)?;
    doc.append_child(container, spinner)?;

    doc.remove(trigger)?;

    Ok(PendingSubmission {
        payload,
        token,
        spinner,
        container,
    })
}

/// Swaps the loading indicator for a link to the created pull request.
pub fn complete_submission<D: Document>(
    doc: &mut D,
    pending: &PendingSubmission,
    pull_request: &PullRequest,
) -> Result<ElementId, FormError> {
    let link = doc.create_element("a");
    doc.set_attribute(link, "href", &pull_request.html_url)?;
    doc.set_text(link, &pull_request.link_text())?;

    doc.remove(pending.spinner)?;
    doc.append_child(pending.container, link)?;

    Ok(link)
}

/// Runs whole form flows against a backend, one at a time.
#[derive(Debug, Clone)]
pub struct LicenseFormController<B> {
    backend: B,
}

impl<B: LicenseBackend> LicenseFormController<B> {
    pub fn new(backend: B) -> Self {
        LicenseFormController { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetches the selected license's parameters and renders their inputs.
    /// On failure the document is left untouched.
    pub async fn change_license<D: Document>(
        &self,
        doc: &mut D,
    ) -> Result<Vec<ElementId>, FormError> {
        let request = begin_license_change(doc)?;
        tracing::info!(license_key = %request.license_key, "license selected");

        let params = self
            .backend
            .fetch_license_params(&request.license_key, &request.token)
            .await?;

        apply_license_params(doc, &params)
    }

    /// Submits through `trigger`. On failure the loading indicator stays in
    /// place and the trigger is not restored.
    pub async fn submit<D: Document>(
        &self,
        doc: &mut D,
        trigger: ElementId,
    ) -> Result<(ElementId, PullRequest), FormError> {
        let pending = begin_submission(doc, trigger)?;
        tracing::info!(
            org_repo = %pending.payload.org_repo,
            license_key = %pending.payload.license_key,
            "submitting license pull request"
        );

        let pull_request = self
            .backend
            .create_license_pull_request(&pending.payload, &pending.token)
            .await
            .inspect_err(|err| {
                tracing::warn!(org_repo = %pending.payload.org_repo, error = %err, "pull request creation failed");
            })?;

        let link = complete_submission(doc, &pending, &pull_request)?;
        tracing::info!(number = pull_request.number, url = %pull_request.html_url, "pull request opened");

        Ok((link, pull_request))
    }

    /// Delivers an event the way a browser would: only to connected
    /// elements holding a listener for it, and never a click to a disabled
    /// control.
    pub async fn dispatch<D: Document>(
        &self,
        doc: &mut D,
        event: Event,
    ) -> Result<Outcome, FormError> {
        let deliverable = |doc: &D, target: ElementId, kind: EventKind| {
            doc.is_connected(target) && doc.has_event_listener(target, kind)
        };

        match event {
            Event::LicenseChanged => {
                let selector = license_selector(doc)?;

                if !deliverable(&*doc, selector, EventKind::Change) {
                    return Ok(Outcome::Ignored);
                }

                Ok(Outcome::ParametersRendered(self.change_license(doc).await?))
            }
            Event::ParamInput(input) => {
                if !deliverable(&*doc, input, EventKind::Input) {
                    return Ok(Outcome::Ignored);
                }

                Ok(Outcome::ReadinessChanged {
                    ready: on_param_input(doc)?,
                })
            }
            Event::SubmitClicked(trigger) => {
                if !deliverable(&*doc, trigger, EventKind::Click) || doc.is_disabled(trigger) {
                    tracing::debug!(?trigger, "click not delivered");
                    return Ok(Outcome::Ignored);
                }

                let (link, pull_request) = self.submit(doc, trigger).await?;

                Ok(Outcome::PullRequestOpened { link, pull_request })
            }
        }
    }
}
