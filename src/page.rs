//! Builds the markup the license form expects to find on load.

use crate::constants::{
    LICENSE_INPUTS_ID, LICENSE_SELECTOR_ID, SUBMIT_TRIGGER_NAME, TOKEN_ATTRIBUTE,
};
use crate::dom::{Document, ElementId};
use crate::error::DomError;

/// Handles to the statically rendered parts of a license page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicensePage {
    pub selector: ElementId,
    pub inputs_container: ElementId,
    // One (list item, trigger) pair per repository, in render order
    pub repositories: Vec<(ElementId, ElementId)>,
}

impl LicensePage {
    /// First trigger for `org_repo` still on the page. Consumed triggers are
    /// skipped, so a repository listed twice yields its second trigger next.
    pub fn trigger_for(&self, doc: &impl Document, org_repo: &str) -> Option<ElementId> {
        self.repositories
            .iter()
            .map(|(_, trigger)| *trigger)
            .filter(|trigger| doc.is_connected(*trigger))
            .find(|trigger| doc.attribute(*trigger, "value").as_deref() == Some(org_repo))
    }
}

/// Renders the token attribute, the license selector, the parameter
/// container and a list of repositories with one submit trigger each.
pub fn render_license_page<D: Document>(
    doc: &mut D,
    token: Option<&str>,
    repositories: &[String],
) -> Result<LicensePage, DomError> {
    let body = doc.body();

    if let Some(token) = token {
        doc.set_attribute(body, TOKEN_ATTRIBUTE, token)?;
    }

    let selector = doc.create_element("select");
    doc.set_attribute(selector, "id", LICENSE_SELECTOR_ID)?;
    doc.append_child(body, selector)?;

    let inputs_container = doc.create_element("div");
    doc.set_attribute(inputs_container, "id", LICENSE_INPUTS_ID)?;
    doc.append_child(body, inputs_container)?;

    let list = doc.create_element("ul");
    doc.append_child(body, list)?;

    let mut rendered = Vec::with_capacity(repositories.len());

    for org_repo in repositories {
        let item = doc.create_element("li");
        doc.set_text(item, org_repo)?;

        let trigger = doc.create_element("button");
        doc.set_attribute(trigger, "name", SUBMIT_TRIGGER_NAME)?;
        doc.set_attribute(trigger, "value", org_repo)?;
        doc.set_text(trigger, "Send PR")?;

        doc.append_child(item, trigger)?;
        doc.append_child(list, item)?;
        rendered.push((item, trigger));
    }

    Ok(LicensePage {
        selector,
        inputs_container,
        repositories: rendered,
    })
}
