use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::constants::{LICENSE_KEY_FIELD, ORG_REPO_FIELD};

/// JSON body of a pull request creation call.
///
/// Serializes as one flat object: every parameter under its own name in the
/// order it was first set, then `orgRepo` and `licenseKey`. A parameter
/// sharing a name with either fixed field is dropped in favor of the fixed
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    // (parameter name, value); names are unique
    pub params: Vec<(String, String)>,
    pub org_repo: String,
    pub license_key: String,
}

impl SubmissionPayload {
    pub fn new(org_repo: impl Into<String>, license_key: impl Into<String>) -> Self {
        SubmissionPayload {
            params: Vec::new(),
            org_repo: org_repo.into(),
            license_key: license_key.into(),
        }
    }

    /// Sets a parameter. Setting a name again replaces its value but keeps
    /// its original position.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.params.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.params.push((name, value)),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_param(name, value);
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    fn is_fixed_field(name: &str) -> bool {
        name == ORG_REPO_FIELD || name == LICENSE_KEY_FIELD
    }
}

impl Serialize for SubmissionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let params: Vec<_> = self
            .params
            .iter()
            .filter(|(name, _)| !Self::is_fixed_field(name))
            .collect();

        let mut map = serializer.serialize_map(Some(params.len() + 2))?;

        for (name, value) in params {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(ORG_REPO_FIELD, &self.org_repo)?;
        map.serialize_entry(LICENSE_KEY_FIELD, &self.license_key)?;

        map.end()
    }
}

/// Pull request as reported by the backend after creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
}

impl PullRequest {
    pub fn link_text(&self) -> String {
        format!("{}{}", crate::constants::PULL_REQUEST_LINK_PREFIX, self.number)
    }
}
