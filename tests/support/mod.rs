//! Shared fixtures for the license form integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use licensepr::api::LicenseBackend;
use licensepr::error::ApiError;
use licensepr::models::{PullRequest, SubmissionPayload};
use reqwest::StatusCode;

/// Backend answering from canned responses and recording every call.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    params: HashMap<String, Vec<String>>,
    fail_creation: bool,
    next_number: Mutex<u64>,
    pub params_calls: Mutex<Vec<(String, String)>>,
    pub submissions: Mutex<Vec<(SubmissionPayload, String)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        ScriptedBackend {
            next_number: Mutex::new(42),
            ..Self::default()
        }
    }

    pub fn with_license(mut self, key: &str, params: &[&str]) -> Self {
        self.params.insert(
            key.to_string(),
            params.iter().map(|param| param.to_string()).collect(),
        );
        self
    }

    pub fn failing_creation(mut self) -> Self {
        self.fail_creation = true;
        self
    }

    pub fn submissions(&self) -> Vec<(SubmissionPayload, String)> {
        self.submissions
            .lock()
            .expect("submissions mutex should be available")
            .clone()
    }

    pub fn params_calls(&self) -> Vec<(String, String)> {
        self.params_calls
            .lock()
            .expect("params mutex should be available")
            .clone()
    }
}

#[async_trait]
impl LicenseBackend for ScriptedBackend {
    async fn fetch_license_params(
        &self,
        license_key: &str,
        token: &str,
    ) -> Result<Vec<String>, ApiError> {
        self.params_calls
            .lock()
            .expect("params mutex should be available")
            .push((license_key.to_string(), token.to_string()));

        self.params
            .get(license_key)
            .cloned()
            .ok_or_else(|| ApiError::Http {
                status: StatusCode::NOT_FOUND,
                body: format!("unknown license {license_key}"),
            })
    }

    async fn create_license_pull_request(
        &self,
        payload: &SubmissionPayload,
        token: &str,
    ) -> Result<PullRequest, ApiError> {
        self.submissions
            .lock()
            .expect("submissions mutex should be available")
            .push((payload.clone(), token.to_string()));

        if self.fail_creation {
            return Err(ApiError::Http {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: "pull request already exists".to_string(),
            });
        }

        let mut next = self
            .next_number
            .lock()
            .expect("number mutex should be available");
        let number = *next;
        *next += 1;

        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/{}/pull/{number}", payload.org_repo),
        })
    }
}
