use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::constants::{
    APP_USER_AGENT, GITHUB_TOKEN_HEADER, JSON_CONTENT_TYPE, LICENSE_KEY_QUERY,
    LICENSE_PARAMS_PATH, LICENSE_PULL_REQUEST_PATH,
};
use crate::error::ApiError;
use crate::models::{PullRequest, SubmissionPayload};

/// The two backend calls the license form depends on.
#[async_trait]
pub trait LicenseBackend: Send + Sync {
    /// Parameter names the license template needs filled in.
    async fn fetch_license_params(
        &self,
        license_key: &str,
        token: &str,
    ) -> Result<Vec<String>, ApiError>;

    async fn create_license_pull_request(
        &self,
        payload: &SubmissionPayload,
        token: &str,
    ) -> Result<PullRequest, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    // Always ends in '/', so endpoint paths join beneath any path prefix
    base_url: Url,
}

fn get_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(APP_USER_AGENT).build()
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let invalid = || ApiError::InvalidBaseUrl(base_url.to_string());

        let mut url = Url::parse(base_url.trim()).map_err(|_| invalid())?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(invalid());
        }

        let path = format!("{}/", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        Ok(HttpBackend {
            client: get_http_client()?,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))
    }

    // Anything but 200 counts as a failure, mirroring the page script.
    async fn decode_ok<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        tracing::debug!(%status, "backend response");

        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            return Err(ApiError::Http { status, body });
        }

        let bytes = response.bytes().await?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl LicenseBackend for HttpBackend {
    async fn fetch_license_params(
        &self,
        license_key: &str,
        token: &str,
    ) -> Result<Vec<String>, ApiError> {
        let url = self.url(LICENSE_PARAMS_PATH)?;
        tracing::debug!(%url, license_key, "GET license params");

        let response = self
            .client
            .get(url)
            .query(&[(LICENSE_KEY_QUERY, license_key)])
            .header(GITHUB_TOKEN_HEADER, token)
            .send()
            .await?;

        Self::decode_ok(response).await
    }

    async fn create_license_pull_request(
        &self,
        payload: &SubmissionPayload,
        token: &str,
    ) -> Result<PullRequest, ApiError> {
        let url = self.url(LICENSE_PULL_REQUEST_PATH)?;
        tracing::debug!(
            %url,
            org_repo = %payload.org_repo,
            license_key = %payload.license_key,
            "POST license pull request"
        );

        let body = serde_json::to_vec(payload)?;
        let response = self
            .client
            .post(url)
            .header(GITHUB_TOKEN_HEADER, token)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        Self::decode_ok(response).await
    }
}
