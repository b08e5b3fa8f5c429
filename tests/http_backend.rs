//! Wire-level tests for the reqwest backend against a mock server.

use licensepr::api::{HttpBackend, LicenseBackend};
use licensepr::error::ApiError;
use licensepr::models::SubmissionPayload;
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&server.uri()).expect("backend should build")
}

#[tokio::test]
async fn fetch_params_sends_key_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/license_params"))
        .and(query_param("key", "Apache-2.0"))
        .and(header("X-GITHUB-TOKEN", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["year", "fullname"])))
        .expect(1)
        .mount(&server)
        .await;
    let backend = backend_for(&server).await;

    let params = backend
        .fetch_license_params("Apache-2.0", "tok")
        .await
        .expect("params");

    assert_eq!(params, vec!["year", "fullname"]);
}

#[tokio::test]
async fn fetch_params_encodes_the_license_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/license_params"))
        .and(query_param("key", "GPL-2.0+ & friends"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let backend = backend_for(&server).await;

    let params = backend
        .fetch_license_params("GPL-2.0+ & friends", "tok")
        .await
        .expect("params");

    assert!(params.is_empty());
}

#[tokio::test]
async fn only_status_200_counts_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/license_params"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/license_pull_request"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let backend = backend_for(&server).await;

    let params = backend.fetch_license_params("MIT", "tok").await;
    let created = backend
        .create_license_pull_request(&SubmissionPayload::new("acme/widgets", "MIT"), "tok")
        .await;

    assert!(matches!(params, Err(ApiError::Http { status, .. }) if status.as_u16() == 204));
    assert!(matches!(
        created,
        Err(ApiError::Http { status, body }) if status.as_u16() == 500 && body == "boom"
    ));
}

#[tokio::test]
async fn malformed_params_body_is_a_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/license_params"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"year": true})))
        .mount(&server)
        .await;
    let backend = backend_for(&server).await;

    let result = backend.fetch_license_params("MIT", "tok").await;

    assert!(matches!(result, Err(ApiError::Deserialization(_))));
}

#[tokio::test]
async fn create_pull_request_posts_json_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/license_pull_request"))
        .and(header("X-GITHUB-TOKEN", "tok"))
        .and(header("Content-Type", "application/json;charset=UTF-8"))
        .and(body_json(json!({
            "year": "2024",
            "orgRepo": "acme/widgets",
            "licenseKey": "Apache-2.0"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 42,
            "html_url": "https://github.com/acme/widgets/pull/42",
            "state": "open"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let backend = backend_for(&server).await;
    let payload = SubmissionPayload::new("acme/widgets", "Apache-2.0").with_param("year", "2024");

    let pull_request = backend
        .create_license_pull_request(&payload, "tok")
        .await
        .expect("pull request");

    assert_eq!(pull_request.number, 42);
    assert_eq!(pull_request.link_text(), "PR #42");
    assert_eq!(pull_request.html_url, "https://github.com/acme/widgets/pull/42");
}

#[tokio::test]
async fn create_pull_request_writes_parameters_in_form_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/license_pull_request"))
        .and(body_string(
            r#"{"year":"2024","fullname":"Acme","orgRepo":"acme/widgets","licenseKey":"Apache-2.0"}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 3,
            "html_url": "https://github.com/acme/widgets/pull/3"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let backend = backend_for(&server).await;
    let payload = SubmissionPayload::new("acme/widgets", "Apache-2.0")
        .with_param("year", "2024")
        .with_param("fullname", "Acme");

    let pull_request = backend
        .create_license_pull_request(&payload, "tok")
        .await
        .expect("pull request");

    assert_eq!(pull_request.number, 3);
}

#[tokio::test]
async fn backend_under_a_path_prefix_keeps_the_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/licenses/license_params"))
        .and(query_param("key", "MIT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let backend = HttpBackend::new(&format!("{}/licenses", server.uri())).expect("backend");

    let params = backend.fetch_license_params("MIT", "tok").await.expect("params");

    assert!(params.is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Nothing listens on port 1.
    let backend = HttpBackend::new("http://127.0.0.1:1").expect("backend should build");

    let result = backend.fetch_license_params("MIT", "tok").await;

    assert!(matches!(result, Err(ApiError::Reqwest(_))));
}
