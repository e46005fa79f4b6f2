//! HTTP artifact source against a mock conversion service.

use assert2::{check, let_assert};
use doctree_mcp::{ArtifactSource, Config, FetchError, HttpSource, LibraryState, ListingError};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_listing(server: &MockServer, uploads: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/scan-uploads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uploads": uploads })))
        .mount(server)
        .await;
}

async fn mock_artifact(server: &MockServer, location: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{location}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_maps_scan_response() {
    let server = MockServer::start().await;
    mock_listing(
        &server,
        json!([
            { "path": "upload-html/APE_Account_PasswordReset.html", "navigation": ["APE", "Account", "Password Reset"] },
            { "path": "upload-html/Billing_Invoices.html", "navigation": ["Billing", "Invoices"] },
        ]),
    )
    .await;

    let source = HttpSource::new(&server.uri()).unwrap();
    let uploads = source.list().await.unwrap();

    check!(uploads.len() == 2);
    check!(uploads[0].location == "upload-html/APE_Account_PasswordReset.html");
    check!(uploads[0].navigation == ["APE", "Account", "Password Reset"]);
}

#[tokio::test]
async fn test_list_reports_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scan-uploads"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = HttpSource::new(&server.uri()).unwrap();
    let_assert!(Err(ListingError::Status(500)) = source.list().await);
}

#[tokio::test]
async fn test_list_reports_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scan-uploads"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let source = HttpSource::new(&server.uri()).unwrap();
    let_assert!(Err(ListingError::Parse { .. }) = source.list().await);
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let server = MockServer::start().await;
    mock_artifact(&server, "upload-html/Billing_Invoices.html", "<p>Invoices</p>").await;

    let source = HttpSource::new(&format!("{}/", server.uri())).unwrap();
    let body = source.fetch("upload-html/Billing_Invoices.html").await.unwrap();
    check!(body == "<p>Invoices</p>");
}

#[tokio::test]
async fn test_fetch_missing_artifact() {
    let server = MockServer::start().await;

    let source = HttpSource::new(&server.uri()).unwrap();
    let_assert!(Err(FetchError::Status { location, status }) = source.fetch("upload-html/Nope.html").await);
    check!(location == "upload-html/Nope.html");
    check!(status == 404);
}

#[tokio::test]
async fn test_library_over_http() {
    doctree_mcp::tracing::init();
    let server = MockServer::start().await;
    mock_listing(
        &server,
        json!([
            { "path": "upload-html/A_X_Doc1.html", "navigation": ["A", "X", "Doc1"] },
            { "path": "upload-html/A_X_Doc2.html", "navigation": ["A", "X", "Doc2"] },
            { "path": "upload-html/A_Y_Doc3.html", "navigation": ["A", "Y", "Doc3"] },
        ]),
    )
    .await;
    mock_artifact(&server, "upload-html/A_X_Doc1.html", "<p>settlement period</p>").await;
    mock_artifact(&server, "upload-html/A_Y_Doc3.html", "<p>meter readings</p>").await;

    let source = Arc::new(HttpSource::new(&server.uri()).unwrap());
    let state = Arc::new(LibraryState::new(source, &Config::default()));
    state.start().await;
    state.wait_idle().await;

    check!(state.forest().document_count() == 3);

    let status = state.indexing_status();
    check!(status.complete);
    check!(status.done == 3);
    check!(status.failed.len() == 1);
    check!(status.failed.contains("upload-html/A_X_Doc2.html"));

    let_assert!(doctree_mcp::ContentSearch::Results(results) = state.search_content("meter"));
    check!(results.len() == 1);
    check!(results[0].title == "Doc3");
    check!(results[0].snippet == "<mark>meter</mark> readings");
}
