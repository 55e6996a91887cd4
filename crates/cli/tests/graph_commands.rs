//! `export` and `healthcheck` against a mock Graph server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use aadgraph_cli::commands::export::export_application;
use aadgraph_cli::commands::healthcheck::{CheckStatus, check_application};
use aadgraph_cli::session::Session;
use aadgraph_common::{Config, StoredToken};
use chrono::Utc;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> Session {
    let config = Config {
        graph_url: server.uri(),
        ..Config::default()
    };
    let token: StoredToken = serde_json::from_value(json!({
        "access_token": "test-token",
        "tenant_id": "t1"
    }))
    .unwrap();
    Session::new(config, token).unwrap()
}

fn collection(items: &[Value]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "odata.metadata": "https://graph.windows.net/t1/$metadata#directoryObjects",
        "value": items
    }))
}

async fn mount_lookup(server: &MockServer, resource: &str, items: &[Value]) {
    Mock::given(method("GET"))
        .and(path(format!("/t1/{resource}")))
        .and(query_param("$filter", "appId eq 'a1'"))
        .and(query_param("api-version", "1.6"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(collection(items))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_export_application() {
    let server = MockServer::start().await;
    mount_lookup(&server, "applications", &[json!({"appId": "a1", "displayName": "Demo"})]).await;

    let session = session_for(&server);
    let exported = export_application(&session.client, "a1").await.unwrap();
    let parsed: Value = serde_json::from_str(&exported).unwrap();

    assert_eq!(parsed["displayName"], "Demo");
    assert!(exported.contains('\n'));
}

#[tokio::test]
async fn test_export_missing_application() {
    let server = MockServer::start().await;
    mount_lookup(&server, "applications", &[]).await;

    let session = session_for(&server);
    let err = export_application(&session.client, "a1").await.unwrap_err();
    assert_eq!(err, "No application found with appId 'a1'");
}

#[tokio::test]
async fn test_export_surfaces_graph_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t1/applications"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "odata.error": {
                "code": "Authorization_RequestDenied",
                "message": {"lang": "en", "value": "Insufficient privileges to complete the operation."}
            }
        })))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let err = export_application(&session.client, "a1").await.unwrap_err();
    assert!(err.starts_with("Failed to listApplications: 403"));
    assert!(err.ends_with("Insufficient privileges to complete the operation."));
}

#[tokio::test]
async fn test_healthcheck_reports_missing_service_principal() {
    let server = MockServer::start().await;
    mount_lookup(
        &server,
        "applications",
        &[json!({
            "appId": "a1",
            "replyUrls": ["https://app.example.com"],
            "requiredResourceAccess": [{"resourceAppId": "r1"}]
        })],
    )
    .await;
    mount_lookup(&server, "servicePrincipals", &[]).await;

    let session = session_for(&server);
    let results = check_application(&session.client, "a1", Utc::now()).await.unwrap();

    let failed: Vec<&str> = results
        .iter()
        .filter(|result| result.status == CheckStatus::Fail)
        .map(|result| result.name)
        .collect();
    assert_eq!(failed, vec!["Service principal"]);
}

#[tokio::test]
async fn test_healthcheck_passes_with_service_principal() {
    let server = MockServer::start().await;
    mount_lookup(
        &server,
        "applications",
        &[json!({"appId": "a1", "requiredResourceAccess": [{"resourceAppId": "r1"}]})],
    )
    .await;
    mount_lookup(&server, "servicePrincipals", &[json!({"objectId": "sp1", "appId": "a1"})]).await;

    let session = session_for(&server);
    let results = check_application(&session.client, "a1", Utc::now()).await.unwrap();
    assert!(results.iter().all(|result| result.status == CheckStatus::Pass));
}
