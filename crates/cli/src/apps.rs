//! Application and service principal lookups by `appId`.

use aadgraph_sdk::{Endpoint, GraphClient, GraphError, Params, endpoints};
use serde_json::Value;
use tracing::debug;

/// First application whose `appId` matches, if any.
pub async fn find_application(client: &GraphClient, app_id: &str) -> Result<Option<Value>, String> {
    find_by_app_id(client, &endpoints::LIST_APPLICATIONS, app_id).await
}

/// First service principal whose `appId` matches, if any.
pub async fn find_service_principal(
    client: &GraphClient,
    app_id: &str,
) -> Result<Option<Value>, String> {
    find_by_app_id(client, &endpoints::LIST_SERVICE_PRINCIPALS, app_id).await
}

async fn find_by_app_id(
    client: &GraphClient,
    endpoint: &Endpoint,
    app_id: &str,
) -> Result<Option<Value>, String> {
    let params = Params::new().text("filter", app_id_filter(app_id));
    let envelope = client
        .call(endpoint, params)
        .await
        .map_err(|err| describe_graph_error(&format!("Failed to {}", endpoint.name), &err))?;

    let values = envelope.odata_values();
    debug!(operation = endpoint.name, app_id, matches = values.len(), "Looked up by appId.");
    Ok(values.first().cloned())
}

/// OData filter matching `appId`. Single quotes are doubled.
pub fn app_id_filter(app_id: &str) -> String {
    format!("appId eq '{}'", app_id.replace('\'', "''"))
}

/// `"{context}: {reason}"`, preferring the Graph error message in the body.
pub fn describe_graph_error(context: &str, err: &GraphError) -> String {
    let graph_message = err
        .envelope()
        .and_then(|envelope| envelope.json())
        .and_then(|body| body.pointer("/odata.error/message/value"))
        .and_then(Value::as_str);
    match (err.status(), graph_message) {
        (Some(status), Some(message)) => format!("{context}: {status}: {message}"),
        _ => format!("{context}: {err}"),
    }
}
