//! Signed-in session: configuration, stored token and a Graph client.

use aadgraph_common::{Config, StoredToken, read_token};
use aadgraph_sdk::{ClientConfig, GraphClient};
use chrono::Utc;
use tracing::{debug, warn};

/// Error returned by commands that need a token when none is stored.
pub const NOT_LOGGED_IN: &str = "Not logged in, run `aadgraph login`";

/// Everything a Graph command needs.
#[derive(Debug, Clone)]
pub struct Session {
    /// Resolved configuration
    pub config: Config,
    /// Token read at command start
    pub token: StoredToken,
    /// Client carrying the token and tenant defaults
    pub client: GraphClient,
}

impl Session {
    /// Load configuration and the stored token.
    pub fn load() -> Result<Self, String> {
        let config = Config::load()?;
        let token = read_token()?.ok_or_else(|| NOT_LOGGED_IN.to_string())?;
        Self::new(config, token)
    }

    /// Build a session from an explicit config and token.
    ///
    /// Requests are scoped to the token's tenant, falling back to the
    /// configured tenant when the token does not name one.
    pub fn new(config: Config, token: StoredToken) -> Result<Self, String> {
        if token.is_expired_at(Utc::now()) {
            warn!("Stored token has expired; Graph calls will likely fail. Run `aadgraph login`.");
        }

        let tenant = token
            .tenant_id
            .clone()
            .unwrap_or_else(|| config.tenant.clone());
        debug!(tenant = %tenant, graph_url = %config.graph_url, "Creating Graph client.");

        let client = GraphClient::new(
            ClientConfig::new(config.graph_url.clone())
                .with_bearer_token(token.access_token.clone())
                .with_api_version(Some(config.api_version.clone()))
                .with_tenant_id(tenant),
        )
        .map_err(|e| format!("Failed to create Graph client: {e}"))?;

        Ok(Self {
            config,
            token,
            client,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use aadgraph_sdk::{Params, endpoints};
    use serde_json::json;

    fn token(tenant: Option<&str>) -> StoredToken {
        let mut value = json!({"access_token": "tok"});
        if let Some(tenant) = tenant {
            value["tenant_id"] = json!(tenant);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_token_tenant_wins_over_config() {
        let session = Session::new(Config::default(), token(Some("t1"))).unwrap();
        let request = session
            .client
            .prepare(&endpoints::GET_TENANT_DETAILS, Params::new())
            .unwrap();
        assert_eq!(request.url.path(), "/t1/tenantDetails");
        assert_eq!(request.query_value("api-version").as_deref(), Some("1.6"));
        assert_eq!(
            request.headers.get("authorization").unwrap(),
            "Bearer tok"
        );
    }

    #[test]
    fn test_config_tenant_is_fallback() {
        let session = Session::new(Config::default(), token(None)).unwrap();
        let request = session
            .client
            .prepare(&endpoints::GET_TENANT_DETAILS, Params::new())
            .unwrap();
        assert_eq!(request.url.path(), "/common/tenantDetails");
    }

    #[test]
    fn test_invalid_graph_url() {
        let config = Config {
            graph_url: "not a url".to_string(),
            ..Config::default()
        };
        let err = Session::new(config, token(None)).unwrap_err();
        assert!(err.starts_with("Failed to create Graph client"));
    }
}
