//! HTTP executor for Graph requests.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use crate::descriptor::Endpoint;
use crate::error::{GraphError, Result};
use crate::params::Params;
use crate::request::{PreparedRequest, build_request};
use crate::response::{Envelope, ResponseMeta, normalize};

/// Public Azure AD Graph endpoint.
pub const DEFAULT_GRAPH_URL: &str = "https://graph.windows.net";

/// Default `api-version` sent when the caller supplies none.
pub const DEFAULT_API_VERSION: &str = "1.6";

const API_VERSION_PARAM: &str = "apiVersion";
const TENANT_ID_PARAM: &str = "tenantId";

/// Client settings. Only the base URL is mandatory.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL requests are resolved against
    pub base_url: String,
    /// Bearer token sent in the `Authorization` header
    pub bearer_token: Option<String>,
    /// Default for the `apiVersion` parameter
    pub api_version: Option<String>,
    /// Default for the `tenantId` parameter
    pub tenant_id: Option<String>,
}

impl ClientConfig {
    /// Config for `base_url` with the default API version and no credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
            api_version: Some(DEFAULT_API_VERSION.to_string()),
            tenant_id: None,
        }
    }

    /// Set the bearer token.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the default API version (`None` disables the default).
    pub fn with_api_version(mut self, api_version: Option<String>) -> Self {
        self.api_version = api_version;
        self
    }

    /// Set the default tenant.
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_URL)
    }
}

/// Graph client: one builder and one executor shared by every endpoint.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: Url,
    config: ClientConfig,
}

impl GraphClient {
    /// Create a client. Fails if the base URL does not parse.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().build().map_err(|err| {
            warn!(error = %err, "Failed to build Graph HTTP client.");
            GraphError::Transport(err)
        })?;
        Self::with_http_client(config, http)
    }

    /// Create a client around an existing reqwest client.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|err| GraphError::InvalidUrl {
            url: config.base_url.clone(),
            message: err.to_string(),
        })?;
        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fill client defaults into `params` and build the request.
    ///
    /// `apiVersion` and `tenantId` are only inserted when the endpoint declares
    /// them and the caller did not supply them.
    pub fn prepare(&self, endpoint: &Endpoint, mut params: Params) -> Result<PreparedRequest> {
        if endpoint.param(API_VERSION_PARAM).is_some() {
            if let Some(api_version) = &self.config.api_version {
                params.insert_default(API_VERSION_PARAM, api_version.as_str());
            }
        }
        if endpoint.param(TENANT_ID_PARAM).is_some() {
            if let Some(tenant_id) = &self.config.tenant_id {
                params.insert_default(TENANT_ID_PARAM, tenant_id.as_str());
            }
        }

        let mut request = build_request(&self.base_url, endpoint, &params)?;
        if let Some(token) = &self.config.bearer_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
                GraphError::InvalidHeader {
                    name: AUTHORIZATION.to_string(),
                    message: err.to_string(),
                }
            })?;
            request.headers.insert(AUTHORIZATION, value);
        }
        Ok(request)
    }

    /// Build and execute one call.
    pub async fn call(&self, endpoint: &Endpoint, params: Params) -> Result<Envelope> {
        let request = self.prepare(endpoint, params)?;
        self.execute(request).await
    }

    /// Send a prepared request exactly once and classify the outcome.
    ///
    /// * transport failure → [`GraphError::Transport`]
    /// * 204 → success without a body
    /// * other 2xx → success with the body
    /// * anything else → [`GraphError::Status`] carrying the envelope
    pub async fn execute(&self, request: PreparedRequest) -> Result<Envelope> {
        let operation = request.operation;
        let method = request.method;
        debug!(operation, method = method.as_str(), url = %request.url, "Sending Graph request.");

        let response = request.into_reqwest(&self.http).send().await.map_err(|err| {
            debug!(error = %err, operation, "Graph request failed before a response arrived.");
            GraphError::Transport(err)
        })?;

        let meta = ResponseMeta {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        };
        let text = response.text().await.map_err(|err| {
            warn!(error = %err, operation, "Failed to read Graph response body.");
            GraphError::Transport(err)
        })?;

        let envelope = normalize(meta, text);
        let status = envelope.status();
        debug!(operation, %status, "Received Graph response.");

        if status.is_success() {
            Ok(envelope)
        } else {
            Err(GraphError::Status(Box::new(envelope)))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::endpoints;

    fn client() -> GraphClient {
        GraphClient::new(
            ClientConfig::new("https://graph.windows.net")
                .with_tenant_id("contoso")
                .with_bearer_token("tok"),
        )
        .unwrap()
    }

    #[test]
    fn test_prepare_fills_defaults() {
        let request = client()
            .prepare(&endpoints::GET_USER, Params::new().text("userId", "u1"))
            .unwrap();
        assert_eq!(request.url.path(), "/contoso/users/u1");
        assert_eq!(request.query_value("api-version").as_deref(), Some("1.6"));
        assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
    }

    #[test]
    fn test_prepare_keeps_caller_values() {
        let request = client()
            .prepare(
                &endpoints::GET_USER,
                Params::new()
                    .text("tenantId", "other")
                    .text("userId", "u1")
                    .text("apiVersion", "1.5"),
            )
            .unwrap();
        assert_eq!(request.url.path(), "/other/users/u1");
        assert_eq!(request.query_value("api-version").as_deref(), Some("1.5"));
    }

    #[test]
    fn test_prepare_without_defaults_reports_missing_tenant() {
        let client = GraphClient::new(ClientConfig::default().with_api_version(None)).unwrap();
        let err = client
            .prepare(&endpoints::GET_USER, Params::new().text("userId", "u1"))
            .unwrap_err();
        assert!(matches!(err, GraphError::MissingParameter { name: "tenantId", .. }));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = GraphClient::new(ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, GraphError::InvalidUrl { .. }));
    }
}
