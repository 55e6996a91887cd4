//! OAuth2 authorization-code flow against the Azure AD v1 endpoints.
//!
//! The flow is: build an authorize URL carrying a random `state`, receive the
//! redirect on a local callback server, check `state`, then exchange the code
//! for a token at `{authority}/{tenant}/oauth2/token`.

use aadgraph_common::{Config, StoredToken};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;
use url::form_urlencoded;

use crate::callback::CallbackParams;

const STATE_BYTES: usize = 16;
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Random hex nonce for the `state` parameter.
pub fn generate_state() -> String {
    let bytes: [u8; STATE_BYTES] = rand::random();
    hex::encode(bytes)
}

/// Client identity and endpoints for one authorization flow.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    authority: String,
    client_id: String,
    client_secret: Option<String>,
    redirect_uri: String,
    resource: String,
    http: reqwest::Client,
}

impl OAuthClient {
    /// Client for `client_id` using the authority, tenant, redirect URI and
    /// Graph resource from `config`.
    pub fn new(config: &Config, client_id: impl Into<String>) -> Result<Self, String> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
        Ok(Self {
            authority: format!("{}/{}", config.authority, config.tenant),
            client_id: client_id.into(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            resource: config.graph_url.clone(),
            http,
        })
    }

    /// Override the redirect URI.
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    /// Redirect URI the authorize URL points back to.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// User sign-in URL.
    pub fn authorize_url(&self, state: &str) -> Result<Url, String> {
        self.build_authorize_url(state, None)
    }

    /// Sign-in URL that asks an administrator to consent for the whole tenant.
    pub fn admin_consent_url(&self, state: &str) -> Result<Url, String> {
        self.build_authorize_url(state, Some("admin_consent"))
    }

    fn build_authorize_url(&self, state: &str, prompt: Option<&str>) -> Result<Url, String> {
        let endpoint = format!("{}/oauth2/authorize", self.authority);
        let mut url =
            Url::parse(&endpoint).map_err(|e| format!("Invalid authorize URL {endpoint}: {e}"))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", &self.redirect_uri)
                .append_pair("resource", &self.resource)
                .append_pair("state", state);
            if let Some(prompt) = prompt {
                query.append_pair("prompt", prompt);
            }
        }
        Ok(url)
    }

    /// Exchange an authorization code for a token.
    ///
    /// Identity fields are filled from the `id_token` claims when the response
    /// carries one, and `expires_on` is derived from `expires_in` if missing.
    pub async fn exchange_code(&self, code: &str) -> Result<StoredToken, String> {
        let endpoint = format!("{}/oauth2/token", self.authority);
        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("grant_type", "authorization_code")
            .append_pair("client_id", &self.client_id)
            .append_pair("code", code)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("resource", &self.resource);
        if let Some(secret) = &self.client_secret {
            form.append_pair("client_secret", secret);
        }
        let body = form.finish();

        debug!(endpoint = %endpoint, "Exchanging authorization code.");
        let response = self
            .http
            .post(&endpoint)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| format!("Failed to reach token endpoint: {e}"))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| format!("Failed to read token response: {e}"))?;

        if !status.is_success() {
            warn!(%status, "Token exchange rejected.");
            return Err(format!(
                "Token exchange failed with status {status}: {}",
                oauth_error_detail(&text)
            ));
        }

        let mut fields: Map<String, Value> = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse token response: {e}"))?;
        fill_expires_on(&mut fields);

        let mut token: StoredToken = serde_json::from_value(Value::Object(fields))
            .map_err(|e| format!("Failed to parse token response: {e}"))?;

        if let Some(id_token) = token.extra.get("id_token").and_then(Value::as_str) {
            match decode_jwt_claims(id_token) {
                Ok(claims) => apply_identity(&mut token, &claims),
                Err(err) => warn!(error = %err, "Ignoring unreadable id_token."),
            }
        }
        Ok(token)
    }
}

/// Check a callback against the expected `state` and return the code.
pub fn verify_callback(params: &CallbackParams, expected_state: &str) -> Result<String, String> {
    if let Some(error) = &params.error {
        let description = params.error_description.as_deref().unwrap_or_default();
        return Err(format!("Sign-in failed: {error} {description}").trim_end().to_string());
    }
    if params.state.as_deref() != Some(expected_state) {
        return Err("Sign-in failed: state mismatch in OAuth callback".to_string());
    }
    params
        .code
        .clone()
        .ok_or_else(|| "Sign-in failed: callback carried no authorization code".to_string())
}

/// Decode the claims segment of a JWT without verifying it.
pub fn decode_jwt_claims(jwt: &str) -> Result<Map<String, Value>, String> {
    let payload = jwt
        .split('.')
        .nth(1)
        .ok_or_else(|| "Token is not a JWT".to_string())?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| format!("Failed to decode token claims: {e}"))?;
    serde_json::from_slice(&bytes).map_err(|e| format!("Failed to parse token claims: {e}"))
}

/// Copy `tid`, `oid` and `upn` (or `unique_name`) into the token.
pub fn apply_identity(token: &mut StoredToken, claims: &Map<String, Value>) {
    let claim = |key: &str| claims.get(key).and_then(Value::as_str).map(str::to_string);
    if token.tenant_id.is_none() {
        token.tenant_id = claim("tid");
    }
    if token.user_id.is_none() {
        token.user_id = claim("oid");
    }
    if token.user_principal_name.is_none() {
        token.user_principal_name = claim("upn").or_else(|| claim("unique_name"));
    }
}

fn fill_expires_on(fields: &mut Map<String, Value>) {
    if fields.contains_key("expires_on") {
        return;
    }
    let expires_in = match fields.get("expires_in") {
        Some(Value::String(text)) => text.parse::<i64>().ok(),
        Some(Value::Number(number)) => number.as_i64(),
        _ => None,
    };
    if let Some(seconds) = expires_in {
        let expires_on = Utc::now().timestamp() + seconds;
        fields.insert("expires_on".to_string(), Value::String(expires_on.to_string()));
    }
}

fn oauth_error_detail(text: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(text).ok();
    parsed
        .as_ref()
        .and_then(|body| {
            body.get("error_description")
                .or_else(|| body.get("error"))
                .and_then(Value::as_str)
        })
        .map_or_else(|| text.trim().to_string(), str::to_string)
}
