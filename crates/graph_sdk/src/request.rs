//! Request builder: endpoint descriptor + call parameters → HTTP request.
//!
//! Building is synchronous and does no I/O, so caller errors such as a missing
//! required parameter surface before anything is sent.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;
use url::Url;

use crate::descriptor::{Endpoint, HttpMethod, ParamLocation};
use crate::error::{GraphError, Result};
use crate::params::{ParamValue, Params};

const JSON_MEDIA_TYPE: &str = "application/json";

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Serialized structured value; sent with a JSON content type
    Json(Vec<u8>),
    /// Text or bytes sent as-is
    Raw(Vec<u8>),
}

impl RequestBody {
    /// Payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RequestBody::Json(bytes) | RequestBody::Raw(bytes) => bytes,
        }
    }

    /// Whether the payload was serialized as JSON.
    pub fn is_json(&self) -> bool {
        matches!(self, RequestBody::Json(_))
    }
}

/// Fully specified request, ready to hand to the transport.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// Operation name from the descriptor
    pub operation: &'static str,
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL including the query string
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request payload
    pub body: Option<RequestBody>,
}

impl PreparedRequest {
    /// Attach this request to a reqwest client.
    pub fn into_reqwest(self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        let mut builder = client
            .request(self.method.into(), self.url)
            .headers(self.headers);
        if let Some(body) = self.body {
            builder = builder.body(match body {
                RequestBody::Json(bytes) | RequestBody::Raw(bytes) => bytes,
            });
        }
        builder
    }

    /// Value of a query parameter in the built URL.
    pub fn query_value(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.into_owned())
    }
}

/// Build the request for `endpoint` from `params`, relative to `base_url`.
///
/// Path placeholders are replaced textually. Values are not percent-encoded,
/// so a value containing `/` adds path segments.
pub fn build_request(base_url: &Url, endpoint: &Endpoint, params: &Params) -> Result<PreparedRequest> {
    if let Some(missing) = endpoint
        .required_params()
        .find(|param| !params.contains(param.name))
    {
        return Err(GraphError::MissingParameter {
            operation: endpoint.name,
            name: missing.name,
        });
    }

    for name in params.names() {
        if endpoint.param(name).is_none() {
            debug!(operation = endpoint.name, param = name, "Ignoring parameter unknown to the endpoint.");
        }
    }

    let path = render_path(endpoint, params);
    let raw_url = format!("{}{path}", base_url.as_str().trim_end_matches('/'));
    let mut url = Url::parse(&raw_url).map_err(|err| GraphError::InvalidUrl {
        url: raw_url.clone(),
        message: err.to_string(),
    })?;

    let query = query_pairs(endpoint, params);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));
    for param in endpoint.params_in(ParamLocation::Header) {
        let Some(value) = params.get(param.name) else {
            continue;
        };
        let (name, value) = header_pair(param.wire_name, &value.to_text())?;
        headers.insert(name, value);
    }

    let body = endpoint
        .params_in(ParamLocation::Body)
        .find_map(|param| params.get(param.name))
        .map(encode_body);
    if body.as_ref().is_some_and(RequestBody::is_json) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
    }

    debug!(
        operation = endpoint.name,
        method = endpoint.method.as_str(),
        %url,
        "Built Graph request."
    );

    Ok(PreparedRequest {
        operation: endpoint.name,
        method: endpoint.method,
        url,
        headers,
        body,
    })
}

// Scans the template once. Substituted values are never re-scanned, so a
// value containing `{name}` text is kept as is.
fn render_path(endpoint: &Endpoint, params: &Params) -> String {
    let mut path = String::with_capacity(endpoint.path.len());
    let mut rest = endpoint.path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        path.push_str(&rest[..start]);
        match path_value(endpoint, params, &after[..end]) {
            Some(value) => path.push_str(&value),
            None => path.push_str(&rest[start..start + end + 2]),
        }
        rest = &after[end + 1..];
    }
    path.push_str(rest);
    path
}

fn path_value(endpoint: &Endpoint, params: &Params, name: &str) -> Option<String> {
    endpoint
        .param(name)
        .filter(|param| param.location == ParamLocation::Path)
        .and_then(|param| params.get(param.name))
        .map(ParamValue::to_text)
}

/// Descriptor query parameters in descriptor order, then the extension map.
/// An extension key that is already present replaces the generated value.
fn query_pairs(endpoint: &Endpoint, params: &Params) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = endpoint
        .params_in(ParamLocation::Query)
        .filter_map(|param| {
            params
                .get(param.name)
                .map(|value| (param.wire_name.to_string(), value.to_text()))
        })
        .collect();

    for (key, value) in params.extra_query_pairs() {
        match pairs.iter_mut().find(|(existing, _)| existing == key) {
            Some(pair) => pair.1.clone_from(value),
            None => pairs.push((key.clone(), value.clone())),
        }
    }
    pairs
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|err| GraphError::InvalidHeader {
            name: name.to_string(),
            message: err.to_string(),
        })?;
    let header_value = HeaderValue::from_str(value).map_err(|err| GraphError::InvalidHeader {
        name: name.to_string(),
        message: err.to_string(),
    })?;
    Ok((header_name, header_value))
}

fn encode_body(value: &ParamValue) -> RequestBody {
    match value {
        ParamValue::Json(json) => RequestBody::Json(json.to_string().into_bytes()),
        ParamValue::Text(text) => RequestBody::Raw(text.clone().into_bytes()),
        ParamValue::Bytes(bytes) => RequestBody::Raw(bytes.clone()),
    }
}
