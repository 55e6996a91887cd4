//! Response envelope and body normalization.

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tracing::{debug, warn};
use url::Url;

/// Transport metadata of a response.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Final request URL
    pub url: Url,
}

impl ResponseMeta {
    /// Content type header, if present and valid ASCII.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

/// Response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Parsed JSON (content type was JSON and the text parsed)
    Json(serde_json::Value),
    /// Raw text (non-JSON content type, or JSON that failed to parse)
    Text(String),
}

/// `{ response, body }` pair produced for both successes and HTTP failures.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Transport metadata
    pub response: ResponseMeta,
    /// Payload; `None` for 204 responses
    pub body: Option<Body>,
}

impl Envelope {
    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    /// JSON body, if the payload parsed as JSON.
    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.body {
            Some(Body::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// Items of an OData collection response (`{"value": [...]}`).
    pub fn odata_values(&self) -> &[serde_json::Value] {
        self.json()
            .and_then(|json| json.get("value"))
            .and_then(|value| value.as_array())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Next-page skip token from `odata.nextLink`, if any.
    pub fn next_skiptoken(&self) -> Option<String> {
        let next_link = self.json()?.get("odata.nextLink")?.as_str()?;
        let query = next_link.split_once('?')?.1;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "$skiptoken")
            .map(|(_, value)| value.into_owned())
    }
}

/// Whether a content type names a JSON media type: `application/json` or any
/// `application/*+json` subtype. Parameters such as `charset` are ignored.
pub fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    kind == "application" && (subtype == "json" || subtype.ends_with("+json"))
}

/// Turn a response body into a [`Body`]. JSON parse failures are not errors:
/// the raw text is kept.
pub(crate) fn parse_body(meta: &ResponseMeta, text: String) -> Body {
    let is_json = meta.content_type().is_some_and(is_json_media_type);
    if !is_json {
        return Body::Text(text);
    }
    match serde_json::from_str(&text) {
        Ok(value) => Body::Json(value),
        Err(err) => {
            warn!(error = %err, url = %meta.url, "Response claims JSON but did not parse, keeping raw body.");
            Body::Text(text)
        }
    }
}

/// Build the envelope for a completed response.
///
/// 204 carries no body regardless of content type; every other status carries
/// the (possibly empty) body.
pub(crate) fn normalize(meta: ResponseMeta, text: String) -> Envelope {
    let body = if meta.status == StatusCode::NO_CONTENT {
        None
    } else {
        Some(parse_body(&meta, text))
    };
    debug!(status = %meta.status, has_body = body.is_some(), "Normalized Graph response.");
    Envelope {
        response: meta,
        body,
    }
}
