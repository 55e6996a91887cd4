//! Call parameters supplied per invocation.

use std::collections::BTreeMap;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Plain text, used verbatim
    Text(String),
    /// Structured value; serialized as JSON when sent as a body
    Json(serde_json::Value),
    /// Raw payload, sent as-is when used as a body
    Bytes(Vec<u8>),
}

impl ParamValue {
    /// Textual form used for path segments, query values and headers.
    ///
    /// JSON strings are unquoted, other JSON values use their compact JSON text
    /// (so `Json(10)` renders as `10`).
    pub fn to_text(&self) -> String {
        match self {
            ParamValue::Text(text) => text.clone(),
            ParamValue::Json(serde_json::Value::String(text)) => text.clone(),
            ParamValue::Json(value) => value.to_string(),
            ParamValue::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        ParamValue::Json(value)
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(value: Vec<u8>) -> Self {
        ParamValue::Bytes(value)
    }
}

/// Parameter map for one call, plus the extension query map that is layered
/// on top of the descriptor-driven query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
    extra_query: BTreeMap<String, String>,
}

impl Params {
    /// Empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter to any value convertible into [`ParamValue`].
    pub fn set(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set a text parameter.
    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, ParamValue::Text(value.into()))
    }

    /// Set a structured (JSON) parameter.
    pub fn json(self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.set(name, ParamValue::Json(value))
    }

    /// Set a raw byte parameter.
    pub fn bytes(self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.set(name, ParamValue::Bytes(value.into()))
    }

    /// Add a caller-supplied query pair. These are merged after the
    /// descriptor-driven query parameters and win on key collisions.
    pub fn extra_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_query.insert(key.into(), value.into());
        self
    }

    /// Insert `value` under `name` unless the caller already supplied one.
    pub fn insert_default(&mut self, name: &str, value: impl Into<ParamValue>) {
        if !self.values.contains_key(name) {
            self.values.insert(name.to_string(), value.into());
        }
    }

    /// Whether a parameter was supplied.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Get a supplied parameter.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Names of all supplied parameters.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// The extension query map.
    pub fn extra_query_pairs(&self) -> &BTreeMap<String, String> {
        &self.extra_query
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_text() {
        assert_eq!(ParamValue::from("abc").to_text(), "abc");
        assert_eq!(ParamValue::Json(json!("abc")).to_text(), "abc");
        assert_eq!(ParamValue::Json(json!(10)).to_text(), "10");
        assert_eq!(ParamValue::Json(json!(true)).to_text(), "true");
        assert_eq!(ParamValue::Bytes(b"raw".to_vec()).to_text(), "raw");
    }

    #[test]
    fn test_insert_default_keeps_caller_value() {
        let mut params = Params::new().text("apiVersion", "beta");
        params.insert_default("apiVersion", "1.6");
        params.insert_default("tenantId", "t1");
        assert_eq!(params.get("apiVersion"), Some(&ParamValue::from("beta")));
        assert_eq!(params.get("tenantId"), Some(&ParamValue::from("t1")));
    }

    #[test]
    fn test_names_sorted() {
        let params = Params::new().text("b", "2").text("a", "1");
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
