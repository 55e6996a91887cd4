//! Static endpoint descriptors.
//!
//! A descriptor carries everything the request builder needs to know about an
//! operation: the HTTP method, the path template with `{name}` placeholders,
//! and where each parameter goes on the wire.

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Substituted into the `{name}` placeholders of the path template
    Path,
    /// Appended to the query string
    Query,
    /// Sent as a request header
    Header,
    /// Sent as the request body
    Body,
}

/// Single parameter binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Key in the caller's parameter map (e.g. "apiVersion")
    pub name: &'static str,
    /// Key on the wire (e.g. "api-version"). Same as `name` for path and body params.
    pub wire_name: &'static str,
    /// Where the parameter appears
    pub location: ParamLocation,
    /// Whether the caller must supply it
    pub required: bool,
}

impl Param {
    /// Required path parameter bound to the `{name}` placeholder.
    pub const fn path(name: &'static str) -> Self {
        Self {
            name,
            wire_name: name,
            location: ParamLocation::Path,
            required: true,
        }
    }

    /// Optional query parameter sent as `wire_name`.
    pub const fn query(name: &'static str, wire_name: &'static str) -> Self {
        Self {
            name,
            wire_name,
            location: ParamLocation::Query,
            required: false,
        }
    }

    /// Optional header parameter sent as `wire_name`.
    pub const fn header(name: &'static str, wire_name: &'static str) -> Self {
        Self {
            name,
            wire_name,
            location: ParamLocation::Header,
            required: false,
        }
    }

    /// Required request body parameter.
    pub const fn body(name: &'static str) -> Self {
        Self {
            name,
            wire_name: name,
            location: ParamLocation::Body,
            required: true,
        }
    }

    /// Mark the parameter as required.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Descriptor of one REST operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name (e.g. "getUser")
    pub name: &'static str,
    /// HTTP method
    pub method: HttpMethod,
    /// URL path template (e.g. "/{tenantId}/users/{userId}")
    pub path: &'static str,
    /// Parameter bindings, in wire order
    pub params: &'static [Param],
}

impl Endpoint {
    /// Look up a parameter binding by its caller-facing name.
    pub fn param(&self, name: &str) -> Option<&'static Param> {
        self.params.iter().find(|param| param.name == name)
    }

    /// Parameters the caller must supply.
    pub fn required_params(&self) -> impl Iterator<Item = &'static Param> {
        self.params.iter().filter(|param| param.required)
    }

    /// Parameters bound to a given location.
    pub fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &'static Param> {
        self.params
            .iter()
            .filter(move |param| param.location == location)
    }

    /// Placeholder names found in the path template, in order of appearance.
    /// A name appearing twice is returned twice.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            names.push(&after[..end]);
            rest = &after[end + 1..];
        }
        names
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const PARAMS: &[Param] = &[
        Param::path("tenantId"),
        Param::path("userId"),
        Param::query("apiVersion", "api-version").required(),
        Param::query("top", "$top"),
    ];

    const ENDPOINT: Endpoint = Endpoint {
        name: "getUser",
        method: HttpMethod::Get,
        path: "/{tenantId}/users/{userId}",
        params: PARAMS,
    };

    #[test]
    fn test_placeholders_in_order() {
        assert_eq!(ENDPOINT.placeholders(), vec!["tenantId", "userId"]);
    }

    #[test]
    fn test_placeholders_repeated() {
        let endpoint = Endpoint {
            path: "/{tenantId}/x/{tenantId}",
            ..ENDPOINT
        };
        assert_eq!(endpoint.placeholders(), vec!["tenantId", "tenantId"]);
    }

    #[test]
    fn test_required_params() {
        let required: Vec<_> = ENDPOINT.required_params().map(|p| p.name).collect();
        assert_eq!(required, vec!["tenantId", "userId", "apiVersion"]);
    }

    #[test]
    fn test_param_lookup() {
        let top = ENDPOINT.param("top").unwrap();
        assert_eq!(top.wire_name, "$top");
        assert!(!top.required);
        assert!(ENDPOINT.param("missing").is_none());
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(HttpMethod::Patch), reqwest::Method::PATCH);
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }
}
