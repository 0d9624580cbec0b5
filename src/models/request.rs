//! Request descriptor types.

use crate::config::validate_endpoint;
use crate::error::Result;

/// HTTP methods the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Uppercase method name, as used in the signing base string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Immutable description of one logical call.
///
/// Created per call and discarded with it. The payload is sent as URL query
/// parameters for GET and as a JSON body for every other method.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    endpoint: String,
    method: Method,
    payload: Option<serde_json::Value>,
    auth_required: bool,
}

impl ApiRequest {
    /// Create a descriptor. The endpoint must be a non-empty path
    /// beginning with `/`.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        validate_endpoint(&endpoint)?;
        Ok(Self {
            endpoint,
            method,
            payload: None,
            auth_required: false,
        })
    }

    /// GET descriptor.
    pub fn get(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(Method::Get, endpoint)
    }

    /// POST descriptor.
    pub fn post(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(Method::Post, endpoint)
    }

    /// PUT descriptor.
    pub fn put(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(Method::Put, endpoint)
    }

    /// DELETE descriptor.
    pub fn delete(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(Method::Delete, endpoint)
    }

    /// Attach a payload (JSON object for body or query parameters).
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Mark the call as requiring a bearer token.
    pub fn authenticated(mut self) -> Self {
        self.auth_required = true;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        self.payload.as_ref()
    }

    pub fn auth_required(&self) -> bool {
        self.auth_required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_validation() {
        assert!(ApiRequest::get("/compatibility/levels").is_ok());
        assert!(ApiRequest::get("").is_err());
        assert!(ApiRequest::post("auth/login").is_err());
    }

    #[test]
    fn test_auth_defaults_to_false() {
        let request = ApiRequest::post("/auth/login").unwrap();
        assert!(!request.auth_required());

        let request = ApiRequest::get("/compatibility/stats").unwrap().authenticated();
        assert!(request.auth_required());
    }

    #[test]
    fn test_method_strings() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
    }
}
