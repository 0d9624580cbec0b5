//! Backend API header construction.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use crate::config::ClientConfig;

/// Build the base headers every request carries.
///
/// `X-Request-ID` is a fresh UUID v4 per logical call; transport retries of
/// the same call reuse it so the backend can correlate duplicate attempts.
pub fn base_headers(config: &ClientConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );

    headers.insert(
        HeaderName::from_static("x-api-key"),
        HeaderValue::from_str(&config.api_key)
            .unwrap_or_else(|_| HeaderValue::from_static("invalid")),
    );

    headers.insert(
        HeaderName::from_static("x-request-id"),
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("00000000-0000-0000-0000-000000000000")),
    );

    headers.insert(
        HeaderName::from_static("x-client-version"),
        HeaderValue::from_str(&config.client_version)
            .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
    );

    headers
}

/// Attach the bearer token.
pub fn add_bearer(headers: &mut HeaderMap, access_token: &str) {
    headers.insert(
        reqwest::header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", access_token))
            .unwrap_or_else(|_| HeaderValue::from_static("Bearer invalid")),
    );
}

/// Attach the signing headers for the timestamp the signature covers.
pub fn add_signature(headers: &mut HeaderMap, timestamp: i64, signature: &str) {
    headers.insert(
        HeaderName::from_static("x-timestamp"),
        HeaderValue::from_str(&timestamp.to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("0")),
    );
    headers.insert(
        HeaderName::from_static("x-signature"),
        HeaderValue::from_str(signature).unwrap_or_else(|_| HeaderValue::from_static("invalid")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_headers() {
        let config = ClientConfig::new("https://api.numera.example", "test-key");
        let headers = base_headers(&config);

        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["accept"], "application/json");
        assert_eq!(headers["x-api-key"], "test-key");
        assert_eq!(headers["x-client-version"], env!("CARGO_PKG_VERSION"));
        assert!(Uuid::parse_str(headers["x-request-id"].to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_request_id_is_fresh() {
        let config = ClientConfig::new("https://api.numera.example", "test-key");
        let first = base_headers(&config);
        let second = base_headers(&config);
        assert_ne!(first["x-request-id"], second["x-request-id"]);
    }

    #[test]
    fn test_bearer_and_signature() {
        let config = ClientConfig::new("https://api.numera.example", "test-key");
        let mut headers = base_headers(&config);

        add_bearer(&mut headers, "token-123");
        add_signature(&mut headers, 1_700_000_000, "deadbeef");

        assert_eq!(headers["authorization"], "Bearer token-123");
        assert_eq!(headers["x-timestamp"], "1700000000");
        assert_eq!(headers["x-signature"], "deadbeef");
    }
}
