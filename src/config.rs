//! Client configuration and URL construction.

use std::time::Duration;

use crate::error::{Error, Result};

/// All backend routes live under this version prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Default number of physical attempts per logical call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay for exponential backoff (`base * 2^attempt`).
pub const DEFAULT_BASE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default per-attempt request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `Retry-After` hint when a 429 carries no usable header.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Retry policy for transport-level failures.
///
/// Only failures to obtain *any* HTTP response are retried. A received
/// response, even a 5xx, ends the attempt loop immediately.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum physical attempts (including the first).
    pub max_attempts: u32,
    /// Base backoff delay; the sleep after attempt `n` is `base * 2^n`.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay to sleep after a failed attempt (attempts counted from 1).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_RETRY_DELAY,
        }
    }
}

/// Read-only configuration for [`NumeraClient`](crate::client::NumeraClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, e.g. `https://api.numera.example`. No trailing slash.
    pub base_url: String,
    /// Value of the `X-API-Key` header.
    pub api_key: String,
    /// HMAC signing secret. Signing headers are attached iff this is set.
    pub signing_secret: Option<String>,
    /// Value of the `X-Client-Version` header.
    pub client_version: String,
    /// Per-attempt request timeout.
    pub request_timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Transport retry policy.
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Create a config with defaults for everything but the required fields.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            signing_secret: None,
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Validate required fields.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base_url must not be empty".into()));
        }
        if self.api_key.is_empty() {
            return Err(Error::Config("api_key must not be empty".into()));
        }
        Ok(())
    }

    /// Absolute URL for an endpoint path, e.g. `/auth/login`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, endpoint)
    }
}

/// Validate an endpoint path from a request descriptor.
pub fn validate_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.is_empty() {
        return Err(Error::InvalidRequest("endpoint must not be empty".into()));
    }
    if !endpoint.starts_with('/') {
        return Err(Error::InvalidRequest(format!(
            "endpoint must begin with '/': '{}'",
            endpoint
        )));
    }
    Ok(())
}
