//! Error types for the Numera client.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`NumeraClient`](crate::client::NumeraClient).
///
/// Every logical call returns exactly one `Ok` body or one of these variants.
/// Transport retries and the single reactive token refresh happen internally
/// and are never visible as separate outcomes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// All transport attempts failed (connect error, timeout, reset).
    /// Carries the last transport error observed.
    #[error("network error after {attempts} attempts: {message}")]
    Network { attempts: u32, message: String },

    /// 401 with no usable refresh path, or the refresh exchange itself failed.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// 402 from the backend.
    #[error("Payment required")]
    PaymentRequired,

    /// 429 from the backend. `retry_after_secs` comes from the `Retry-After`
    /// header, defaulting to 60 when absent or unparsable.
    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// 422 from the backend. `errors` is the backend's `errors` field verbatim.
    #[error("validation failed: {errors}")]
    Validation { errors: serde_json::Value },

    /// Any other non-2xx status. `message` is the backend's `message` field
    /// or a generic fallback.
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// Malformed request descriptor or unusable request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Client configuration problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// Token store backend failure.
    #[error("token store error: {0}")]
    Storage(String),
}

impl Error {
    /// Whether the caller can recover by re-authenticating.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }

    /// Whether the error is worth retrying later at the caller's discretion.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_contains_errors() {
        let err = Error::Validation {
            errors: serde_json::json!({"email": ["invalid"]}),
        };
        let text = err.to_string();
        assert!(text.contains("email"));
        assert!(text.contains("invalid"));
    }

    #[test]
    fn test_backend_display() {
        let err = Error::Backend {
            status: 500,
            message: "Unknown error occurred".into(),
        };
        assert_eq!(err.to_string(), "backend returned 500: Unknown error occurred");
    }

    #[test]
    fn test_classification_helpers() {
        assert!(Error::AuthenticationFailed.is_authentication());
        assert!(Error::RateLimited { retry_after_secs: 60 }.is_transient());
        assert!(!Error::PaymentRequired.is_transient());
    }
}
