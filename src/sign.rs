//! Request signing.
//!
//! Signatures cover `method + endpoint + timestamp` with HMAC-SHA256 and are
//! sent hex-encoded in `X-Signature` alongside the `X-Timestamp` they were
//! computed for.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes per-request signatures from a shared secret.
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl RequestSigner {
    /// Create a signer from the configured secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Lowercase hex HMAC-SHA256 of `method + endpoint + timestamp`.
    ///
    /// `endpoint` is the descriptor path (without the `/api/v1` prefix) and
    /// `timestamp` is Unix seconds, rendered as a decimal string.
    pub fn signature(&self, method: &str, endpoint: &str, timestamp: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(method.as_bytes());
        mac.update(endpoint.as_bytes());
        mac.update(timestamp.to_string().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
