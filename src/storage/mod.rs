//! Token storage backends.
//!
//! Provides the [`TokenStore`] trait and implementations:
//! - [`MemoryTokenStore`] - In-memory (testing, single-process callers)
//! - [`FileTokenStore`] - JSON file with 0600 permissions
//!
//! Tokens are keyed by an opaque principal identifier (e.g. a user id).
//! Access tokens carry no local expiry; validity is discovered reactively
//! when the backend answers 401.

mod file;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::error::Result;

/// Principal used for unauthenticated calls.
pub const ANONYMOUS: &str = "anonymous";

/// Tokens held for one principal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Trait for token storage backends.
///
/// Implementations must be safe for concurrent per-principal reads and
/// writes; the client performs no additional locking.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Current access token for a principal, if any.
    async fn access_token(&self, principal: &str) -> Result<Option<String>>;

    /// Replace the access token for a principal.
    async fn set_access_token(&self, principal: &str, token: &str) -> Result<()>;

    /// Current refresh token for a principal, if any.
    async fn refresh_token(&self, principal: &str) -> Result<Option<String>>;

    /// Replace the refresh token for a principal.
    async fn set_refresh_token(&self, principal: &str, token: &str) -> Result<()>;

    /// Drop all tokens for a principal.
    async fn clear(&self, principal: &str) -> Result<()>;

    /// Whether a non-empty access token is held for a principal.
    async fn has_access_token(&self, principal: &str) -> Result<bool> {
        Ok(self
            .access_token(principal)
            .await?
            .is_some_and(|t| !t.is_empty()))
    }

    /// Name of this storage backend.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Blanket impl for `Arc<T>`.
#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for std::sync::Arc<T> {
    async fn access_token(&self, principal: &str) -> Result<Option<String>> {
        (**self).access_token(principal).await
    }
    async fn set_access_token(&self, principal: &str, token: &str) -> Result<()> {
        (**self).set_access_token(principal, token).await
    }
    async fn refresh_token(&self, principal: &str) -> Result<Option<String>> {
        (**self).refresh_token(principal).await
    }
    async fn set_refresh_token(&self, principal: &str, token: &str) -> Result<()> {
        (**self).set_refresh_token(principal, token).await
    }
    async fn clear(&self, principal: &str) -> Result<()> {
        (**self).clear(principal).await
    }
    async fn has_access_token(&self, principal: &str) -> Result<bool> {
        (**self).has_access_token(principal).await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Blanket impl for `Box<T>`.
#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for Box<T> {
    async fn access_token(&self, principal: &str) -> Result<Option<String>> {
        (**self).access_token(principal).await
    }
    async fn set_access_token(&self, principal: &str, token: &str) -> Result<()> {
        (**self).set_access_token(principal, token).await
    }
    async fn refresh_token(&self, principal: &str) -> Result<Option<String>> {
        (**self).refresh_token(principal).await
    }
    async fn set_refresh_token(&self, principal: &str, token: &str) -> Result<()> {
        (**self).set_refresh_token(principal, token).await
    }
    async fn clear(&self, principal: &str) -> Result<()> {
        (**self).clear(principal).await
    }
    async fn has_access_token(&self, principal: &str) -> Result<bool> {
        (**self).has_access_token(principal).await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}
