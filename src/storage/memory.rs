//! In-memory token storage.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{TokenEntry, TokenStore};
use crate::error::Result;

/// In-memory token storage, for tests and single-process callers.
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, TokenEntry>>,
}

impl MemoryTokenStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self, principal: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .read()
            .await
            .get(principal)
            .and_then(|e| e.access_token.clone()))
    }

    async fn set_access_token(&self, principal: &str, token: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.entry(principal.to_string()).or_default().access_token = Some(token.to_string());
        Ok(())
    }

    async fn refresh_token(&self, principal: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .read()
            .await
            .get(principal)
            .and_then(|e| e.refresh_token.clone()))
    }

    async fn set_refresh_token(&self, principal: &str, token: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.entry(principal.to_string()).or_default().refresh_token = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self, principal: &str) -> Result<()> {
        self.entries.write().await.remove(principal);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
