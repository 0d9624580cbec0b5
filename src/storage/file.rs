//! File-based token storage with secure permissions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use super::{TokenEntry, TokenStore};
use crate::error::{Error, Result};

/// File-based token storage using JSON with 0600 permissions.
///
/// The file holds a map of principal to tokens. Suitable for CLI-style
/// callers; server callers should bring their own [`TokenStore`] backed by
/// their session storage.
pub struct FileTokenStore {
    path: PathBuf,
    lock: tokio::sync::Mutex<()>,
}

impl FileTokenStore {
    /// Create storage at the specified path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: tokio::sync::Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<HashMap<String, TokenEntry>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content).map_err(|e| Error::Storage(e.to_string()))
    }

    fn write_all(&self, data: &HashMap<String, TokenEntry>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(data).map_err(|e| Error::Storage(e.to_string()))?;
        std::fs::write(&self.path, &content)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))?;

        // Tokens are credentials; keep the file private to the owner
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .map_err(|e| Error::Storage(format!("chmod {}: {}", self.path.display(), e)))?;
        }

        debug!(path = %self.path.display(), "tokens saved");
        Ok(())
    }

    async fn update<F>(&self, principal: &str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut TokenEntry),
    {
        let _guard = self.lock.lock().await;
        let mut data = self.read_all()?;
        apply(data.entry(principal.to_string()).or_default());
        self.write_all(&data)
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn access_token(&self, principal: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_all()?
            .get(principal)
            .and_then(|e| e.access_token.clone()))
    }

    async fn set_access_token(&self, principal: &str, token: &str) -> Result<()> {
        let token = token.to_string();
        self.update(principal, |entry| entry.access_token = Some(token))
            .await
    }

    async fn refresh_token(&self, principal: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_all()?
            .get(principal)
            .and_then(|e| e.refresh_token.clone()))
    }

    async fn set_refresh_token(&self, principal: &str, token: &str) -> Result<()> {
        let token = token.to_string();
        self.update(principal, |entry| entry.refresh_token = Some(token))
            .await
    }

    async fn clear(&self, principal: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut data = self.read_all()?;
        data.remove(principal);
        self.write_all(&data)
    }

    fn name(&self) -> &str {
        "file"
    }
}
