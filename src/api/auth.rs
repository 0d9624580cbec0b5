//! Auth endpoints (`/auth/*`).
//!
//! Login, register and Google sign-in store the returned token pair in the
//! client's [`TokenStore`](crate::storage::TokenStore) for the principal, so
//! subsequent authenticated calls pick the session up automatically. Logout
//! clears it.

use serde_json::json;
use tracing::info;

use crate::client::NumeraClient;
use crate::error::{Error, Result};
use crate::models::auth::AuthSession;
use crate::models::request::ApiRequest;

/// Facade for the auth endpoint group.
pub struct AuthApi<'a> {
    client: &'a NumeraClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a NumeraClient) -> Self {
        Self { client }
    }

    /// `POST /auth/register`
    pub async fn register(
        &self,
        principal: &str,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthSession> {
        let mut payload = json!({ "email": email, "password": password });
        if let Some(name) = name {
            payload["name"] = json!(name);
        }
        let request = ApiRequest::post("/auth/register")?.with_payload(payload);
        self.exchange(request, principal).await
    }

    /// `POST /auth/login`
    pub async fn login(&self, principal: &str, email: &str, password: &str) -> Result<AuthSession> {
        let request = ApiRequest::post("/auth/login")?
            .with_payload(json!({ "email": email, "password": password }));
        self.exchange(request, principal).await
    }

    /// `POST /auth/google/token`
    pub async fn login_with_google(&self, principal: &str, id_token: &str) -> Result<AuthSession> {
        let request = ApiRequest::post("/auth/google/token")?
            .with_payload(json!({ "id_token": id_token }));
        self.exchange(request, principal).await
    }

    /// `POST /auth/refresh` — exchange the stored refresh token explicitly.
    ///
    /// Normally this happens reactively inside
    /// [`execute`](NumeraClient::execute) when a 401 is observed.
    pub async fn refresh(&self, principal: &str) -> Result<()> {
        self.client.refresh_session(principal).await
    }

    /// `POST /auth/logout` — then drop the stored tokens, whatever the
    /// backend answered.
    pub async fn logout(&self, principal: &str) -> Result<()> {
        let request = ApiRequest::post("/auth/logout")?.authenticated();
        let outcome = self.client.execute(&request, principal).await;
        self.client.token_store().clear(principal).await?;
        info!(principal, "logged out");
        outcome.map(|_| ())
    }

    /// `DELETE /auth/delete-account` — then drop the stored tokens.
    pub async fn delete_account(&self, principal: &str) -> Result<serde_json::Value> {
        let request = ApiRequest::delete("/auth/delete-account")?.authenticated();
        let body = self.client.execute(&request, principal).await?;
        self.client.token_store().clear(principal).await?;
        Ok(body)
    }

    /// Run a token-issuing exchange and persist the session.
    async fn exchange(&self, request: ApiRequest, principal: &str) -> Result<AuthSession> {
        let body = self.client.execute(&request, principal).await?;
        let session: AuthSession = serde_json::from_value(body).map_err(|e| Error::Backend {
            status: 200,
            message: format!("malformed auth response: {}", e),
        })?;

        if session.access_token.is_empty() {
            return Err(Error::Backend {
                status: 200,
                message: "auth response missing access_token".into(),
            });
        }

        self.client
            .store_session(principal, &session.access_token, session.refresh_token.as_deref())
            .await?;
        Ok(session)
    }
}
