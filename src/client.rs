//! Main client entry point.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::auth::AuthApi;
use crate::api::compatibility::CompatibilityApi;
use crate::api::payment::PaymentApi;
use crate::config::{ClientConfig, DEFAULT_RETRY_AFTER_SECS, RetryPolicy};
use crate::error::{Error, Result};
use crate::models::auth::RefreshResponse;
use crate::models::request::{ApiRequest, Method};
use crate::sign::RequestSigner;
use crate::storage::{MemoryTokenStore, TokenStore, ANONYMOUS};
use crate::transport::{headers, http};

/// Signed, token-aware client for the Numera compatibility API.
///
/// Each logical call turns a request descriptor into one or more physical
/// HTTP exchanges: transport failures are retried with exponential backoff,
/// a 401 on an authenticated call triggers at most one token refresh and one
/// re-issue, and every other backend error maps to a typed [`Error`].
///
/// The client is stateless per call; tokens live in the injected
/// [`TokenStore`], keyed by a caller-supplied principal. It is safe to share
/// across tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use numera_client::{NumeraClient, Result};
///
/// # async fn example() -> Result<()> {
/// let client = NumeraClient::builder()
///     .base_url("https://api.numera.example")
///     .api_key("my-api-key")
///     .signing_secret("my-signing-secret")
///     .build()?;
///
/// let session = client.auth().login("user-42", "a@example.com", "hunter2").await?;
/// println!("logged in as {}", session.user["name"]);
///
/// let report = client.compatibility().calculate("user-42", serde_json::json!({
///     "person1": {"name": "Ada", "birth_date": "1990-03-14"},
///     "person2": {"name": "Alan", "birth_date": "1991-06-23"},
/// })).await?;
/// println!("{}", report);
/// # Ok(())
/// # }
/// ```
pub struct NumeraClient {
    config: ClientConfig,
    http: reqwest::Client,
    store: Arc<dyn TokenStore>,
    signer: Option<RequestSigner>,
}

impl NumeraClient {
    /// Create a builder for configuring the client.
    pub fn builder() -> NumeraClientBuilder {
        NumeraClientBuilder::new()
    }

    /// Auth endpoint surface (`/auth/*`).
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Compatibility endpoint surface (`/compatibility/*`).
    pub fn compatibility(&self) -> CompatibilityApi<'_> {
        CompatibilityApi::new(self)
    }

    /// Payment endpoint surface (`/payment/*`).
    pub fn payment(&self) -> PaymentApi<'_> {
        PaymentApi::new(self)
    }

    /// The injected token store.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Backend reachability check (`GET /test`, unauthenticated).
    pub async fn ping(&self) -> Result<serde_json::Value> {
        self.execute(&ApiRequest::get("/test")?, ANONYMOUS).await
    }

    /// Forward an inbound Stripe webhook payload to the backend.
    pub async fn forward_stripe_webhook(&self, payload: serde_json::Value) -> Result<serde_json::Value> {
        let request = ApiRequest::post("/webhooks/stripe")?.with_payload(payload);
        self.execute(&request, ANONYMOUS).await
    }

    /// Execute one logical call and return exactly one outcome.
    ///
    /// `principal` scopes token lookups in the store; use
    /// [`ANONYMOUS`](crate::storage::ANONYMOUS) for calls with no user
    /// context.
    pub async fn execute(
        &self,
        request: &ApiRequest,
        principal: &str,
    ) -> Result<serde_json::Value> {
        let mut refreshed = false;

        loop {
            let response = self.send(request, principal).await?;
            let status = response.status();
            let retry_after = retry_after_secs(&response);
            let body = decode_body(response).await;

            if status.is_success() {
                return Ok(body);
            }

            // A 401 on an authenticated call gets one refresh-and-reissue.
            // The flag bounds the loop to two passes per logical call.
            if status == reqwest::StatusCode::UNAUTHORIZED && request.auth_required() && !refreshed
            {
                match self.refresh_session(principal).await {
                    Ok(()) => {
                        debug!(principal, "token refreshed, re-issuing request");
                        refreshed = true;
                        continue;
                    }
                    Err(e) => {
                        warn!(principal, error = %e, "token refresh failed");
                        return Err(Error::AuthenticationFailed);
                    }
                }
            }

            return Err(status_error(status.as_u16(), retry_after, &body));
        }
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// The exchange goes through [`send`](Self::send) directly, so it can
    /// never trigger a further refresh. A failed exchange leaves the stored
    /// tokens untouched.
    pub(crate) async fn refresh_session(&self, principal: &str) -> Result<()> {
        let Some(refresh_token) = self.store.refresh_token(principal).await? else {
            debug!(principal, "no refresh token held");
            return Err(Error::AuthenticationFailed);
        };

        let request = ApiRequest::post("/auth/refresh")?
            .with_payload(serde_json::json!({ "refresh_token": refresh_token }));

        let response = self.send(&request, principal).await?;
        let status = response.status();
        let retry_after = retry_after_secs(&response);
        let body = decode_body(response).await;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), retry_after, &body));
        }

        let parsed: RefreshResponse = serde_json::from_value(body)
            .map_err(|e| Error::Backend {
                status: status.as_u16(),
                message: format!("malformed refresh response: {}", e),
            })?;

        if parsed.access_token.is_empty() {
            return Err(Error::Backend {
                status: status.as_u16(),
                message: "refresh response missing access_token".into(),
            });
        }

        self.store
            .set_access_token(principal, &parsed.access_token)
            .await?;
        if let Some(new_refresh) = parsed.refresh_token.filter(|t| !t.is_empty()) {
            self.store.set_refresh_token(principal, &new_refresh).await?;
        }

        info!(principal, "session refreshed");
        Ok(())
    }

    /// Store the tokens from a login/register exchange.
    pub(crate) async fn store_session(
        &self,
        principal: &str,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<()> {
        self.store.set_access_token(principal, access_token).await?;
        if let Some(refresh) = refresh_token.filter(|t| !t.is_empty()) {
            self.store.set_refresh_token(principal, refresh).await?;
        }
        Ok(())
    }

    /// Build and send the physical request, retrying transport failures.
    async fn send(&self, request: &ApiRequest, principal: &str) -> Result<reqwest::Response> {
        let url = self.config.endpoint_url(request.endpoint());
        let mut hdrs = headers::base_headers(&self.config);

        if request.auth_required() {
            if let Some(token) = self
                .store
                .access_token(principal)
                .await?
                .filter(|t| !t.is_empty())
            {
                headers::add_bearer(&mut hdrs, &token);
            }
        }

        if let Some(signer) = &self.signer {
            let timestamp = chrono::Utc::now().timestamp();
            let signature = signer.signature(request.method().as_str(), request.endpoint(), timestamp);
            headers::add_signature(&mut hdrs, timestamp, &signature);
        }

        let mut builder = self
            .http
            .request(request.method().into(), &url)
            .headers(hdrs);

        if let Some(payload) = request.payload() {
            builder = match request.method() {
                Method::Get => builder.query(&query_pairs(payload)?),
                _ => builder.json(payload),
            };
        }

        debug!(method = request.method().as_str(), endpoint = request.endpoint(), "sending request");
        http::send_with_retry(builder, &self.config.retry).await
    }
}

impl std::fmt::Debug for NumeraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumeraClient")
            .field("base_url", &self.config.base_url)
            .field("signing", &self.signer.is_some())
            .field("store", &self.store.name())
            .finish()
    }
}

/// Map a non-2xx status to the error taxonomy.
fn status_error(status: u16, retry_after: Option<u64>, body: &serde_json::Value) -> Error {
    match status {
        401 => Error::AuthenticationFailed,
        402 => Error::PaymentRequired,
        429 => Error::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        422 => Error::Validation {
            errors: body.get("errors").cloned().unwrap_or(serde_json::Value::Null),
        },
        status => Error::Backend {
            status,
            message: body
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| "Unknown error occurred".to_string()),
        },
    }
}

/// Decode the response body; absent or invalid JSON becomes an empty object.
async fn decode_body(response: reqwest::Response) -> serde_json::Value {
    response
        .json()
        .await
        .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()))
}

/// Read a delta-seconds `Retry-After` header, if present and parsable.
fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}

/// Flatten a GET payload object into query parameters.
fn query_pairs(payload: &serde_json::Value) -> Result<Vec<(String, String)>> {
    let map = payload.as_object().ok_or_else(|| {
        Error::InvalidRequest("GET payload must be a JSON object".into())
    })?;

    Ok(map
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect())
}

/// Builder for [`NumeraClient`].
pub struct NumeraClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    signing_secret: Option<String>,
    client_version: Option<String>,
    request_timeout: Option<std::time::Duration>,
    connect_timeout: Option<std::time::Duration>,
    retry: Option<RetryPolicy>,
    store: Option<Arc<dyn TokenStore>>,
    reqwest_client: Option<reqwest::Client>,
}

impl NumeraClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            signing_secret: None,
            client_version: None,
            request_timeout: None,
            connect_timeout: None,
            retry: None,
            store: None,
            reqwest_client: None,
        }
    }

    /// Backend origin, e.g. `https://api.numera.example`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Value for the `X-API-Key` header.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// HMAC signing secret; omit to send unsigned requests.
    pub fn signing_secret(mut self, secret: impl Into<String>) -> Self {
        self.signing_secret = Some(secret.into());
        self
    }

    /// Value for the `X-Client-Version` header (defaults to the crate version).
    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = Some(version.into());
        self
    }

    /// Per-attempt request timeout.
    pub fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Connect timeout.
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Transport retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Token store backend (defaults to an in-process [`MemoryTokenStore`]).
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Custom reqwest client (timeouts from this builder are then ignored).
    pub fn reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.reqwest_client = Some(client);
        self
    }

    /// Build the client, validating configuration.
    pub fn build(self) -> Result<NumeraClient> {
        let mut config = ClientConfig::new(
            self.base_url.unwrap_or_default(),
            self.api_key.unwrap_or_default(),
        );
        config.signing_secret = self.signing_secret;
        if let Some(version) = self.client_version {
            config.client_version = version;
        }
        if let Some(timeout) = self.request_timeout {
            config.request_timeout = timeout;
        }
        if let Some(timeout) = self.connect_timeout {
            config.connect_timeout = timeout;
        }
        if let Some(retry) = self.retry {
            config.retry = retry;
        }
        config.validate()?;

        let http = match self.reqwest_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(config.connect_timeout)
                .timeout(config.request_timeout)
                .build()
                .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?,
        };

        let signer = config.signing_secret.as_deref().map(RequestSigner::new);
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

        info!(base_url = config.base_url.as_str(), "NumeraClient initialized");
        Ok(NumeraClient {
            config,
            http,
            store,
            signer,
        })
    }
}

impl Default for NumeraClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
