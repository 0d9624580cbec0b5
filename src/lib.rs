//! # numera-client
//!
//! Rust client library for the Numera compatibility API.
//!
//! Handles request signing, bearer-token lifecycle (acquire, cache,
//! refresh-on-401), transport-level retry with exponential backoff, and
//! typed error classification. Tokens are kept in an injected
//! [`TokenStore`], keyed by a caller-supplied principal, so the client
//! itself stays stateless per call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use numera_client::{NumeraClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = NumeraClient::builder()
//!         .base_url("https://api.numera.example")
//!         .api_key("my-api-key")
//!         .signing_secret("my-signing-secret")
//!         .build()?;
//!
//!     client.auth().login("user-42", "a@example.com", "hunter2").await?;
//!
//!     let report = client.compatibility().calculate("user-42", serde_json::json!({
//!         "person1": {"name": "Ada", "birth_date": "1990-03-14"},
//!         "person2": {"name": "Alan", "birth_date": "1991-06-23"},
//!     })).await?;
//!
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! ## Behavior
//!
//! - Transport failures (connect errors, timeouts) are retried up to 3 times
//!   with exponential backoff; any received response ends the retry loop.
//! - A 401 on an authenticated call triggers at most one refresh exchange
//!   and one re-issue of the original request.
//! - Requests are signed with `HMAC-SHA256(secret, method + endpoint +
//!   timestamp)` when a signing secret is configured.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod sign;
pub mod storage;
pub mod transport;

// Re-exports for ergonomic usage
pub use client::{NumeraClient, NumeraClientBuilder};
pub use config::{ClientConfig, RetryPolicy};
pub use error::{Error, Result};
pub use models::auth::{AuthSession, RefreshResponse};
pub use models::request::{ApiRequest, Method};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore, ANONYMOUS};
