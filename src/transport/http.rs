//! Physical send loop with bounded transport-level retry.

use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::error::{Error, Result};

/// Send a prepared request, retrying transport failures with exponential
/// backoff.
///
/// Only failures to obtain a response (connect errors, timeouts, resets)
/// are retried. Any received HTTP response, success or error, ends the loop
/// immediately; status interpretation is the caller's job. On exhaustion the
/// last transport error is returned as [`Error::Network`].
pub async fn send_with_retry(
    request: reqwest::RequestBuilder,
    retry: &RetryPolicy,
) -> Result<reqwest::Response> {
    let mut last_error: Option<reqwest::Error> = None;

    for attempt in 1..=retry.max_attempts {
        let prepared = request
            .try_clone()
            .ok_or_else(|| Error::InvalidRequest("request body is not retryable".into()))?;

        match prepared.send().await {
            Ok(response) => {
                debug!(attempt, status = response.status().as_u16(), "response received");
                return Ok(response);
            }
            Err(e) => {
                warn!(attempt, error = %e, "transport error");
                if attempt < retry.max_attempts {
                    let delay = retry.backoff_delay(attempt);
                    debug!(attempt, delay_ms = delay.as_millis() as u64, "backing off");
                    tokio::time::sleep(delay).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(Error::Network {
        attempts: retry.max_attempts,
        message: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown transport error".into()),
    })
}
