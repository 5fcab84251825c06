//! Retry with exponential back-off and jitter for catalog API calls.
//!
//! Reads retry transient failures: connection problems, timeouts, 5xx and
//! 429. A 404 or a 422 is an answer, not an outage, so it goes straight back
//! to the caller.
//!
//! Writes retry only when the request never left the client. A timeout or a
//! 5xx on a `POST` may come after the server already created the resource.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

const MAX_DELAY_MS: u64 = 30_000;

/// Which failures a request may be repeated after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryMode {
    /// Safe to repeat: every transient failure is retried.
    Read,
    /// Not safe to repeat once sent: only connection failures are retried.
    Write,
}

impl RetryMode {
    fn allows(self, err: &ClientError) -> bool {
        match self {
            Self::Read => is_retriable(err),
            Self::Write => matches!(err, ClientError::Http(e) if e.is_connect()),
        }
    }
}

pub(crate) fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ClientError::UnexpectedStatus { status, .. } => {
            *status == 429 || (500..600).contains(status)
        }
        ClientError::NotFound { .. }
        | ClientError::Validation { .. }
        | ClientError::Deserialize { .. }
        | ClientError::InvalidBaseUrl { .. }
        | ClientError::Io { .. } => false,
    }
}

/// Un-jittered delay before retry number `retry` (1-based): the base doubled
/// once per earlier retry, capped at 30 s.
pub(crate) fn backoff_delay_ms(retry: u32, backoff_base_ms: u64) -> u64 {
    let exponent = retry.saturating_sub(1).min(10);
    backoff_base_ms
        .saturating_mul(1u64 << exponent)
        .min(MAX_DELAY_MS)
}

/// Scales `delay_ms` by a random factor in `[0.75, 1.25)`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn jittered(delay_ms: u64) -> u64 {
    let factor = 0.75 + rand::random::<f64>() * 0.5;
    (delay_ms as f64 * factor) as u64
}

/// Runs `operation`, retrying failures `mode` allows up to `max_retries`
/// times.
///
/// With `backoff_base_ms = 500` the sleeps are roughly 500 ms, 1 s, 2 s,
/// each with ±25 % jitter.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    mode: RetryMode,
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut retry = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retry >= max_retries || !mode.allows(&err) {
            return Err(err);
        }
        retry += 1;

        let delay_ms = jittered(backoff_delay_ms(retry, backoff_base_ms));
        tracing::warn!(
            ?mode,
            retry,
            max_retries,
            delay_ms,
            error = %err,
            "transient catalog API failure, backing off"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}
