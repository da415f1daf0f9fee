//! Retry with exponential backoff for feed and API requests.
//!
//! Rate limiting, network failures and server-side (5xx) errors are retried.
//! Everything else is returned on first failure.

use std::future::Future;
use std::time::Duration;

use crate::error::FeedError;

/// Returns `true` if `err` is transient and worth another attempt.
fn is_retriable(err: &FeedError) -> bool {
    match err {
        FeedError::RateLimited { .. } | FeedError::Http(_) => true,
        FeedError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
///
/// The wait before retry `n` (counting from 0) is `backoff_base_secs * 2^n`
/// seconds, so `max_retries = 3` means at most 4 attempts. The last error is
/// returned once retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, FeedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FeedError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient request error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
