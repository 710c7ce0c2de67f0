//! Bounded exponential-backoff retry for read-only ledger calls.
//!
//! Retries only errors the taxonomy marks retryable (transport failures
//! that provably changed no state). Mutating calls must never come
//! through here: a retried anchor submission after an ambiguous failure
//! can create a duplicate record.

use std::time::Duration;

use crate::error::LedgerError;

/// Maximum number of retry attempts after the initial call.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries (doubles each attempt: 200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

/// Run a read-only call with bounded retry on retryable errors.
pub(crate) async fn retry_read<F, Fut, T>(operation: &str, f: F) -> Result<T, LedgerError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, LedgerError>>,
{
    for attempt in 0..MAX_RETRIES {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() => {
                let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt));
                tracing::warn!(
                    operation,
                    attempt = attempt + 1,
                    max_retries = MAX_RETRIES,
                    "ledger read failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
    // Final attempt, no more retries.
    f().await
}
