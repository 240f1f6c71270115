use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Base unit for the exponential delay schedule.
const BASE_DELAY: Duration = Duration::from_secs(1);

/// Retry `op` up to `max_attempts` times with an exponential delay of
/// `2^i` seconds before attempt `i + 1`, no jitter. The last error is
/// surfaced once attempts are exhausted; a success is returned
/// immediately. `op` runs at least once even when `max_attempts` is 0.
///
/// Reusable independently of what it wraps; in this crate it guards
/// only the identity bootstrap call.
pub async fn with_backoff<T, E, F, Fut>(mut op: F, max_attempts: u32) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= max_attempts {
                    return Err(err);
                }
                let delay = BASE_DELAY * (1 << (attempt - 1));
                tracing::debug!("attempt {} failed, retrying in {:?}", attempt, delay);
                sleep(delay).await;
            }
        }
    }
}
