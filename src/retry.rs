//! Linear-backoff retry for network calls made during submission.
//!
//! The delay after failed attempt `n` is `n × base`. No jitter.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

pub const DEFAULT_RETRY_ATTEMPTS: usize = 3;
pub const DEFAULT_RETRY_BASE_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub attempts: usize,
    pub base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: DEFAULT_RETRY_ATTEMPTS, base: Duration::from_millis(DEFAULT_RETRY_BASE_MS) }
    }
}

impl RetryPolicy {
    /// Sleep before the attempt following failed attempt `attempt` (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: usize) -> Duration {
        self.base
            .saturating_mul(u32::try_from(attempt).unwrap_or(u32::MAX))
    }
}

/// Run `op` until it succeeds or the policy's attempts are used up.
///
/// `op` receives the 1-based attempt number. The last error is returned.
///
/// # Errors
///
/// Returns the error from the final attempt.
pub async fn retry_linear<T, E, F, Fut>(policy: RetryPolicy, label: &str, op: F) -> Result<T, E>
where
    E: Display,
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_linear_when(policy, label, |_| true, op).await
}

/// Like [`retry_linear`], but gives up early on errors `should_retry` rejects.
///
/// # Errors
///
/// Returns the first non-retryable error, or the error from the final attempt.
pub async fn retry_linear_when<T, E, P, F, Fut>(
    policy: RetryPolicy,
    label: &str,
    should_retry: P,
    mut op: F,
) -> Result<T, E>
where
    E: Display,
    P: Fn(&E) -> bool,
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let total = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(label, attempt, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if attempt < total && should_retry(&e) => {
                warn!(error = %e, label, attempt, total, "attempt failed; retrying");
                tokio::time::sleep(policy.delay_after(attempt)).await;
                attempt += 1;
            }
            Err(e) => {
                warn!(error = %e, label, attempt, total, "giving up");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;
