use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::ExtractError;

/// Bounded fixed-delay retry. Intentionally simple, no jitter and no
/// exponential growth: attempts are few and the failure mode (model
/// output variance) is not load-dependent.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, initial try included. Always at least 1.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_millis(1000),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

/// Run `op` until it succeeds or the attempt budget is spent, sleeping the
/// fixed delay between attempts. The op re-runs the whole cycle (model call
/// included); on exhaustion the most recent error propagates. An attempt
/// always runs to completion before the retry decision: no cancellation,
/// no per-attempt timeout beyond what the transport enforces.
pub async fn with_retries<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, ExtractError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ExtractError>>,
{
    let max = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!(attempt, "extraction recovered after retry");
                }
                return Ok(value);
            }
            Err(e) if attempt < max => {
                tracing::warn!(
                    attempt,
                    max_attempts = max,
                    error = %e,
                    "extraction attempt failed, retrying"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "extraction attempts exhausted");
                return Err(e);
            }
        }
    }
}
