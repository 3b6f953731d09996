//! Reusable retry with exponential backoff.
//!
//! Every upstream call goes through [`retry_with_backoff`]; there are no
//! per-call-site retry loops. A 429 carrying a parseable `Retry-After`
//! overrides the computed delay, still capped at `max_delay_ms`.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RobloxResult;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    4
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    8_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retrying after failed attempt `attempt` (1-based):
    /// `base * 2^(attempt-1)`, capped at `max_delay_ms`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(10);
        let delay = self.base_delay_ms.saturating_mul(1u64 << exponent);
        Duration::from_millis(delay.min(self.max_delay_ms))
    }
}

/// Run `op` until it succeeds, the error is not retryable, or the attempt
/// budget is spent. Returns the last error on give-up.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    call: &str,
    mut op: F,
) -> RobloxResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RobloxResult<T>>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                let delay = err
                    .retry_after_ms()
                    .map(|ms| Duration::from_millis(ms.min(policy.max_delay_ms)))
                    .unwrap_or_else(|| policy.backoff_delay(attempt));
                warn!(
                    call,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Upstream call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
