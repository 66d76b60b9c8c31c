//! Bounded retry with multiplicative backoff for completion attempts.
//!
//! Every failed attempt that still has budget left is reported on the
//! diagnostic channel, followed by a sleep. The delay then grows by
//! `multiplier`, capped at `max_delay`, and never resets within one run.
//! No sleep follows the final failure.

use crate::config::RetryConfig;
use crate::error::{ApiError, QueryError};
use crate::ui::render::RenderSink;
use std::future::Future;
use std::time::Duration;

/// Attempt budget and backoff curve for one query invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Upper bound on total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Growth factor applied after each sleep.
    pub multiplier: f64,
    /// Ceiling for any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Build the policy for one query. Without `retry_enabled` the budget is
    /// exactly one attempt.
    pub fn from_config(config: &RetryConfig, retry_enabled: bool) -> Self {
        let max_attempts = if retry_enabled {
            config.max_retries.max(1)
        } else {
            1
        };
        let max_delay = secs(config.retry_max_delay);
        Self {
            max_attempts,
            initial_delay: secs(config.retry_delay).min(max_delay),
            multiplier: config.retry_multiplier.max(1.0),
            max_delay,
        }
    }

    /// Delay that follows `current`: `min(current * multiplier, max_delay)`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        Duration::try_from_secs_f64(current.as_secs_f64() * self.multiplier)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

/// Drives attempts until one succeeds or the budget is spent.
pub struct RetryController<'a> {
    policy: RetryPolicy,
    sink: &'a dyn RenderSink,
}

impl<'a> RetryController<'a> {
    pub fn new(policy: RetryPolicy, sink: &'a dyn RenderSink) -> Self {
        Self { policy, sink }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `attempt` under the policy, sleeping on the tokio timer.
    pub async fn run<T, F, Fut>(&self, attempt: F) -> Result<T, QueryError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.run_with_sleep(attempt, tokio::time::sleep).await
    }

    /// Run `attempt` under the policy with an injectable sleep.
    ///
    /// `attempt` receives the 1-based attempt number.
    pub async fn run_with_sleep<T, F, Fut, S, SFut>(
        &self,
        mut attempt: F,
        mut sleep: S,
    ) -> Result<T, QueryError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
        S: FnMut(Duration) -> SFut,
        SFut: Future<Output = ()>,
    {
        let mut remaining = self.policy.max_attempts.max(1);
        let mut delay = self.policy.initial_delay;
        let mut number: u32 = 0;
        loop {
            number = number.saturating_add(1);
            let err = match attempt(number).await {
                Ok(value) => {
                    if number > 1 {
                        tracing::info!(attempt = number, "completion succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };
            remaining -= 1;
            if remaining == 0 {
                tracing::warn!(attempts = number, error = %err, "completion attempts exhausted");
                return Err(QueryError::RetryExhausted {
                    attempts: number,
                    last: err,
                });
            }

            if err.is_rate_limited() {
                self.sink.error("Error: Too many requests. We will try again");
            }
            self.sink.error(&format!("Error: {err}"));
            self.sink.error(&format!(
                "Retrying again in {} seconds...",
                format_secs(delay)
            ));
            tracing::warn!(
                attempt = number,
                remaining,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "completion attempt failed; backing off"
            );
            sleep(delay).await;
            delay = self.policy.next_delay(delay);
        }
    }
}

/// Seconds with trailing zeros trimmed: `5`, `1.5`, `0.25`.
fn format_secs(delay: Duration) -> String {
    let text = format!("{:.3}", delay.as_secs_f64());
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
