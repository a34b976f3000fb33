//! Retry with exponential backoff for transient inference failures
//!
//! Rate limiting is the only failure class worth waiting out: the provider
//! is telling us to slow down, not that the request is bad. The policy is a
//! plain value so callers can bound it (or not) and tests can script it.

use std::future::Future;
use std::time::Duration;

use crate::{Error, Result};

/// Backoff policy for retryable failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts allowed; `None` retries indefinitely
    pub max_attempts: Option<u32>,
    /// Delay before the first retry, doubling (times `multiplier`) after each
    pub base_delay: Duration,
    /// Backoff multiplier applied per attempt
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            base_delay: Duration::from_millis(500),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Backoff delay before retry number `attempt` (1-based)
    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * self.multiplier.saturating_pow(attempt.saturating_sub(1))
    }

    /// Run `operation`, retrying while `is_retryable` holds for the error.
    ///
    /// Non-retryable errors are returned as-is on the first occurrence. When
    /// `max_attempts` is bounded and runs out, `Error::RetryExhausted` is
    /// returned instead of the transient error.
    pub async fn retry<F, Fut, T, P>(&self, operation: F, is_retryable: P) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
        P: Fn(&Error) -> bool,
    {
        let mut attempts: u32 = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if is_retryable(&e) => {
                    attempts += 1;
                    if let Some(max) = self.max_attempts {
                        if attempts >= max {
                            return Err(Error::RetryExhausted(max));
                        }
                    }
                    let delay = self.delay_for(attempts);
                    tracing::debug!(
                        error = %e,
                        attempt = attempts,
                        delay_ms = delay.as_millis(),
                        "Transient failure, backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn rate_limited(error: &Error) -> bool {
        matches!(error, Error::RateLimited)
    }

    #[test]
    fn delays_double_from_base() {
        let policy = RetryPolicy {
            max_attempts: None,
            base_delay: Duration::from_millis(200),
            multiplier: 2,
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
        assert_eq!(policy.delay_for(3), Duration::from_millis(800));
        assert_eq!(policy.delay_for(4), Duration::from_millis(1600));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_rate_limits_until_success() {
        let policy = RetryPolicy {
            max_attempts: None,
            base_delay: Duration::from_millis(100),
            multiplier: 2,
        };
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        let result = policy
            .retry(
                || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if n < 3 {
                            Err(Error::RateLimited)
                        } else {
                            Ok("done".to_string())
                        }
                    }
                },
                rate_limited,
            )
            .await
            .unwrap();

        assert_eq!(result, "done");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // 100ms + 200ms + 400ms of strictly increasing waits
        assert_eq!(start.elapsed(), Duration::from_millis(700));
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_policy_exhausts() {
        let policy = RetryPolicy {
            max_attempts: Some(2),
            base_delay: Duration::from_millis(100),
            multiplier: 2,
        };
        let calls = AtomicU32::new(0);

        let result: Result<String> = policy
            .retry(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(Error::RateLimited) }
                },
                rate_limited,
            )
            .await;

        assert!(matches!(result, Err(Error::RetryExhausted(2))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_errors_are_not_retried() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let result: Result<String> = policy
            .retry(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(Error::Completion("bad request".to_string())) }
                },
                rate_limited,
            )
            .await;

        assert!(matches!(result, Err(Error::Completion(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
