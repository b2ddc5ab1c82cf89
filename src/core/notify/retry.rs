//! Bounded retry with multiplicative backoff
//!
//! [`RetryPolicy`] drives an async operation until it succeeds or uses up
//! `max_attempts`. Every failure is retried unless the policy is restricted
//! to transient failures. The delay before retry `n` is
//! `initial_delay * multiplier^(n-1)`, capped at `max_delay`.

use crate::config::RetryConfig;
use crate::domain::{QueueError, RetryError};
use crate::log_retry_attempt;
use std::future::Future;
use std::time::Duration;

/// Cap applied when none is configured
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Errors that can tell whether repeating the operation may help
pub trait Retryable {
    /// `true` if a later attempt may succeed
    fn is_transient(&self) -> bool;
}

impl Retryable for QueueError {
    fn is_transient(&self) -> bool {
        QueueError::is_transient(self)
    }
}

/// Retry policy: attempt ceiling plus backoff schedule
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    multiplier: f64,
    max_delay: Duration,
    transient_only: bool,
}

impl RetryPolicy {
    /// Creates a policy
    ///
    /// `max_attempts` counts the first attempt and is at least 1. A
    /// multiplier below 1.0 is raised to 1.0 (fixed delay).
    pub fn new(max_attempts: u32, initial_delay: Duration, multiplier: f64) -> Self {
        let multiplier = if multiplier.is_finite() && multiplier >= 1.0 {
            multiplier
        } else {
            1.0
        };
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            multiplier,
            max_delay: initial_delay.max(DEFAULT_MAX_DELAY),
            transient_only: false,
        }
    }

    /// Caps the delay between attempts
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Stops at the first non-transient failure instead of retrying it
    pub fn transient_only(mut self) -> Self {
        self.transient_only = true;
        self
    }

    /// Creates a policy from configuration
    pub fn from_config(config: &RetryConfig) -> Self {
        let policy = Self::new(
            config.max_attempts,
            Duration::from_millis(config.initial_delay_ms),
            config.multiplier,
        )
        .with_max_delay(Duration::from_millis(config.max_delay_ms));
        if config.transient_only {
            policy.transient_only()
        } else {
            policy
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn is_transient_only(&self) -> bool {
        self.transient_only
    }

    /// Delay to wait after failed attempt number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let millis =
            (self.initial_delay.as_millis() as f64 * self.multiplier.powi(exponent)).round();
        if !millis.is_finite() || millis >= self.max_delay.as_millis() as f64 {
            return self.max_delay;
        }
        Duration::from_millis(millis as u64)
    }

    /// Runs `operation` under this policy
    ///
    /// The closure receives the 1-based attempt number. Failures are retried
    /// after the backoff delay. A transient-only policy stops at the first
    /// non-transient failure.
    ///
    /// # Errors
    ///
    /// Returns [`RetryError::Exhausted`] with the last error once
    /// `max_attempts` failures have occurred, or [`RetryError::Permanent`]
    /// on the first non-transient failure of a transient-only policy.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + std::error::Error + 'static,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if self.transient_only && !error.is_transient() => {
                    return Err(RetryError::Permanent { attempt, error });
                }
                Err(last) if attempt >= self.max_attempts => {
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last,
                    });
                }
                Err(error) => {
                    let delay = self.delay_after(attempt);
                    log_retry_attempt!(attempt + 1, self.max_attempts, error);
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1), 1.0)
    }

    #[test]
    fn test_delay_schedule() {
        let policy = RetryPolicy::new(5, Duration::from_millis(100), 2.0)
            .with_max_delay(Duration::from_millis(350));
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
        assert_eq!(policy.delay_after(3), Duration::from_millis(350));
        assert_eq!(policy.delay_after(40), Duration::from_millis(350));
    }

    #[test]
    fn test_fixed_delay() {
        let policy = RetryPolicy::new(3, Duration::from_millis(50), 1.0);
        assert_eq!(policy.delay_after(1), policy.delay_after(3));
    }

    #[test]
    fn test_new_clamps_inputs() {
        let policy = RetryPolicy::new(0, Duration::from_millis(1), 0.1);
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.multiplier(), 1.0);
        assert_eq!(policy.max_delay(), DEFAULT_MAX_DELAY);
    }

    #[test]
    fn test_from_config() {
        let policy = RetryPolicy::from_config(&RetryConfig {
            max_attempts: 4,
            initial_delay_ms: 10,
            multiplier: 3.0,
            max_delay_ms: 500,
            transient_only: true,
        });
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.initial_delay(), Duration::from_millis(10));
        assert_eq!(policy.delay_after(2), Duration::from_millis(30));
        assert_eq!(policy.max_delay(), Duration::from_millis(500));
        assert!(policy.is_transient_only());
    }

    #[tokio::test]
    async fn test_success_first_try() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, RetryError<QueueError>> = fast(3)
            .run(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok(attempt) }
            })
            .await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = fast(10)
            .run(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt <= 2 {
                        Err(QueueError::Transient("connection reset".to_string()))
                    } else {
                        Ok(())
                    }
                }
            })
            .await;
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = fast(4)
            .run(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(QueueError::Transient(format!("attempt {attempt}"))) }
            })
            .await;
        let err = result.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(err.attempts(), 4);
        assert_eq!(
            err.last_error(),
            &QueueError::Transient("attempt 4".to_string())
        );
        assert!(matches!(err, RetryError::Exhausted { .. }));
    }

    #[tokio::test]
    async fn test_rejected_failures_are_retried_by_default() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = fast(5)
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(QueueError::Rejected("AccessDenied".to_string())) }
            })
            .await;
        let err = result.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert!(matches!(err, RetryError::Exhausted { attempts: 5, .. }));
        assert_eq!(
            err.last_error(),
            &QueueError::Rejected("AccessDenied".to_string())
        );
    }

    #[tokio::test]
    async fn test_transient_only_stops_on_rejection() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = fast(5)
            .transient_only()
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(QueueError::Rejected("NonExistentQueue".to_string())) }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result.unwrap_err(),
            RetryError::Permanent { attempt: 1, .. }
        ));
    }
}
