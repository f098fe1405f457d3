//! Generic retry strategy implementation with bounded attempts and capped
//! backoff
//!
//! This module provides a retry mechanism that can wrap any single fallible
//! async operation. The executor owns the attempt budget and the delay
//! schedule, while a [`RetryPolicy`] decides which failures are worth another
//! attempt. Whatever happens, the caller gets the last underlying error back.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Errors that can occur during retry operations
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// All retry attempts have been exhausted; `source` is the last failure
    #[error("All retry attempts exhausted after {attempts} tries: {source}")]
    AttemptsExhausted { attempts: u32, source: E },

    /// The operation failed with a non-retryable error
    #[error("Operation failed with non-retryable error: {source}")]
    NonRetryable { source: E },
}

/// Result type for retry operations
pub type RetryResult<T, E> = Result<T, RetryError<E>>;

/// Outcome of a retry execution including result and summary statistics.
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    pub result: RetryResult<T, E>,
    pub attempts: u32,
    pub total_delay: Duration,
}

/// Trait for determining whether an error should be retried
pub trait RetryPolicy<E> {
    /// `retry` is the zero-based index of the retry that would follow.
    fn should_retry(&self, error: &E, retry: u32) -> RetryDecision;
}

/// Decision for whether to retry an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry the operation after the backoff delay
    Retry,
    /// Don't retry the operation
    Stop,
}

/// Capped, jitter-free exponential backoff:
/// `min(max_delay, initial_delay * base^retry)`
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffStrategy {
    pub initial_delay: Duration,
    pub base: f64,
    pub max_delay: Duration,
}

impl BackoffStrategy {
    /// Calculate the delay that precedes retry number `retry` (zero-based).
    ///
    /// The delay before attempt *k* (k >= 2) is `calculate_delay(k - 2)`.
    pub fn calculate_delay(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let delay_ms = self.initial_delay.as_millis() as f64 * self.base.powi(exponent);
        let capped_ms = delay_ms.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped_ms as u64)
    }
}

/// Errors raised while building a [`RetryConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryConfigError {
    #[error("Invalid retry configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total number of attempts (initial try + retries)
    pub max_attempts: u32,
    pub backoff: BackoffStrategy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: BackoffStrategy {
                initial_delay: Duration::from_secs(2),
                base: 2.0,
                max_delay: Duration::from_secs(10),
            },
        }
    }
}

impl RetryConfig {
    /// Create a configuration builder
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RetryConfigError> {
        let invalid = |message: &str| {
            Err(RetryConfigError::InvalidConfiguration { message: message.to_string() })
        };

        if self.max_attempts == 0 {
            return invalid("max_attempts must be greater than 0");
        }
        if self.backoff.base <= 0.0 {
            return invalid("exponential base must be greater than 0");
        }
        if self.backoff.max_delay < self.backoff.initial_delay {
            return invalid("max_delay must not be smaller than initial_delay");
        }
        Ok(())
    }
}

/// Builder for RetryConfig with fluent API
#[derive(Debug, Default)]
pub struct RetryConfigBuilder {
    config: RetryConfig,
}

impl RetryConfigBuilder {
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    pub fn exponential_backoff(
        mut self,
        initial_delay: Duration,
        base: f64,
        max_delay: Duration,
    ) -> Self {
        self.config.backoff = BackoffStrategy { initial_delay, base, max_delay };
        self
    }

    pub fn build(self) -> Result<RetryConfig, RetryConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// The main retry executor
#[derive(Debug, Clone)]
pub struct RetryExecutor<P> {
    config: RetryConfig,
    policy: P,
}

impl<P> RetryExecutor<P> {
    /// Create a new retry executor with the given configuration and policy
    pub fn new(config: RetryConfig, policy: P) -> Self {
        Self { config, policy }
    }

    /// The configuration this executor runs with
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute an operation with retry logic and return outcome statistics.
    #[instrument(skip(self, operation), fields(max_attempts = self.config.max_attempts))]
    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> RetryOutcome<T, E>
    where
        P: RetryPolicy<E>,
        E: fmt::Debug,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut total_delay = Duration::ZERO;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!("Executing operation (attempt {}/{})", attempt, max_attempts);

            let error = match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("Operation succeeded after {} retries", attempt - 1);
                    }
                    return RetryOutcome { result: Ok(value), attempts: attempt, total_delay };
                }
                Err(error) => error,
            };

            if self.policy.should_retry(&error, attempt - 1) == RetryDecision::Stop {
                debug!("Retry policy determined not to retry: {:?}", error);
                return RetryOutcome {
                    result: Err(RetryError::NonRetryable { source: error }),
                    attempts: attempt,
                    total_delay,
                };
            }

            if attempt >= max_attempts {
                warn!(
                    "All retry attempts exhausted after {} tries, last error: {:?}",
                    attempt, error
                );
                return RetryOutcome {
                    result: Err(RetryError::AttemptsExhausted { attempts: attempt, source: error }),
                    attempts: attempt,
                    total_delay,
                };
            }

            let delay = self.config.backoff.calculate_delay(attempt - 1);
            warn!("Operation failed (attempt {}), retrying after {:?}", attempt, delay);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            total_delay += delay;
        }
    }
}

/// Pre-defined retry policies
pub mod policies {
    use super::{RetryDecision, RetryPolicy};

    /// Retry whenever `predicate` holds for the error
    #[derive(Debug, Clone)]
    pub struct PredicateRetry<F> {
        predicate: F,
    }

    impl<F> PredicateRetry<F> {
        pub fn new(predicate: F) -> Self {
            Self { predicate }
        }
    }

    impl<F, E> RetryPolicy<E> for PredicateRetry<F>
    where
        F: Fn(&E) -> bool,
    {
        fn should_retry(&self, error: &E, _retry: u32) -> RetryDecision {
            if (self.predicate)(error) {
                RetryDecision::Retry
            } else {
                RetryDecision::Stop
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for backoff calculation, configuration validation and the
    //! executor's attempt accounting.

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::policies::PredicateRetry;
    use super::*;

    fn fast_config(max_attempts: u32) -> RetryConfig {
        RetryConfig::builder()
            .max_attempts(max_attempts)
            .exponential_backoff(Duration::from_millis(1), 2.0, Duration::from_millis(2))
            .build()
            .expect("Should build valid config")
    }

    fn always(_: &&str) -> bool {
        true
    }

    /// Delay before attempt k is min(10s, 2s * 2^(k-2)).
    #[test]
    fn test_default_backoff_schedule_is_capped_exponential() {
        let strategy = RetryConfig::default().backoff;

        assert_eq!(strategy.calculate_delay(0), Duration::from_secs(2));
        assert_eq!(strategy.calculate_delay(1), Duration::from_secs(4));
        assert_eq!(strategy.calculate_delay(2), Duration::from_secs(8));
        assert_eq!(strategy.calculate_delay(3), Duration::from_secs(10));
        assert_eq!(strategy.calculate_delay(40), Duration::from_secs(10));
    }

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();

        assert_eq!(config.max_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_retry_config_validation() {
        assert!(RetryConfig::builder().max_attempts(0).build().is_err());
        assert!(RetryConfig::builder()
            .exponential_backoff(Duration::from_secs(1), 0.0, Duration::from_secs(5))
            .build()
            .is_err());
        assert!(RetryConfig::builder()
            .exponential_backoff(Duration::from_secs(5), 2.0, Duration::from_secs(1))
            .build()
            .is_err());
    }

    #[tokio::test]
    async fn test_retry_executor_succeeds_after_temporary_failures() {
        let executor = RetryExecutor::new(fast_config(3), PredicateRetry::new(always));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = Arc::clone(&counter);

        let outcome = executor
            .execute(|| {
                let c = Arc::clone(&counter_clone);
                async move {
                    let count = c.fetch_add(1, Ordering::SeqCst);
                    if count < 2 {
                        Err("temporary failure")
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.result.expect("Operation should eventually succeed"), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 3, "Should have tried 3 times");
    }

    #[tokio::test]
    async fn test_retry_executor_exhausts_attempts_and_returns_last_error() {
        let executor =
            RetryExecutor::new(fast_config(3), PredicateRetry::new(|_: &String| true));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = Arc::clone(&counter);

        let outcome = executor
            .execute(|| {
                let c = Arc::clone(&counter_clone);
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst) + 1;
                    Err::<(), _>(format!("failure #{n}"))
                }
            })
            .await;

        match outcome.result {
            Err(RetryError::AttemptsExhausted { attempts, source }) => {
                assert_eq!(attempts, 3);
                assert_eq!(source, "failure #3");
            }
            other => panic!("Expected AttemptsExhausted error, got {other:?}"),
        }
        assert_eq!(counter.load(Ordering::SeqCst), 3, "Should have tried exactly 3 times");
    }

    #[tokio::test]
    async fn test_predicate_policy_stops_on_permanent_error() {
        let policy = PredicateRetry::new(|err: &&str| *err == "transient");
        let executor = RetryExecutor::new(fast_config(3), policy);
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = Arc::clone(&counter);

        let outcome = executor
            .execute(|| {
                let c = Arc::clone(&counter_clone);
                async move {
                    let count = c.fetch_add(1, Ordering::SeqCst);
                    if count == 0 {
                        Err::<(), _>("transient")
                    } else {
                        Err("permanent")
                    }
                }
            })
            .await;

        match outcome.result {
            Err(RetryError::NonRetryable { source }) => assert_eq!(source, "permanent"),
            other => panic!("Expected NonRetryable error, got {other:?}"),
        }
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    /// With paused time the real default schedule can be asserted: two
    /// retries wait 2s then 4s.
    #[tokio::test(start_paused = true)]
    async fn test_outcome_records_default_schedule_delays() {
        let executor = RetryExecutor::new(RetryConfig::default(), PredicateRetry::new(always));

        let outcome = executor.execute(|| async { Err::<(), _>("down") }).await;

        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.total_delay, Duration::from_secs(6));
        assert!(outcome.result.is_err());
    }
}
