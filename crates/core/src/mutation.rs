//! Bounded retry around a single mutating remote call
//!
//! The mutator knows nothing about what the call does. It runs the closure,
//! retries transport failures with capped exponential backoff and hands back
//! the last error once the budget is spent.

use std::future::Future;
use std::time::Duration;

use adops_common::resilience::policies::PredicateRetry;
use adops_common::{RetryConfig, RetryError, RetryExecutor};
use adops_domain::{AdOpsError, Result, RetrySettings};
use tracing::{debug, warn};

type RetryablePredicate = fn(&AdOpsError) -> bool;

/// Retry wrapper shared by every updater
#[derive(Debug, Clone)]
pub struct RetryingMutator {
    executor: RetryExecutor<PredicateRetry<RetryablePredicate>>,
}

impl RetryingMutator {
    pub fn new(config: RetryConfig) -> Self {
        let predicate: RetryablePredicate = AdOpsError::is_retryable;
        Self { executor: RetryExecutor::new(config, PredicateRetry::new(predicate)) }
    }

    /// Build from configuration: doubling delays starting at `base_delay_ms`,
    /// capped at `max_delay_ms`, jitter-free.
    pub fn from_settings(settings: &RetrySettings) -> Result<Self> {
        let config = RetryConfig::builder()
            .max_attempts(settings.max_attempts)
            .exponential_backoff(
                Duration::from_millis(settings.base_delay_ms),
                2.0,
                Duration::from_millis(settings.max_delay_ms),
            )
            .build()
            .map_err(|e| AdOpsError::Config(e.to_string()))?;
        Ok(Self::new(config))
    }

    pub fn max_attempts(&self) -> u32 {
        self.executor.config().max_attempts
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error, or
    /// the attempt budget is exhausted.
    pub async fn run<F, Fut, T>(&self, operation: &str, call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let outcome = self.executor.execute(call).await;
        match outcome.result {
            Ok(value) => {
                if outcome.attempts > 1 {
                    debug!(operation, attempts = outcome.attempts, "Mutation succeeded after retry");
                }
                Ok(value)
            }
            Err(RetryError::AttemptsExhausted { attempts, source }) => {
                warn!(
                    operation,
                    attempts,
                    total_delay_ms = outcome.total_delay.as_millis() as u64,
                    error = %source,
                    "Mutation failed after exhausting retries"
                );
                Err(source)
            }
            Err(RetryError::NonRetryable { source }) => {
                warn!(operation, error_kind = source.label(), error = %source, "Mutation failed");
                Err(source)
            }
        }
    }
}

impl Default for RetryingMutator {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}
