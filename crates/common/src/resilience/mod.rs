//! Resilience patterns for fault tolerance and error handling
//!
//! This module provides **generic, reusable** resilience patterns:
//! - **Retry Logic**: bounded attempts with capped exponential backoff,
//!   driven by a pluggable [`RetryPolicy`]
//!
//! The implementations are generic over the operation's error type and carry
//! no knowledge of the remote API. Domain crates decide which of their errors
//! are transient by implementing [`RetryPolicy`] or by using
//! [`policies::PredicateRetry`].

pub mod retry;

// Re-export retry types
pub use retry::{
    policies, BackoffStrategy, RetryConfig, RetryConfigBuilder, RetryConfigError, RetryDecision,
    RetryError, RetryExecutor, RetryOutcome, RetryPolicy, RetryResult,
};
