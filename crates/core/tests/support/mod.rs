//! Shared test helpers for `adops-core` integration tests.
//!
//! In-memory implementations of the core ports that record every call so
//! tests can assert on call counts and request bodies.

#![allow(dead_code)]

pub mod platform;
pub mod reports;

use adops_domain::Session;

pub fn session() -> Session {
    Session::new("ops@example.com", "test-token")
}
