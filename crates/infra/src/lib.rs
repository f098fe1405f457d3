//! # AdOps Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP transport and the typed platform API client
//! - Filesystem artifact storage
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `adops-core`
//! - Depends on `adops-domain` and `adops-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::AdPlatformClient;
pub use errors::InfraError;
pub use http::{HttpTransport, HttpTransportBuilder};
pub use storage::FsArtifactStore;
