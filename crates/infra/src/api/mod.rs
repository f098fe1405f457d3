//! Remote platform API client

pub mod client;
pub mod wire;

pub use client::AdPlatformClient;
