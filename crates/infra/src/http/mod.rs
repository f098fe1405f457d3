//! HTTP transport for the remote platform

pub mod client;

pub use client::{HttpTransport, HttpTransportBuilder};
