//! Report generation, polling and download

pub mod ports;
pub mod service;

pub use service::{PollEnd, PollOutcome, PollPolicy, ReportOrchestrator};
