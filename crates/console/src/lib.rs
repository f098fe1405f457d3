//! # AdOps Console
//!
//! Operator-facing layer: argument parsing, input validation, session
//! handling and wiring of infrastructure into the core services.

pub mod cli;
pub mod commands;
pub mod context;
pub mod input;
pub mod utils;

pub use context::AppContext;
