//! Console utilities

pub mod logging;
