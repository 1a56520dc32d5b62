//! # msprobe Utilities
//!
//! Shared utilities and logging for msprobe.
//!
//! This crate provides the logging setup used by the `msprobe` binary,
//! built on `tracing`.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{format_from_env, init_logging, init_logging_with, LogFormat, LogLevel, LoggingError, LoggingGuard};
pub use tracing::{debug, error, info, trace, warn};
