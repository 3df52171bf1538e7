//! # diegraph Utilities
//!
//! Shared utilities, logging and configuration for diegraph.
//!
//! This crate provides common functionality used across the diegraph
//! workspace, chiefly the `tracing` subscriber setup used by the binaries.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{init_logging, init_logging_with_level, LogConfig, LogFormat, LogLevel, LoggingError, LoggingGuard};
pub use tracing::{debug, error, info, trace, warn};
