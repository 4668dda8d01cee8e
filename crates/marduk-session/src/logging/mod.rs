//! Logging utilities.
//!
//! Centralizes logger initialization on top of the `log` facade with
//! `env_logger` as the backend.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
