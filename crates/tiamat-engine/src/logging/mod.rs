//! Logging utilities.
//!
//! Centralizes logger initialization. The engine logs through the standard
//! `log` facade everywhere; only this module knows about the backend.

mod init;

pub use init::{init_logging, LoggingConfig};
