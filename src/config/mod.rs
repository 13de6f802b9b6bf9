//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, environment variable names)
//! - Library configuration types
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{ChatArgs, Cli, Command, ExportArgs};
pub use constants::*;
pub use types::{ChatConfig, ExportConfig, LogFormat, LogLevel};
