//! Configuration types.
//!
//! This module defines the enums and structs shared by the CLI and the
//! library entry points. Library configs can be built programmatically
//! without going through clap.

use std::path::PathBuf;

use clap::ValueEnum;
use strum::IntoEnumIterator;

use crate::config::constants::{
    DEFAULT_CHAT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_CHAT_TIMEOUT_SECS, DEFAULT_FALLBACK_YEAR,
    DEFAULT_OUTPUT_DIR, DEFAULT_PARTITION_COLUMN, SUPPORTED_DATABASE_SCHEMES,
};
use crate::error_handling::ExportError;
use crate::export::ExportTarget;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Configuration for an export run.
///
/// # Examples
///
/// ```no_run
/// use geo_export::ExportConfig;
///
/// let config = ExportConfig {
///     database_url: Some("postgres://localhost/census".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Database connection string (`postgres://…` or `sqlite:…`)
    pub database_url: Option<String>,

    /// Directory the JSON documents are written to
    pub output_dir: PathBuf,

    /// Partition value used when a table is empty
    pub fallback_year: i64,

    /// Column each table is partitioned by
    pub partition_column: String,

    /// Exports to run, in order
    pub targets: Vec<ExportTarget>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            fallback_year: DEFAULT_FALLBACK_YEAR,
            partition_column: DEFAULT_PARTITION_COLUMN.to_string(),
            targets: ExportTarget::iter().collect(),
        }
    }
}

impl ExportConfig {
    /// Returns the connection string, rejecting missing or unsupported values.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Configuration` if the URL is unset, blank, or uses
    /// a scheme the `Any` driver cannot open.
    pub fn database_url(&self) -> Result<&str, ExportError> {
        let url = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                ExportError::Configuration(
                    "DATABASE_URL is not set (use --database-url or a .env file)".to_string(),
                )
            })?;

        if !SUPPORTED_DATABASE_SCHEMES
            .iter()
            .any(|scheme| url.starts_with(scheme))
        {
            // Never echo the URL itself: it usually carries a password.
            return Err(ExportError::Configuration(format!(
                "unsupported database URL scheme (expected one of: {})",
                SUPPORTED_DATABASE_SCHEMES.join(", ")
            )));
        }

        Ok(url)
    }
}

/// Configuration for the interactive chat client.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// API key; prompted for interactively when `None`
    pub api_key: Option<String>,

    /// Model name sent with each request
    pub model: String,

    /// Base URL of the chat-completions API
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_CHAT_MODEL.to_string(),
            base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_CHAT_TIMEOUT_SECS,
        }
    }
}
