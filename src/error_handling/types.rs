//! Error type definitions.
//!
//! This module defines the error types used throughout the application, one
//! enum per concern: initialization, table export, and the chat client.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for table exports.
///
/// None of these are recovered locally: each one aborts the current export
/// and is surfaced to the caller as-is.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Missing or invalid configuration (connection string, identifiers).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The database could not be reached or the connection was lost.
    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// A query against `table` failed (malformed SQL, missing table, type mismatch).
    #[error("Query error on table '{table}': {source}")]
    Query {
        /// Table the failing query targeted
        table: String,
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// The output document could not be written.
    #[error("Failed to write {}: {}", .path.display(), .source)]
    Io {
        /// Destination path of the write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The export document could not be serialized.
    #[error("Failed to serialize export document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ExportError {
    /// Maps a driver error raised while querying `table`.
    ///
    /// Transport-level failures (I/O, TLS, pool exhaustion) are reported as
    /// connection errors; everything else is a query error.
    pub fn from_query(table: &str, err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => ExportError::Connection(err),
            other => ExportError::Query {
                table: table.to_string(),
                source: other,
            },
        }
    }

    /// Builds an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Error types for the chat client.
#[derive(Error, Debug)]
pub enum ChatError {
    /// No API key was configured or entered.
    #[error("No API key provided")]
    MissingApiKey,

    /// The HTTP request failed before a response was received.
    #[error("Chat request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The API answered with a non-success status.
    #[error("Chat API returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the API
        body: String,
    },

    /// The API answered without any completion text.
    #[error("Chat API returned no completion")]
    EmptyResponse,

    /// Reading user input or writing replies failed.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
