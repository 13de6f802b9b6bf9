//! Error handling.
//!
//! Error types are split by concern:
//! - **Initialization**: logger and HTTP client setup
//! - **Export**: configuration, connection, query and write failures
//! - **Chat**: API key, transport and API failures

mod types;

// Re-export public API
pub use types::{ChatError, ExportError, InitializationError};
