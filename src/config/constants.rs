//! Configuration constants.
//!
//! This module defines the defaults used throughout the application: export
//! locations, partition settings, and chat API parameters.

/// Environment variable holding the database connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable overriding the output directory.
pub const OUTPUT_DIR_ENV: &str = "GEO_EXPORT_OUTPUT_DIR";

/// Environment variable holding the chat API key.
pub const CHAT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default directory export documents are written to.
///
/// This is where the front-end serves its static data files from.
pub const DEFAULT_OUTPUT_DIR: &str = "public/data";

/// Column each exported table is partitioned by.
pub const DEFAULT_PARTITION_COLUMN: &str = "year";

/// Partition value used when a table has no rows.
pub const DEFAULT_FALLBACK_YEAR: i64 = 2024;

/// Connection string schemes accepted by the `Any` driver.
pub const SUPPORTED_DATABASE_SCHEMES: &[&str] = &["postgres://", "postgresql://", "sqlite:"];

/// Base URL of the chat-completions API.
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat model used when none is specified (fast, low-cost).
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Per-request timeout for chat completions, in seconds.
pub const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 60;

/// User-Agent sent with chat API requests.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
