//! Command-line interface definition.
//!
//! The binary parses these types and converts them into the library-level
//! [`ExportConfig`] and [`ChatConfig`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    CHAT_API_KEY_ENV, DATABASE_URL_ENV, DEFAULT_CHAT_BASE_URL, DEFAULT_CHAT_MODEL,
    DEFAULT_CHAT_TIMEOUT_SECS, DEFAULT_FALLBACK_YEAR, DEFAULT_OUTPUT_DIR,
    DEFAULT_PARTITION_COLUMN, OUTPUT_DIR_ENV,
};
use crate::config::types::{ChatConfig, ExportConfig, LogFormat, LogLevel};
use crate::export::ExportTarget;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "geo_export",
    version,
    about = "Exports the latest census-geography and lender tables to JSON"
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export the most recent year of each table to JSON files
    Export(ExportArgs),
    /// Start an interactive chat session
    Chat(ChatArgs),
}

/// Arguments for `geo_export export`.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Database connection string
    #[arg(long, env = DATABASE_URL_ENV, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Directory the JSON files are written to (created if absent)
    #[arg(long, env = OUTPUT_DIR_ENV, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Year used when a table is empty
    #[arg(long, default_value_t = DEFAULT_FALLBACK_YEAR)]
    pub fallback_year: i64,

    /// Column the tables are partitioned by
    #[arg(long, default_value = DEFAULT_PARTITION_COLUMN)]
    pub partition_column: String,

    /// Only run these exports (repeatable or comma-separated); default: all
    #[arg(long, value_enum, value_delimiter = ',')]
    pub only: Vec<ExportTarget>,
}

impl From<ExportArgs> for ExportConfig {
    fn from(args: ExportArgs) -> Self {
        let defaults = ExportConfig::default();
        Self {
            database_url: args.database_url,
            output_dir: args.output_dir,
            fallback_year: args.fallback_year,
            partition_column: args.partition_column,
            targets: if args.only.is_empty() {
                defaults.targets
            } else {
                args.only
            },
        }
    }
}

/// Arguments for `geo_export chat`.
#[derive(Debug, Args)]
pub struct ChatArgs {
    /// API key (prompted for when not set)
    #[arg(long, env = CHAT_API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model to chat with
    #[arg(long, default_value = DEFAULT_CHAT_MODEL)]
    pub model: String,

    /// Base URL of the chat-completions API
    #[arg(long, default_value = DEFAULT_CHAT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_CHAT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        Self {
            api_key: args.api_key,
            model: args.model,
            base_url: args.base_url,
            timeout_seconds: args.timeout_seconds,
        }
    }
}
