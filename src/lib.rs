//! geo_export library: exports the latest census-geography and lender tables
//!
//! Each export finds the most recent `year` present in a table, selects the
//! distinct rows for that year, and writes them to a JSON document with
//! provenance metadata for the front-end to load. A small chat client for a
//! hosted chat-completions API ships alongside.
//!
//! # Example
//!
//! ```no_run
//! use geo_export::{run_exports, ExportConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExportConfig {
//!     database_url: Some("postgres://localhost/census".to_string()),
//!     ..Default::default()
//! };
//!
//! let report = run_exports(config).await?;
//! for export in &report.exports {
//!     println!("{}: {} rows", export.target, export.record_count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod chat;
pub mod config;
mod error_handling;
pub mod export;
pub mod initialization;
mod storage;

// Re-export public API
pub use config::{ChatConfig, ExportConfig, LogFormat, LogLevel};
pub use error_handling::{ChatError, ExportError, InitializationError};
pub use run::{run_chat, run_exports, ExportReport};
pub use storage::{connect, with_connection, DbPool};

// Internal run module (sequences a whole export or chat run)
mod run {
    use anyhow::{Context, Result};
    use std::path::PathBuf;
    use std::time::Instant;

    use log::info;
    use tokio::io::{stdin, stdout, BufReader};

    use crate::chat::{prompt_api_key, run_session, ChatClient};
    use crate::config::{ChatConfig, ExportConfig};
    use crate::error_handling::ExportError;
    use crate::export::{ExportSummary, TabularExporter};
    use crate::storage::with_connection;

    /// Results of an export run.
    #[derive(Debug, Clone)]
    pub struct ExportReport {
        /// One summary per export, in the order they ran
        pub exports: Vec<ExportSummary>,
        /// Directory the documents were written to
        pub output_dir: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the configured exports over a single database connection.
    ///
    /// The output directory is created if absent. Exports run sequentially in
    /// `config.targets` order; the first failure aborts the run. The
    /// connection is closed before this function returns, whether the run
    /// succeeded or not.
    ///
    /// # Errors
    ///
    /// Fails on a missing/invalid database URL, an unreachable database, a
    /// failing query, or an unwritable output directory. The underlying
    /// [`ExportError`] is preserved in the error chain.
    pub async fn run_exports(config: ExportConfig) -> Result<ExportReport> {
        let start = Instant::now();
        let database_url = config.database_url()?.to_string();

        std::fs::create_dir_all(&config.output_dir)
            .map_err(|e| ExportError::io(&config.output_dir, e))?;
        info!("Saving to: {}", config.output_dir.display());

        let settings = &config;
        let exports = with_connection(&database_url, |pool| async move {
            let exporter = TabularExporter::new(&pool, &settings.output_dir)
                .with_partition_column(&settings.partition_column);

            let mut exports = Vec::with_capacity(settings.targets.len());
            for target in &settings.targets {
                let summary = target
                    .run(&exporter, settings.fallback_year)
                    .await
                    .with_context(|| format!("Export {target} failed"))?;
                exports.push(summary);
            }
            Ok::<_, anyhow::Error>(exports)
        })
        .await?;

        Ok(ExportReport {
            exports,
            output_dir: config.output_dir,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }

    /// Runs an interactive chat session on stdin/stdout.
    ///
    /// Prompts for the API key when `config.api_key` is not set. Returns the
    /// number of answered turns.
    pub async fn run_chat(config: ChatConfig) -> Result<usize> {
        let mut input = BufReader::new(stdin());
        let mut output = stdout();

        let api_key = match config.api_key.clone().filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None => prompt_api_key(&mut input, &mut output).await?,
        };

        let client =
            ChatClient::new(&config, api_key).context("Failed to initialize chat client")?;
        info!("Chatting with {}", client.model());

        let turns = run_session(&client, &mut input, &mut output).await?;
        Ok(turns)
    }
}
