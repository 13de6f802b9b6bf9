//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geo_export` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use geo_export::config::{Cli, Command};
use geo_export::initialization::init_logger_with;
use geo_export::{run_chat, run_exports, ChatConfig, ExportConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), so
    // DATABASE_URL never has to live in source or shell history. Values
    // already set in the environment win.
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.into(), cli.log_format)
        .context("Failed to initialize logger")?;

    match cli.command {
        Command::Export(args) => {
            let config = ExportConfig::from(args);
            match run_exports(config).await {
                Ok(report) => {
                    println!("\nExport complete!");
                    for export in &report.exports {
                        println!(
                            "  {} ({} {}): {} row{} → {}",
                            export.target,
                            export.table,
                            export.most_recent_year,
                            export.record_count,
                            if export.record_count == 1 { "" } else { "s" },
                            export.path.display()
                        );
                    }
                    println!(
                        "Saved {} file{} to {} in {:.1}s",
                        report.exports.len(),
                        if report.exports.len() == 1 { "" } else { "s" },
                        report.output_dir.display(),
                        report.elapsed_seconds
                    );
                    Ok(())
                }
                Err(e) => {
                    eprintln!("geo_export error: {:#}", e);
                    process::exit(1);
                }
            }
        }
        Command::Chat(args) => match run_chat(ChatConfig::from(args)).await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("geo_export error: {:#}", e);
                process::exit(1);
            }
        },
    }
}
