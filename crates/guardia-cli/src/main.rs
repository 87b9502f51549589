//! Guardia - command line importer for duty schedules and unit reports.
//!
//! Reads a dispatcher document, rebuilds the schedule or unit report with
//! `guardia-core` and prints it as JSON.

mod args;
mod config;

use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use guardia_core::{import_schedule, import_unit_report, ImportError, Imported};

use args::{Cli, Command};
use config::Config;

// ============================================================================
// Constants
// ============================================================================

/// Log file written inside the configured log directory
const LOG_FILE: &str = "guardia.log";

/// Initialize the tracing subscriber for logging.
///
/// Returns the guard of the file writer when a log directory is configured;
/// it must live until exit so buffered lines are flushed.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = Config::load().context("Failed to load config")?;
    let _log_guard = init_tracing(config.log_dir.as_deref());

    let file = cli.command.file();
    info!(file = %file.display(), "guardia starting");

    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let filename = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let recognized = match &cli.command {
        Command::Schedule { .. } => {
            let imported = import_schedule(&bytes, filename).map_err(user_error)?;
            if let Some(schedule) = &imported.value {
                eprintln!(
                    "{}: {} officers, {} services, {} sports events, {} assignments",
                    imported.format,
                    schedule.command_staff.len(),
                    schedule.services.len(),
                    schedule.sports_events.len(),
                    schedule.assignment_count()
                );
            }
            emit(&imported, &cli, &config).await?
        }
        Command::Units { .. } => {
            let imported = import_unit_report(&bytes, filename).map_err(user_error)?;
            if let Some(report) = &imported.value {
                eprintln!("{}: {} units", report.station_name, report.units.len());
            }
            emit(&imported, &cli, &config).await?
        }
    };

    if !recognized {
        bail!("{}: format not recognized", filename);
    }

    let absolute = tokio::fs::canonicalize(file)
        .await
        .unwrap_or_else(|_| file.to_path_buf());
    config.remember_import(&absolute);
    if let Err(e) = config.save() {
        warn!(error = %e, "Could not save config");
    }
    Ok(())
}

/// Keep the user-facing message on top of the underlying error
fn user_error(err: ImportError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

/// List diagnostics on stderr and write the value as JSON. Returns whether
/// the document was recognized.
async fn emit<T: Serialize>(imported: &Imported<T>, cli: &Cli, config: &Config) -> Result<bool> {
    for diagnostic in imported.diagnostics.iter() {
        eprintln!("  {}", diagnostic);
    }

    let Some(value) = &imported.value else {
        return Ok(false);
    };

    let json = if config.pretty_json && !cli.compact {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match &cli.output {
        Some(path) => tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(true)
}
