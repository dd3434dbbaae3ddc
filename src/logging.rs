//! tracing subscriber setup
//!
//! The TUI owns the terminal, so it logs to a file. CLI commands log to stderr.
//! `RUST_LOG` takes precedence over the configured filter in both modes.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Log to stderr in compact form; `verbose` raises the crate to debug
///
/// Keeps an already installed subscriber.
pub fn init_cli_logger(verbose: bool, filter: &str) {
    let filter = if verbose {
        env_filter("starcatalog=debug")
    } else {
        env_filter(filter)
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

/// Append logs to `path`, creating its directory if needed
pub fn init_file_logger(path: &Path, filter: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}
