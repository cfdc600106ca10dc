use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Sends logs to `path`. The TUI owns the terminal, so nothing may reach
/// stdout or stderr while it runs.
pub fn init_file_logging(level: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log dir at {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file at {}", path.display()))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    ignore_already_set(init_result)
}

/// Headless commands log to stderr.
pub fn init_stderr_logging(level: &str) -> Result<()> {
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    ignore_already_set(init_result)
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn ignore_already_set(
    result: std::result::Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>,
) -> Result<()> {
    if let Err(err) = result {
        let msg = err.to_string();
        if msg.contains("global default trace dispatcher has already been set") {
            return Ok(());
        }
        return Err(anyhow::anyhow!(msg));
    }
    Ok(())
}
