use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LECTURE_TUI_LOG";
const LOG_FILE: &str = "lecture-tui.log";

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("lecture-tui").join(LOG_FILE))
}

/// Routes `tracing` output to a log file; the terminal belongs to the UI.
/// The filter comes from `LECTURE_TUI_LOG` and defaults to `info`.
pub fn init(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path
        .or_else(default_log_path)
        .context("logging: unable to determine log path")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("logging: create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("logging: open {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!("logging: {err}"))?;
    Ok(path)
}

/// Console variant for the non-interactive commands, which write diagnostics
/// to stderr. Defaults to `warn`.
pub fn init_stderr() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("logging: {err}"))
}
