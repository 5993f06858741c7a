//! Tracing setup for hosts embedding the explorer.
//!
//! A host that owns the terminal logs to a file; command-line hosts and tests
//! log to stderr. Verbosity follows `RUST_LOG` and defaults to `info`.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_DIR: &str = "iyp-explorer";
const LOG_FILE: &str = "iyp-explorer.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs to the default file location, see [`get_log_path`].
///
/// Failure to open the file is reported on stderr and leaves logging off.
pub fn init_file_logging() {
    let log_path = get_log_path();
    if let Err(e) = init_file_logging_at(&log_path) {
        eprintln!("Warning: Could not open log file {}: {e}", log_path.display());
    }
}

/// Logs to `path`, creating parent directories and truncating the file.
///
/// A subscriber installed earlier in the process stays in place.
pub fn init_file_logging_at(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = File::create(path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Logs to stderr.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .try_init();
}

/// Default log file: the XDG state dir on Linux, the config dir elsewhere,
/// the temp dir as a last resort.
pub fn get_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::config_dir)
        .map(|dir| dir.join(LOG_DIR).join(LOG_FILE))
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE))
}
