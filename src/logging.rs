//! File logging
//!
//! The terminal belongs to the UI, so log output goes to a file. The level
//! is taken from `RUST_LOG` when set.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "tripplan=info";

/// Log file name inside the data directory
const LOG_FILE_NAME: &str = "tripplan.log";

/// Errors raised while setting up logging
#[derive(Debug, Error)]
pub enum LoggingError {
    /// No home directory to derive a default log location from
    #[error("Could not determine a data directory for the log file")]
    NoDataDir,

    /// The log file could not be opened
    #[error("Failed to open log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed
    #[error("Failed to install log subscriber: {0}")]
    Subscriber(String),
}

/// Default log location, e.g. `~/.local/share/tripplan/tripplan.log` on Linux
pub fn default_log_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "tripplan")?;
    Some(project_dirs.data_local_dir().join(LOG_FILE_NAME))
}

/// Opens a log file for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let io_error = |source| LoggingError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)
}

/// Installs the global subscriber writing to `path` (or the default location)
///
/// # Returns
/// The path logs are written to
pub fn init(path: Option<&Path>) -> Result<PathBuf, LoggingError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_log_path().ok_or(LoggingError::NoDataDir)?,
    };
    let file = open_log_file(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))?;

    Ok(path)
}
