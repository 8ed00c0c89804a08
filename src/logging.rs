use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "grid_snake=info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to install log subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the level filter from `RUST_LOG`, falling back to `grid_snake=info`.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Routes tracing output to `path`, appending to any existing log.
///
/// Stdout belongs to the alternate screen while the game runs, so log
/// lines only ever go to a file.
pub fn init_file_logging(path: &Path) -> Result<(), LoggingError> {
    let file = open_log_file(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(env_filter())
        .try_init()?;

    Ok(())
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })
}
