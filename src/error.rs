use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::settings::SettingsError;

/// Top-level failure surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
}
