use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, GameConfig, GridSize, DEFAULT_INITIAL_LENGTH};
use crate::speed::SpeedRamp;

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Failures while reading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk settings; every field is optional.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub initial_length: Option<usize>,
    pub initial_interval_ms: Option<u64>,
    pub interval_step_ms: Option<u64>,
    pub min_interval_ms: Option<u64>,
    pub points_per_level: Option<u32>,
    pub seed: Option<u64>,
    pub auto_pause: Option<bool>,
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Overrides {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub initial_length: Option<usize>,
    pub initial_interval_ms: Option<u64>,
    pub seed: Option<u64>,
    pub no_auto_pause: bool,
}

/// Fully merged runtime settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Settings {
    pub game: GameConfig,
    pub seed: Option<u64>,
    pub auto_pause: bool,
}

/// Returns the platform-correct default settings path.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}

/// Loads the settings file.
///
/// An explicit path must exist. Without one, the default location is tried
/// and a missing file there yields empty settings.
pub fn load_settings_file(explicit: Option<&Path>) -> Result<SettingsFile, SettingsError> {
    match explicit {
        Some(path) => read_settings_file(path),
        None => match default_settings_path() {
            Some(path) if path.exists() => read_settings_file(&path),
            _ => Ok(SettingsFile::default()),
        },
    }
}

fn read_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = serde_json::from_str::<SettingsFile>(&raw).map_err(|source| {
        SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    debug!(path = %path.display(), "settings file loaded");
    Ok(parsed)
}

/// Merges defaults, file values and overrides, then validates the result.
pub fn resolve(file: &SettingsFile, overrides: &Overrides) -> Result<Settings, ConfigError> {
    let defaults = GameConfig::default();
    let default_speed = SpeedRamp::default();

    let grid = GridSize {
        width: overrides
            .width
            .or(file.width)
            .unwrap_or(defaults.grid().width),
        height: overrides
            .height
            .or(file.height)
            .unwrap_or(defaults.grid().height),
    };
    let initial_length = overrides
        .initial_length
        .or(file.initial_length)
        .unwrap_or(DEFAULT_INITIAL_LENGTH);
    let speed = SpeedRamp {
        initial_ms: overrides
            .initial_interval_ms
            .or(file.initial_interval_ms)
            .unwrap_or(default_speed.initial_ms),
        step_ms: file.interval_step_ms.unwrap_or(default_speed.step_ms),
        min_ms: file.min_interval_ms.unwrap_or(default_speed.min_ms),
        points_per_level: file
            .points_per_level
            .unwrap_or(default_speed.points_per_level),
    };

    Ok(Settings {
        game: GameConfig::new(grid, initial_length, speed)?,
        seed: overrides.seed.or(file.seed),
        auto_pause: !overrides.no_auto_pause && file.auto_pause.unwrap_or(true),
    })
}
