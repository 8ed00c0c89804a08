use ratatui::style::Color;
use ratatui::symbols::border;
use thiserror::Error;

use crate::speed::SpeedRamp;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 24;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 18;

/// Segments in a freshly spawned snake.
pub const DEFAULT_INITIAL_LENGTH: usize = 4;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Interval reduction per speed level in milliseconds.
pub const DEFAULT_TICK_STEP_MS: u64 = 10;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Score needed per speed level increase.
pub const POINTS_PER_SPEED_LEVEL: u32 = 5;

/// Upper bound for the render loop's input wait.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Terminal columns drawn per logical cell.
pub const CELL_WIDTH: u16 = 2;

/// Rows reserved under the play field for the HUD.
pub const HUD_HEIGHT: u16 = 2;

/// Rejected engine parameters.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("initial snake of {length} cells does not fit a grid {width} cells wide")]
    SnakeTooLong { length: usize, width: u16 },
    #[error("minimum interval {min_ms}ms exceeds initial interval {initial_ms}ms")]
    FloorAboveInitial { min_ms: u64, initial_ms: u64 },
    #[error("initial interval must be greater than zero")]
    ZeroInterval,
    #[error("points per speed level must be at least 1")]
    ZeroPointsPerLevel,
}

/// Validated parameters for one engine instance.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    grid: GridSize,
    initial_length: usize,
    speed: SpeedRamp,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            initial_length: DEFAULT_INITIAL_LENGTH,
            speed: SpeedRamp::default(),
        }
    }
}

impl GameConfig {
    /// Builds a config, checking that the starting layout fits the grid.
    ///
    /// The snake spawns at the grid centre heading right with its body
    /// trailing left, so it needs `width / 2 + 1` columns at most.
    pub fn new(
        grid: GridSize,
        initial_length: usize,
        speed: SpeedRamp,
    ) -> Result<Self, ConfigError> {
        if grid.width == 0 || grid.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: grid.width,
                height: grid.height,
            });
        }
        if initial_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if initial_length > usize::from(grid.width / 2) + 1 {
            return Err(ConfigError::SnakeTooLong {
                length: initial_length,
                width: grid.width,
            });
        }
        speed.validate()?;

        Ok(Self {
            grid,
            initial_length,
            speed,
        })
    }

    /// Default speed and length on a custom grid.
    pub fn with_grid(width: u16, height: u16) -> Result<Self, ConfigError> {
        Self::new(
            GridSize { width, height },
            DEFAULT_INITIAL_LENGTH,
            SpeedRamp::default(),
        )
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn initial_length(&self) -> usize {
        self.initial_length
    }

    #[must_use]
    pub fn speed(&self) -> SpeedRamp {
        self.speed
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub border: Color,
    pub ui_text: Color,
    pub ui_accent: Color,
    pub ui_muted: Color,
    pub menu_title: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    border: Color::Gray,
    ui_text: Color::White,
    ui_accent: Color::Yellow,
    ui_muted: Color::DarkGray,
    menu_title: Color::Green,
};

pub const BORDER_SET: border::Set = border::ROUNDED;

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀■";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "■▶";
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_TAIL: &str = "▓▓";
pub const GLYPH_FOOD: &str = "●●";

/// HUD column separator.
pub const GLYPH_SEPARATOR: &str = "│";
