use std::time::Duration;

use crate::config::{
    ConfigError, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TICK_STEP_MS, MIN_TICK_INTERVAL_MS,
    POINTS_PER_SPEED_LEVEL,
};

/// Score-driven tick interval schedule.
///
/// Every `points_per_level` points the interval shrinks by `step_ms`, never
/// going below `min_ms`. The interval depends on the score alone.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpeedRamp {
    pub initial_ms: u64,
    pub step_ms: u64,
    pub min_ms: u64,
    pub points_per_level: u32,
}

impl Default for SpeedRamp {
    fn default() -> Self {
        Self {
            initial_ms: DEFAULT_TICK_INTERVAL_MS,
            step_ms: DEFAULT_TICK_STEP_MS,
            min_ms: MIN_TICK_INTERVAL_MS,
            points_per_level: POINTS_PER_SPEED_LEVEL,
        }
    }
}

impl SpeedRamp {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.min_ms > self.initial_ms {
            return Err(ConfigError::FloorAboveInitial {
                min_ms: self.min_ms,
                initial_ms: self.initial_ms,
            });
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::ZeroPointsPerLevel);
        }
        Ok(())
    }

    /// Speed level for `score`, starting at 1.
    #[must_use]
    pub fn level_for_score(&self, score: u32) -> u32 {
        1 + score / self.points_per_level.max(1)
    }

    /// Tick interval for `score`.
    #[must_use]
    pub fn interval_for_score(&self, score: u32) -> Duration {
        let penalty_ms =
            u64::from(self.level_for_score(score) - 1).saturating_mul(self.step_ms);
        let clamped_ms = self
            .initial_ms
            .saturating_sub(penalty_ms)
            .max(self.min_ms);
        Duration::from_millis(clamped_ms)
    }
}
