use std::time::Duration;

use tracing::debug;

use crate::game::{Game, GameStatus};
use crate::input::GameInput;

/// Applies one input event to the game according to the UI policy.
///
/// `Quit` is left to the caller. Focus loss pauses a running game only
/// when `auto_pause` is set, and never resumes one.
pub fn handle_input(game: &mut Game, input: GameInput, auto_pause: bool) {
    match (input, game.status()) {
        (GameInput::Direction(direction), _) => game.enqueue_direction(direction),
        (GameInput::Confirm, GameStatus::Idle) => game.start(),
        (GameInput::Confirm, GameStatus::Terminal) => game.restart(),
        (GameInput::Pause, _) => game.pause(),
        (GameInput::Restart, _) => game.restart(),
        (GameInput::FocusLost, GameStatus::Running) if auto_pause => {
            debug!("focus lost, pausing");
            game.pause();
        }
        _ => {}
    }
}

/// How long the runtime may block waiting for input.
///
/// While running, the wait ends at the next tick or frame, whichever is
/// sooner. Otherwise no tick is due and the loop waits a whole frame.
#[must_use]
pub fn poll_timeout(
    status: GameStatus,
    tick_interval: Duration,
    since_last_tick: Duration,
    frame_interval: Duration,
) -> Duration {
    if status != GameStatus::Running {
        return frame_interval;
    }

    tick_interval
        .saturating_sub(since_last_tick)
        .min(frame_interval)
}
