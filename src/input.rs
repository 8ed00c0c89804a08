use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit vector for one step in this direction; `y` grows downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Restart,
    Quit,
    Confirm,
    FocusLost,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps a raw terminal event onto a game input, if it has one.
#[must_use]
pub fn map_event(event: &Event) -> Option<GameInput> {
    match event {
        Event::Key(key) => map_key(*key),
        Event::FocusLost => Some(GameInput::FocusLost),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameInput::Quit),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Up => GameInput::Direction(Direction::Up),
        KeyCode::Down => GameInput::Direction(Direction::Down),
        KeyCode::Left => GameInput::Direction(Direction::Left),
        KeyCode::Right => GameInput::Direction(Direction::Right),
        KeyCode::Enter => GameInput::Confirm,
        KeyCode::Esc => GameInput::Pause,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' | 'k' => GameInput::Direction(Direction::Up),
            's' | 'j' => GameInput::Direction(Direction::Down),
            'a' | 'h' => GameInput::Direction(Direction::Left),
            'd' | 'l' => GameInput::Direction(Direction::Right),
            ' ' => GameInput::Confirm,
            'p' => GameInput::Pause,
            'r' => GameInput::Restart,
            'q' => GameInput::Quit,
            _ => return None,
        },
        _ => return None,
    };

    Some(input)
}

/// Non-blocking reader over the crossterm event stream.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for the next event that maps to a game input.
    ///
    /// Events without a mapping are consumed and skipped. Returns `Ok(None)`
    /// once the timeout elapses with nothing relevant pending.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        let mut wait = timeout;
        while event::poll(wait)? {
            if let Some(input) = map_event(&event::read()?) {
                return Ok(Some(input));
            }
            wait = Duration::ZERO;
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{direction_change_is_valid, map_event, Direction, GameInput};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_deltas_cancel_out() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn direction_change_rejects_reverse() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Left, Direction::Right));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn arrows_and_letters_map_to_directions() {
        assert_eq!(
            map_event(&press(KeyCode::Left)),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_event(&press(KeyCode::Char('W'))),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_event(&press(KeyCode::Char('j'))),
            Some(GameInput::Direction(Direction::Down))
        );
    }

    #[test]
    fn command_keys_map_to_commands() {
        assert_eq!(map_event(&press(KeyCode::Enter)), Some(GameInput::Confirm));
        assert_eq!(map_event(&press(KeyCode::Char(' '))), Some(GameInput::Confirm));
        assert_eq!(map_event(&press(KeyCode::Esc)), Some(GameInput::Pause));
        assert_eq!(map_event(&press(KeyCode::Char('r'))), Some(GameInput::Restart));
        assert_eq!(map_event(&press(KeyCode::Char('q'))), Some(GameInput::Quit));
        assert_eq!(
            map_event(&Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(GameInput::Quit)
        );
        assert_eq!(map_event(&Event::FocusLost), Some(GameInput::FocusLost));
    }

    #[test]
    fn key_release_and_unbound_keys_are_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });

        assert_eq!(map_event(&release), None);
        assert_eq!(map_event(&press(KeyCode::Char('x'))), None);
        assert_eq!(map_event(&Event::FocusGained), None);
        assert_eq!(map_event(&Event::Resize(80, 24)), None);
    }
}
