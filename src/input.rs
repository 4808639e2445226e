use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Canonical movement directions for the snake heading.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

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

    /// Returns the `(dx, dy)` cell offset of one step. Up decreases y.
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

/// High-level input events consumed by the session driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Step,
    ToggleAutoplay,
    Restart,
    SpeedUp,
    SpeedDown,
    Quit,
}

/// Returns whether a heading change should be applied.
///
/// Repeating the current heading and reversing into the neck are both
/// filtered out.
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current && next != current.opposite()
}

/// Translates one key event into a game input.
///
/// Key repeats count the same as presses so that holding a direction keeps
/// the snake moving when autoplay is off.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ' | 'n' | 'N') => GameInput::Step,
        KeyCode::Char('p' | 'P') => GameInput::ToggleAutoplay,
        KeyCode::Char('r' | 'R') | KeyCode::Enter => GameInput::Restart,
        KeyCode::Char('+' | '=') => GameInput::SpeedUp,
        KeyCode::Char('-' | '_') => GameInput::SpeedDown,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Waits up to `timeout` for a terminal event and maps it.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{Direction, GameInput, direction_change_is_valid, map_key};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
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
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn reversal_and_repeat_are_rejected() {
        for current in Direction::ALL {
            assert!(!direction_change_is_valid(current, current));
            assert!(!direction_change_is_valid(current, current.opposite()));
        }

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Right, Direction::Down));
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        let pairs = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('d'), Direction::Right),
        ];

        for (code, direction) in pairs {
            assert_eq!(
                map_key(key(code, KeyEventKind::Press)),
                Some(GameInput::Direction(direction))
            );
        }
    }

    #[test]
    fn held_key_repeats_but_release_is_ignored() {
        assert_eq!(
            map_key(key(KeyCode::Left, KeyEventKind::Repeat)),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(map_key(key(KeyCode::Left, KeyEventKind::Release)), None);
    }

    #[test]
    fn control_keys_map_to_session_inputs() {
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyEventKind::Press)),
            Some(GameInput::Step)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('p'), KeyEventKind::Press)),
            Some(GameInput::ToggleAutoplay)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('r'), KeyEventKind::Press)),
            Some(GameInput::Restart)
        );
        assert_eq!(
            map_key(key(KeyCode::Esc, KeyEventKind::Press)),
            Some(GameInput::Quit)
        );
        assert_eq!(map_key(key(KeyCode::Char('x'), KeyEventKind::Press)), None);
    }
}
