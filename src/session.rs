use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::{MIN_AUTOPLAY_DELAY_MS, SPEED_STEP};
use crate::game::{GameState, TickOutcome};
use crate::input::GameInput;

/// What the front-end should do after an input was handled.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionEvent {
    /// Input handled; `Some` when it advanced the game.
    Continue(Option<TickOutcome>),
    Quit,
}

/// Binds one game to the two movement triggers.
///
/// A direction key moves the snake straight away while autoplay is off; with
/// autoplay on, the timer moves it every [`autoplay_delay`](Self::autoplay_delay).
/// Both paths end in the same `GameState::tick`.
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    autoplay: bool,
    last_step: Instant,
}

impl Session {
    #[must_use]
    pub fn new(state: GameState, autoplay: bool, now: Instant) -> Self {
        Self {
            state,
            autoplay,
            last_step: now,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> SessionEvent {
        let outcome = match input {
            GameInput::Direction(direction) => {
                self.state.set_heading(direction);
                if self.autoplay || self.state.is_terminal() {
                    None
                } else {
                    Some(self.step(now))
                }
            }
            GameInput::Step => {
                if self.state.is_terminal() {
                    None
                } else {
                    Some(self.step(now))
                }
            }
            GameInput::ToggleAutoplay => {
                self.autoplay = !self.autoplay;
                self.last_step = now;
                debug!("autoplay {}", if self.autoplay { "on" } else { "off" });
                None
            }
            GameInput::Restart => {
                let side = self.state.grid_size().side();
                match self.state.reset(side) {
                    Ok(()) => info!("restarted {side}x{side} game"),
                    Err(error) => warn!("restart rejected: {error}"),
                }
                self.last_step = now;
                None
            }
            GameInput::SpeedUp => {
                self.state.adjust_speed(SPEED_STEP);
                None
            }
            GameInput::SpeedDown => {
                self.state.adjust_speed(-SPEED_STEP);
                None
            }
            GameInput::Quit => return SessionEvent::Quit,
        };

        SessionEvent::Continue(outcome)
    }

    /// Time between autoplay steps: one move per `1 / speed` seconds, floored.
    #[must_use]
    pub fn autoplay_delay(&self) -> Duration {
        let per_move = Duration::from_secs_f64(1.0 / self.state.speed());
        per_move.max(Duration::from_millis(MIN_AUTOPLAY_DELAY_MS))
    }

    /// Ticks once when autoplay is on and the delay has elapsed.
    pub fn autoplay_tick(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.autoplay || self.state.is_terminal() {
            return None;
        }

        if now.saturating_duration_since(self.last_step) < self.autoplay_delay() {
            return None;
        }

        Some(self.step(now))
    }

    fn step(&mut self, now: Instant) -> TickOutcome {
        self.last_step = now;
        self.state.tick()
    }
}
