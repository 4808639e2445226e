use thiserror::Error;

/// Rejected configuration passed into the game core.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum GameError {
    #[error("grid size {size} is too small; the starting snake needs at least {min}x{min}")]
    GridTooSmall { size: u16, min: u16 },
    #[error("speed {speed} is outside the accepted range {min}..={max}")]
    SpeedOutOfRange { speed: f64, min: f64, max: f64 },
}
