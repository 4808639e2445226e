use ratatui::style::Color;
use ratatui::symbols::border;

/// Side length of the square play grid, in cells.
///
/// The grid is always N×N; a newtype keeps the side length from being mixed
/// up with coordinates or snake lengths at call sites.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GridSize(u16);

impl GridSize {
    /// Wraps a side length. Validation against [`MIN_GRID_SIZE`] happens in
    /// `GameState::new` / `GameState::reset`.
    #[must_use]
    pub const fn new(side: u16) -> Self {
        Self(side)
    }

    /// Returns the side length.
    #[must_use]
    pub fn side(self) -> u16 {
        self.0
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.0) * usize::from(self.0)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(DEFAULT_GRID_SIZE)
    }
}

/// Default grid side length.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest grid whose middle row fits the starting snake.
///
/// The head sits at column `N / 2` with two segments trailing towards x = 0,
/// which needs `N / 2 >= 2`.
pub const MIN_GRID_SIZE: u16 = 4;

/// Segment count of a freshly reset snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Default pacing hint, in moves per second.
pub const DEFAULT_SPEED: f64 = 6.0;

/// Lower bound accepted by `GameState::set_speed`.
pub const MIN_SPEED: f64 = 1.0;

/// Upper bound accepted by `GameState::set_speed`.
pub const MAX_SPEED: f64 = 15.0;

/// Increment applied by the speed up/down keys.
pub const SPEED_STEP: f64 = 1.0;

/// Random draws attempted before food placement falls back to a full scan.
pub const FOOD_SAMPLE_ATTEMPTS: usize = 256;

/// Floor for the autoplay delay, whatever the speed.
pub const MIN_AUTOPLAY_DELAY_MS: u64 = 50;

/// Render/poll cadence of the terminal loop.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Default log file written by the binary.
pub const DEFAULT_LOG_FILE: &str = "tick-snake.log";

/// Colors applied to the board and the HUD.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub board_bg: Color,
    /// Checker color drawn on alternating cells for the faint grid.
    pub grid_bg: Color,
    pub food: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub game_over: Color,
}

/// Dark board with green snake and red food.
pub const THEME_DEFAULT: Theme = Theme {
    board_bg: Color::Rgb(0x0b, 0x10, 0x20),
    grid_bg: Color::Rgb(0x0f, 0x17, 0x24),
    food: Color::Rgb(0xff, 0x4d, 0x4d),
    snake_head: Color::Rgb(0x18, 0xa5, 0x58),
    snake_body: Color::Rgb(0x47, 0xc7, 0x54),
    border_fg: Color::DarkGray,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    game_over: Color::Red,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Glyph pair drawn for one occupied cell (cells are two columns wide).
pub const GLYPH_CELL: &str = "██";

/// Glyph pair drawn for food.
pub const GLYPH_FOOD: &str = "▐▌";

/// Terminal columns used per logical cell.
pub const CELL_COLUMNS: u16 = 2;

#[cfg(test)]
mod tests {
    use super::{DEFAULT_GRID_SIZE, DEFAULT_SPEED, GridSize, MAX_SPEED, MIN_SPEED};

    #[test]
    fn default_grid_is_twenty_square() {
        let grid = GridSize::default();
        assert_eq!(grid.side(), DEFAULT_GRID_SIZE);
        assert_eq!(grid.total_cells(), 400);
    }

    #[test]
    fn default_speed_is_inside_range() {
        assert!((MIN_SPEED..=MAX_SPEED).contains(&DEFAULT_SPEED));
    }
}
