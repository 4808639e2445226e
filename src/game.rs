use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_SPEED, GridSize, INITIAL_SNAKE_LENGTH, MAX_SPEED, MIN_GRID_SIZE, MIN_SPEED,
};
use crate::error::GameError;
use crate::food::place_food;
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::{Position, Snake};

/// Whether the episode is still running.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    Live,
    Terminal,
}

/// What ended the episode.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Collision {
    Wall,
    SelfHit,
}

/// Result of one call to [`GameState::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The episode was already over; nothing changed.
    Idle,
    Moved,
    Ate,
    Collided(Collision),
    /// The snake ate the last free cell; no food can be placed.
    BoardFilled,
}

/// Serializable view of a game for logs and tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid_size: u16,
    pub snake: Vec<Position>,
    pub heading: Direction,
    pub food: Option<Position>,
    pub score: u32,
    pub terminal: bool,
    pub collision: Option<Collision>,
    pub speed: f64,
    pub tick_count: u64,
}

/// Complete mutable game state for one episode.
///
/// All mutation goes through [`reset`](Self::reset),
/// [`set_heading`](Self::set_heading), [`tick`](Self::tick) and the speed
/// setters; everything else is read-only.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: GridSize,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    status: GameStatus,
    collision: Option<Collision>,
    speed: f64,
    tick_count: u64,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh episode seeded from OS entropy.
    pub fn new(grid_size: u16) -> Result<Self, GameError> {
        Self::with_rng(grid_size, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(grid_size: u16, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(grid_size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid_size: u16, mut rng: StdRng) -> Result<Self, GameError> {
        let grid = validate_grid(grid_size)?;
        let snake = starting_snake(grid);
        let food = place_food(&mut rng, grid, &snake);

        Ok(Self {
            grid,
            snake,
            food,
            score: 0,
            status: GameStatus::Live,
            collision: None,
            speed: DEFAULT_SPEED,
            tick_count: 0,
            rng,
        })
    }

    /// Starts a new episode on an N×N grid.
    ///
    /// Grids smaller than [`MIN_GRID_SIZE`] are rejected and leave the current
    /// episode untouched. The random source carries over, so a seeded state
    /// replays the same food sequence after every reset.
    pub fn reset(&mut self, grid_size: u16) -> Result<(), GameError> {
        let grid = validate_grid(grid_size)?;

        self.grid = grid;
        self.snake = starting_snake(grid);
        self.food = place_food(&mut self.rng, grid, &self.snake);
        self.score = 0;
        self.status = GameStatus::Live;
        self.collision = None;
        self.speed = DEFAULT_SPEED;
        self.tick_count = 0;

        debug!(
            "reset {0}x{0} grid, head at {1:?}, food at {2:?}",
            grid.side(),
            self.snake.head(),
            self.food
        );
        Ok(())
    }

    /// Requests a new heading. Repeats and reversals are ignored.
    pub fn set_heading(&mut self, requested: Direction) {
        let current = self.snake.heading();
        if direction_change_is_valid(current, requested) {
            self.snake.set_heading(requested);
        } else {
            trace!("ignored heading {requested:?} while heading {current:?}");
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status == GameStatus::Terminal {
            return TickOutcome::Idle;
        }

        self.tick_count += 1;
        let new_head = self.snake.next_head_position();

        // The tail is still on the board at this point and counts as a hit.
        let collision = if !new_head.is_within_bounds(self.grid) {
            Some(Collision::Wall)
        } else if self.snake.occupies(new_head) {
            Some(Collision::SelfHit)
        } else {
            None
        };

        if let Some(collision) = collision {
            self.status = GameStatus::Terminal;
            self.collision = Some(collision);
            info!(
                "game over: {collision:?} at {new_head:?}, score {}, length {}",
                self.score,
                self.snake.len()
            );
            return TickOutcome::Collided(collision);
        }

        let ate = self.food == Some(new_head);
        self.snake.advance(new_head, ate);
        if !ate {
            return TickOutcome::Moved;
        }

        self.score += 1;
        self.food = place_food(&mut self.rng, self.grid, &self.snake);
        if self.food.is_none() {
            self.status = GameStatus::Terminal;
            info!("board filled, score {}", self.score);
            return TickOutcome::BoardFilled;
        }

        TickOutcome::Ate
    }

    /// Sets the pacing hint. Values outside `MIN_SPEED..=MAX_SPEED` are rejected.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), GameError> {
        if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(GameError::SpeedOutOfRange {
                speed,
                min: MIN_SPEED,
                max: MAX_SPEED,
            });
        }

        self.speed = speed;
        Ok(())
    }

    /// Nudges the pacing hint by `delta`, clamped into range.
    pub fn adjust_speed(&mut self, delta: f64) {
        self.speed = (self.speed + delta).clamp(MIN_SPEED, MAX_SPEED);
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.snake.heading()
    }

    /// Current food cell; `None` only once the board is filled.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status == GameStatus::Terminal
    }

    /// Cause of the terminal transition, if it was a collision.
    #[must_use]
    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        self.grid
    }

    /// Moves per second suggested to the driver.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_size: self.grid.side(),
            snake: self.snake.segments().copied().collect(),
            heading: self.snake.heading(),
            food: self.food,
            score: self.score,
            terminal: self.is_terminal(),
            collision: self.collision,
            speed: self.speed,
            tick_count: self.tick_count,
        }
    }

    #[cfg(test)]
    pub(crate) fn force_food(&mut self, food: Position) {
        self.food = Some(food);
    }

    #[cfg(test)]
    pub(crate) fn force_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}

fn validate_grid(grid_size: u16) -> Result<GridSize, GameError> {
    if grid_size < MIN_GRID_SIZE {
        return Err(GameError::GridTooSmall {
            size: grid_size,
            min: MIN_GRID_SIZE,
        });
    }

    Ok(GridSize::new(grid_size))
}

/// Horizontal snake on the middle row, head in the middle column, facing right.
fn starting_snake(grid: GridSize) -> Snake {
    let mid = i32::from(grid.side() / 2);
    Snake::straight(Position::new(mid, mid), Direction::Right, INITIAL_SNAKE_LENGTH)
}
