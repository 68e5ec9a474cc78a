//! The authoritative game state and the per-tick update.

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::Config;
use crate::error::{GameError, Result};
use crate::food::place_food;
use crate::snake::{Cell, Direction, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Hit a wall or its own body.
    Crashed,
    /// Filled the board; there is nowhere left for food.
    Won,
}

/// What a single call to [`GameState::step`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    Ate,
    Collided,
    /// The game had already ended before this call; nothing changed.
    AlreadyTerminated,
    /// Food was eaten and the snake now covers every cell.
    BoardFull,
}

/// Read-only view handed to the renderer once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot<'a> {
    pub snake: &'a [Cell],
    pub direction: Direction,
    pub food: Option<Cell>,
    pub alive: bool,
    pub phase: Phase,
    pub score: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState<R = StdRng> {
    width: i32,
    height: i32,
    initial_length: usize,
    snake: Snake,
    food: Option<Cell>,
    phase: Phase,
    rng: R,
}

impl GameState<StdRng> {
    pub fn with_seed(config: &Config, seed: u64) -> Result<Self> {
        GameState::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Starts a game: snake along the top row heading right, first food placed.
    pub fn new(config: &Config, mut rng: R) -> Result<Self> {
        config.validate()?;

        let snake = Snake::new(config.initial_snake_length);
        let food = place_food(&snake, config.grid_width, config.grid_height, &mut rng).ok_or(GameError::BoardFull)?;

        debug!(
            "new game on {}x{} grid, snake length {}, food at {}",
            config.grid_width, config.grid_height, config.initial_snake_length, food
        );

        Ok(GameState {
            width: config.grid_width,
            height: config.grid_height,
            initial_length: config.initial_snake_length,
            snake,
            food: Some(food),
            phase: Phase::Running,
            rng,
        })
    }

    /// Advances the game by one tick.
    ///
    /// `requested` is the latest direction the player asked for since the previous
    /// tick, if any. A request to reverse is ignored. Once the game has ended every
    /// call returns [`Outcome::AlreadyTerminated`] without touching the state.
    pub fn step(&mut self, requested: Option<Direction>) -> Outcome {
        if self.phase != Phase::Running {
            return Outcome::AlreadyTerminated;
        }

        if let Some(direction) = requested {
            if !self.snake.set_direction(direction) {
                debug!("ignored reversal to {:?} while heading {:?}", direction, self.snake.direction());
            }
        }

        let head = self.snake.advance();

        if !head.in_bounds(self.width, self.height) {
            info!("hit the wall at {}, score {}", head, self.score());
            self.phase = Phase::Crashed;
            return Outcome::Collided;
        }

        if self.snake.bites_itself() {
            info!("ran into own body at {}, score {}", head, self.score());
            self.phase = Phase::Crashed;
            return Outcome::Collided;
        }

        if self.food != Some(head) {
            return Outcome::Moved;
        }

        self.snake.grow();
        debug!("ate food at {}, length now {}", head, self.snake.len());

        match place_food(&self.snake, self.width, self.height, &mut self.rng) {
            Some(food) => {
                self.food = Some(food);
                Outcome::Ate
            }
            None => {
                info!("board full, score {}", self.score());
                self.food = None;
                self.phase = Phase::Won;
                Outcome::BoardFull
            }
        }
    }
}

impl<R> GameState<R> {
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_alive(&self) -> bool {
        self.phase != Phase::Crashed
    }

    /// Segments gained since the start.
    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(self.initial_length)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: self.snake.body(),
            direction: self.snake.direction(),
            food: self.food,
            alive: self.is_alive(),
            phase: self.phase,
            score: self.score(),
        }
    }

    /// Replaces the snake and food of a running game, keeping the grid and RNG.
    /// For setting up positions that are awkward to reach by playing.
    ///
    /// The position must be one play could reach: snake on the board, contiguous,
    /// not overlapping its head, shorter than the board, food on a free cell.
    /// A finished game stays finished.
    pub fn arrange(&mut self, snake: Snake, food: Cell) -> Result<()> {
        let invalid = |msg: String| Err(GameError::InvalidArrangement(msg));

        if self.phase != Phase::Running {
            return invalid(format!("game already ended ({:?})", self.phase));
        }
        if let Some(cell) = snake.body().iter().find(|c| !c.in_bounds(self.width, self.height)) {
            return invalid(format!("segment {} is off the board", cell));
        }
        if !snake.is_contiguous() || snake.bites_itself() {
            return invalid("segments do not form a snake".into());
        }
        if snake.len() >= self.width as usize * self.height as usize {
            return invalid(format!("snake of length {} leaves no room for food", snake.len()));
        }
        if !food.in_bounds(self.width, self.height) || snake.contains(food) {
            return invalid(format!("food at {} is off the board or on the snake", food));
        }

        self.snake = snake;
        self.food = Some(food);
        Ok(())
    }
}
