//! Game configuration and its construction-time checks.

use std::time::Duration;

use crate::error::{GameError, Result};

pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;
pub const CELL_SIZE: u32 = 20;

pub const DEFAULT_GRID_WIDTH: i32 = (SCREEN_WIDTH / CELL_SIZE) as i32;
pub const DEFAULT_GRID_HEIGHT: i32 = (SCREEN_HEIGHT / CELL_SIZE) as i32;
pub const DEFAULT_SNAKE_LENGTH: usize = 5;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Largest accepted grid side, in cells.
pub const MAX_GRID_DIMENSION: i32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub grid_width: i32,
    pub grid_height: i32,
    pub initial_snake_length: usize,
    pub tick_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            initial_snake_length: DEFAULT_SNAKE_LENGTH,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

impl Config {
    pub fn new(grid_width: i32, grid_height: i32, initial_snake_length: usize) -> Self {
        Config { grid_width, grid_height, initial_snake_length, ..Config::default() }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Number of cells on the board.
    pub fn area(&self) -> usize {
        self.grid_width.max(0) as usize * self.grid_height.max(0) as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }

        if self.grid_width > MAX_GRID_DIMENSION || self.grid_height > MAX_GRID_DIMENSION {
            return Err(GameError::InvalidConfiguration(format!(
                "grid sides are capped at {}, got {}x{}",
                MAX_GRID_DIMENSION, self.grid_width, self.grid_height
            )));
        }

        if self.initial_snake_length == 0 {
            return Err(GameError::InvalidConfiguration("initial snake length must be at least 1".into()));
        }

        if self.initial_snake_length > self.grid_width as usize {
            return Err(GameError::InvalidConfiguration(format!(
                "initial snake length {} does not fit on a row of width {}",
                self.initial_snake_length, self.grid_width
            )));
        }

        // The first food needs somewhere to go.
        if self.initial_snake_length >= self.area() {
            return Err(GameError::InvalidConfiguration(format!(
                "initial snake of length {} leaves no room for food on a {}x{} grid",
                self.initial_snake_length, self.grid_width, self.grid_height
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_layout() {
        let config = Config::default();
        assert_eq!((config.grid_width, config.grid_height), (32, 24));
        assert_eq!(config.initial_snake_length, 5);
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(Config::new(0, 10, 1).validate(), Err(GameError::InvalidConfiguration(_))));
        assert!(matches!(Config::new(10, -3, 1).validate(), Err(GameError::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_oversized_grid() {
        assert!(matches!(Config::new(i32::MAX, 1, 1).validate(), Err(GameError::InvalidConfiguration(_))));
        assert!(Config::new(10, MAX_GRID_DIMENSION + 1, 1).validate().is_err());
        assert!(Config::new(MAX_GRID_DIMENSION, MAX_GRID_DIMENSION, 5).validate().is_ok());
    }

    #[test]
    fn rejects_bad_snake_length() {
        assert!(Config::new(10, 10, 0).validate().is_err());
        assert!(Config::new(10, 10, 11).validate().is_err());
        assert!(Config::new(10, 10, 10).validate().is_ok());
    }

    #[test]
    fn rejects_snake_filling_the_board() {
        assert!(Config::new(4, 1, 4).validate().is_err());
        assert!(Config::new(4, 1, 3).validate().is_ok());
    }
}
