//! Grid snake: the simulation core plus the small services a host loop needs.
//!
//! The host polls input into an [`input::InputLatch`], calls [`game::GameState::step`]
//! once per tick, renders a [`game::Snapshot`] and sleeps with a [`pacing::FramePacer`].

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod pacing;
pub mod snake;

pub use config::Config;
pub use error::GameError;
pub use game::{GameState, Outcome, Snapshot};
pub use snake::{Cell, Direction, Snake};
