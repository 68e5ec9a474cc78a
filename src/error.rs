use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The snake covers every cell, so there is nowhere left to put food.
    #[error("no free cell left on the board")]
    BoardFull,

    /// A position handed to `GameState::arrange` that play could not produce.
    #[error("invalid arrangement: {0}")]
    InvalidArrangement(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
