use thiserror::Error;

/// Errors raised by the game core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Every cell on the grid is covered by the snake
    #[error("no free cell left to place food on")]
    NoFreeCell,
}
