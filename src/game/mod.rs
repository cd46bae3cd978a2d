//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A driver reads the session state to draw it, forwards turns and restarts,
//! and asks the session to advance once per frame.

pub mod cell;
pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod geometry;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use cell::{Cell, Direction};
pub use clock::TickGate;
pub use config::GameConfig;
pub use error::GameError;
pub use food::Food;
pub use geometry::GridGeometry;
pub use session::{CollisionType, GAME_OVER_MESSAGE, GameSession, TickOutcome};
pub use snake::Snake;
