//! Snake - a single-screen grid snake game
//!
//! This library provides:
//! - Core simulation (game module): snake, food, collisions, game-over/restart
//! - Terminal driver: rendering (render), keyboard mapping (input),
//!   bell cues (sound), session figures (metrics) and the play loop (modes)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod sound;
