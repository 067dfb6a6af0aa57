//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Every transition takes a session and returns a new one, so hosts and tests
//! drive it the same way.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::place_food;
pub use state::{Cell, GameOverReason, GameSession, Position, Snake, Snapshot};
