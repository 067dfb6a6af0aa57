//! Grid Snake - Snake on a wrap-around grid
//!
//! This library provides:
//! - Core game logic (game module): sessions, the tick step and food placement
//! - Direction rules and key mapping (input module)
//! - The session owner tying engine, input and high-score store together (session module)
//! - High-score persistence (storage module)
//! - TUI rendering (render module) and the interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod session;
pub mod storage;
