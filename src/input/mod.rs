//! Keyboard input: direction rules plus the terminal key mapping

pub mod controller;
pub mod handler;

pub use controller::{InputController, Key, on_key};
pub use handler::{InputHandler, KeyAction};
