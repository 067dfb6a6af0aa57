//! The session owner: engine, live session, pending input and high-score store

pub mod controller;

pub use controller::GameController;
