use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::state::Position;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square game grid
    pub grid_size: usize,
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Where the single-segment snake starts
    pub initial_head: Position,
    /// Heading of a freshly started snake
    pub initial_direction: Direction,
    /// Food position at the start of every session
    pub initial_food: Position,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 18,
            tick_interval_ms: 80,
            initial_head: Position::new(2, 2),
            initial_direction: Direction::Down,
            initial_food: Position::new(5, 5),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Total number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Check that the canonical starting layout fits on the grid
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            bail!("grid size must be positive");
        }
        if self.grid_size > i32::MAX as usize {
            bail!("grid size {} is too large", self.grid_size);
        }
        if self.tick_interval_ms == 0 {
            bail!("tick interval must be positive");
        }
        if !self.initial_head.is_within(self.grid_size) {
            bail!(
                "initial head {} lies outside a {}x{} grid",
                self.initial_head,
                self.grid_size,
                self.grid_size
            );
        }
        if !self.initial_food.is_within(self.grid_size) {
            bail!(
                "initial food {} lies outside a {}x{} grid",
                self.initial_food,
                self.grid_size,
                self.grid_size
            );
        }
        if self.initial_head == self.initial_food {
            bail!("initial food overlaps the snake at {}", self.initial_head);
        }
        Ok(())
    }
}
