use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold each axis back into `[0, grid_size)`, leaving the opposite edge
    pub fn wrapped(&self, grid_size: usize) -> Self {
        let size = grid_size as i32;
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }

    /// Step one cell on the wrap-around grid
    pub fn stepped(&self, direction: Direction, grid_size: usize) -> Self {
        self.moved_in_direction(direction).wrapped(grid_size)
    }

    pub fn is_within(&self, grid_size: usize) -> bool {
        let size = grid_size as i64;
        (0..size).contains(&(self.x as i64)) && (0..size).contains(&(self.y as i64))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction applied on the most recent tick
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake of `length` segments trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Create a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least a head");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if position is covered by any segment, head and tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// The head ran into the body
    SelfCollision,
    /// Food was eaten but no free cell was left to put the next one
    BoardFull,
}

/// Complete state of one game, from start (or restart) to game over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub snake: Snake,
    pub food: Position,
    pub grid_size: usize,
    pub tick_interval_ms: u64,
    pub score: u32,
    /// Best score across sessions, carried into each new session
    pub high_score: u32,
    pub is_alive: bool,
    pub game_over: Option<GameOverReason>,
}

impl GameSession {
    /// Create a live session with score 0
    pub fn new(
        snake: Snake,
        food: Position,
        grid_size: usize,
        tick_interval_ms: u64,
        high_score: u32,
    ) -> Self {
        Self {
            snake,
            food,
            grid_size,
            tick_interval_ms,
            score: 0,
            high_score,
            is_alive: true,
            game_over: None,
        }
    }

    /// The canonical starting layout described by `config`
    pub fn initial(config: &GameConfig, high_score: u32) -> Self {
        Self::new(
            Snake::new(config.initial_head, config.initial_direction, 1),
            config.initial_food,
            config.grid_size,
            config.tick_interval_ms,
            high_score,
        )
    }

    pub fn is_game_over(&self) -> bool {
        !self.is_alive
    }

    /// Direction the snake moved on the last tick
    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    /// Capture what the renderer needs for one frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.body.clone(),
            food: self.food,
            grid_size: self.grid_size,
            score: self.score,
            high_score: self.high_score,
            game_over: self.is_game_over(),
        }
    }
}

/// What a grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    SnakeHead,
    SnakeBody,
    Food,
    Empty,
}

/// Read-only view of a session handed to the renderer once per frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub grid_size: usize,
    pub score: u32,
    pub high_score: u32,
    pub game_over: bool,
}

impl Snapshot {
    pub fn cell_at(&self, pos: Position) -> Cell {
        match self.snake.iter().position(|&segment| segment == pos) {
            Some(0) => Cell::SnakeHead,
            Some(_) => Cell::SnakeBody,
            None if pos == self.food => Cell::Food,
            None => Cell::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_wrapping_each_edge() {
        let size = 18;
        assert_eq!(
            Position::new(17, 5).stepped(Direction::Right, size),
            Position::new(0, 5)
        );
        assert_eq!(
            Position::new(0, 5).stepped(Direction::Left, size),
            Position::new(17, 5)
        );
        assert_eq!(
            Position::new(4, 0).stepped(Direction::Up, size),
            Position::new(4, 17)
        );
        assert_eq!(
            Position::new(4, 17).stepped(Direction::Down, size),
            Position::new(4, 0)
        );
    }

    #[test]
    fn test_wrapping_leaves_interior_alone() {
        let pos = Position::new(3, 9);
        assert_eq!(pos.wrapped(18), pos);
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Position::new(0, 0).is_within(20));
        assert!(Position::new(19, 19).is_within(20));
        assert!(!Position::new(-1, 0).is_within(20));
        assert!(!Position::new(20, 0).is_within(20));
        assert!(!Position::new(0, 20).is_within(20));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_occupancy_includes_head_and_tail() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_initial_session() {
        let session = GameSession::initial(&GameConfig::default(), 7);
        assert_eq!(session.snake.body, vec![Position::new(2, 2)]);
        assert_eq!(session.direction(), Direction::Down);
        assert_eq!(session.food, Position::new(5, 5));
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 7);
        assert_eq!(session.tick_interval_ms, 80);
        assert!(session.is_alive);
        assert_eq!(session.game_over, None);
    }

    #[test]
    fn test_snapshot_cells() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 2);
        let session = GameSession::new(snake, Position::new(8, 8), 10, 80, 0);
        let snapshot = session.snapshot();

        assert_eq!(snapshot.cell_at(Position::new(5, 5)), Cell::SnakeHead);
        assert_eq!(snapshot.cell_at(Position::new(4, 5)), Cell::SnakeBody);
        assert_eq!(snapshot.cell_at(Position::new(8, 8)), Cell::Food);
        assert_eq!(snapshot.cell_at(Position::new(0, 0)), Cell::Empty);
        assert!(!snapshot.game_over);
    }
}
