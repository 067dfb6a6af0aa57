use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// True for Up and Down (non-zero vertical component)
    pub fn is_vertical(&self) -> bool {
        self.delta().1 != 0
    }

    /// True for Left and Right (non-zero horizontal component)
    pub fn is_horizontal(&self) -> bool {
        self.delta().0 != 0
    }

    /// Whether `other` moves along the other axis
    pub fn is_orthogonal(&self, other: Direction) -> bool {
        self.is_vertical() != other.is_vertical()
    }
}
