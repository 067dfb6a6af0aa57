use crate::game::Direction;

/// Host-independent key identifier
///
/// Hosts translate their native events into one of these. Anything that is
/// not one of the four arrows becomes `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Parse a DOM-style `KeyboardEvent.key` name such as `"ArrowUp"`
    pub fn from_identifier(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }

    /// The direction this key asks for, if it is a steering key
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            Key::Other => None,
        }
    }

    /// Steering keys must be swallowed by the host (no scrolling, no echo)
    pub fn is_steering(&self) -> bool {
        self.direction().is_some()
    }
}

/// Resolve a key press against the direction applied on the last tick.
///
/// Only a turn onto the other axis is accepted. Reversals, repeats of the
/// current axis and unrecognized keys all return `current`.
pub fn on_key(current: Direction, key: Key) -> Direction {
    match key.direction() {
        Some(requested) if requested.is_orthogonal(current) => requested,
        _ => current,
    }
}

/// Buffers the turn requested between two ticks
///
/// Requests are always judged against the applied direction, never against an
/// earlier request in the same tick. Pressing Up then Left while heading Right
/// therefore keeps Up instead of reversing.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    pending: Option<Direction>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key press; returns whether the host should consume the event
    pub fn press(&mut self, applied: Direction, key: Key) -> bool {
        let next = on_key(applied, key);
        if next != applied {
            self.pending = Some(next);
        }
        key.is_steering()
    }

    /// Direction for the coming tick; clears the buffered request
    pub fn take(&mut self, applied: Direction) -> Direction {
        self.pending.take().unwrap_or(applied)
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
