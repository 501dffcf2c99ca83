//! # Game Module
//!
//! Core simulation types: world positions, facing directions, actors, the
//! interaction gate, the bag, and the tick-driven game state.

pub mod bag;
pub mod context;
pub mod detection;
pub mod encounters;
pub mod entities;
pub mod geometry;
pub mod player;
pub mod save;
pub mod shop;
pub mod state;

pub use bag::*;
pub use context::*;
pub use detection::*;
pub use encounters::*;
pub use entities::*;
pub use geometry::*;
pub use player::*;
pub use save::*;
pub use shop::*;
pub use state::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A position in world pixel coordinates.
///
/// Actor positions move continuously (fractions of a pixel per tick), so the
/// components are floating point; hitboxes truncate to whole pixels.
///
/// # Examples
///
/// ```
/// use verdant::Position;
///
/// let pos = Position::new(64.0, 96.0);
/// assert_eq!(pos.x, 64.0);
/// assert_eq!(pos.y, 96.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// The one-tile hitbox anchored at this position.
    ///
    /// Coordinates truncate toward zero, matching whole-pixel rectangle
    /// semantics.
    pub fn tile_hitbox(self, tile: i32) -> geometry::Rect {
        geometry::Rect::new(self.x as i32, self.y as i32, tile, tile)
    }
}

/// Facing directions for actors and their line-of-sight beams.
///
/// Serialized by name (`"UP"`, `"DOWN"`, ...) to match the save format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a unit tile delta `(dx, dy)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdant::Direction;
    ///
    /// assert_eq!(Direction::Up.delta(), (0, -1));
    /// assert_eq!(Direction::Right.delta(), (1, 0));
    /// ```
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}
