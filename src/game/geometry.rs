//! # Geometry
//!
//! Axis-aligned rectangles and tile-grid conversions used by every map and
//! detection query in the crate.

use serde::{Deserialize, Serialize};

/// An axis-aligned box in world pixel coordinates.
///
/// Overlap uses the conventional "colliderect" semantics: two rectangles
/// collide iff their projections overlap on both axes, and touching edges do
/// not count as overlap.
///
/// # Examples
///
/// ```
/// use verdant::Rect;
///
/// let a = Rect::new(0, 0, 32, 32);
/// let b = Rect::new(16, 16, 32, 32);
/// let c = Rect::new(32, 0, 32, 32); // shares an edge with `a`
/// assert!(a.overlaps(&b));
/// assert!(!a.overlaps(&c));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// The world rectangle of a single tile at grid coordinate `(col, row)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdant::Rect;
    ///
    /// assert_eq!(Rect::from_tile(2, 3, 32), Rect::new(64, 96, 32, 32));
    /// ```
    pub fn from_tile(col: i32, row: i32, tile: i32) -> Self {
        Self::new(col * tile, row * tile, tile, tile)
    }

    /// True iff `self` and `other` strictly overlap on both axes.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Center point of the rectangle, in fractional pixels.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.w as f64 / 2.0,
            self.y as f64 + self.h as f64 / 2.0,
        )
    }
}

/// An integer coordinate on the tile grid.
///
/// Placement records and spawn points persist in tile units; the world
/// position is recovered by multiplying with the tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

impl TilePoint {
    /// Creates a new tile coordinate.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The world-pixel position of this tile's top-left corner.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdant::{Position, TilePoint};
    ///
    /// assert_eq!(TilePoint::new(4, 7).to_world(32), Position::new(128.0, 224.0));
    /// ```
    pub fn to_world(self, tile: i32) -> super::Position {
        super::Position::new((self.x * tile) as f32, (self.y * tile) as f32)
    }

    /// The tile containing the given world position (floor division).
    pub fn from_world(pos: super::Position, tile: i32) -> Self {
        Self::new(
            (pos.x as i32).div_euclid(tile),
            (pos.y as i32).div_euclid(tile),
        )
    }
}

/// Maps a fractional world coordinate to its tile index.
///
/// The coordinate truncates to a whole pixel first, then floor-divides by the
/// tile size; sample points a fraction past a tile edge land in that tile.
pub fn world_to_tile(v: f64, tile: i32) -> i32 {
    (v.trunc() as i32).div_euclid(tile)
}
