//! # Collision Index
//!
//! Precomputed solid-tile rectangles for a loaded map.

use super::MapDefinition;
use crate::game::Rect;

/// Layer-name tags that mark a layer as solid.
const SOLID_TAGS: [&str; 2] = ["collision", "house"];

/// The set of solid tile rectangles for a map, baked once at load.
///
/// Queries are a linear scan; map tile counts are small enough that no
/// spatial index is needed.
///
/// # Examples
///
/// ```
/// use verdant::{CollisionIndex, MapDefinition, Rect, TileLayer};
///
/// let definition = MapDefinition {
///     name: "town".to_string(),
///     width: 10,
///     height: 10,
///     tile_size: 32,
///     layers: vec![TileLayer {
///         name: "collision".to_string(),
///         tiles: vec![(2, 3, 1)],
///     }],
/// };
/// let index = CollisionIndex::build(&definition);
/// assert!(index.collides(&Rect::from_tile(2, 3, 32)));
/// assert!(!index.collides(&Rect::from_tile(99, 99, 32)));
/// ```
#[derive(Debug, Clone)]
pub struct CollisionIndex {
    rects: Vec<Rect>,
}

impl CollisionIndex {
    /// Bakes the index from every solid-tagged layer of the definition.
    ///
    /// Build order is deterministic: layers in definition order, tiles in
    /// the order the loader listed them. Tile id zero means "no tile" and is
    /// skipped.
    pub fn build(definition: &MapDefinition) -> Self {
        let mut rects = Vec::new();
        for layer in &definition.layers {
            if !SOLID_TAGS.iter().any(|tag| layer.has_tag(tag)) {
                continue;
            }
            for &(col, row, tile_id) in &layer.tiles {
                if tile_id == 0 {
                    continue;
                }
                rects.push(Rect::from_tile(col, row, definition.tile_size));
            }
        }
        Self { rects }
    }

    /// True iff `rect` overlaps any solid rectangle.
    pub fn collides(&self, rect: &Rect) -> bool {
        self.rects.iter().any(|solid| solid.overlaps(rect))
    }

    /// Number of solid rectangles in the index.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// An empty index is a valid map configuration: nothing ever collides.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
