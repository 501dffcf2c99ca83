//! # Encounter Zone Index
//!
//! Tiles where wild encounters can happen ("bush" terrain) and the sampled
//! footprint check against them.

use super::MapDefinition;
use crate::game::{geometry, Rect};
use std::collections::HashSet;

/// Layer-name tag marking encounter terrain.
const BUSH_TAG: &str = "bush";

/// Shrink factor applied to the actor footprint before sampling.
const FOOTPRINT_SHRINK: f64 = 0.5;

/// The set of encounter-zone tile coordinates for a map.
///
/// Containment is a soft check: the query shrinks the actor's box to half a
/// tile around its center, samples the four corners of the shrunk box plus
/// the center, and reports true if any sampled point lands on a flagged
/// tile. An actor mostly off a bush can still count as "in bush" when a
/// corner of the sample box reaches an adjacent flagged tile.
#[derive(Debug, Clone)]
pub struct EncounterZoneIndex {
    tiles: HashSet<(i32, i32)>,
    tile_size: i32,
}

impl EncounterZoneIndex {
    /// Collects flagged tiles from every bush-tagged layer.
    pub fn build(definition: &MapDefinition) -> Self {
        let mut tiles = HashSet::new();
        for layer in &definition.layers {
            if !layer.has_tag(BUSH_TAG) {
                continue;
            }
            for &(col, row, tile_id) in &layer.tiles {
                if tile_id == 0 {
                    continue;
                }
                tiles.insert((col, row));
            }
        }
        Self {
            tiles,
            tile_size: definition.tile_size,
        }
    }

    /// Five-point sampled containment check for an actor rectangle.
    pub fn contains_footprint(&self, rect: &Rect) -> bool {
        if self.tiles.is_empty() {
            return false;
        }
        let half = self.tile_size as f64 * FOOTPRINT_SHRINK / 2.0;
        let (cx, cy) = rect.center();
        let samples = [
            (cx - half, cy - half),
            (cx + half, cy - half),
            (cx - half, cy + half),
            (cx + half, cy + half),
            (cx, cy),
        ];
        samples.iter().any(|&(sx, sy)| {
            let tile = (
                geometry::world_to_tile(sx, self.tile_size),
                geometry::world_to_tile(sy, self.tile_size),
            );
            self.tiles.contains(&tile)
        })
    }

    /// Number of flagged tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
