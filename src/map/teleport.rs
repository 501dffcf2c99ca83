//! # Teleport Index
//!
//! Doorway zones mapping a tile rectangle to a destination area id.

use crate::game::Rect;
use serde::{Deserialize, Serialize};

/// Persisted shape of one teleport zone, in tile units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeleportRecord {
    pub x: i32,
    pub y: i32,
    pub destination: String,
}

/// A teleport zone with its baked world rectangle.
#[derive(Debug, Clone)]
pub struct TeleportZone {
    record: TeleportRecord,
    rect: Rect,
}

impl TeleportZone {
    pub fn new(record: TeleportRecord, tile: i32) -> Self {
        let rect = Rect::from_tile(record.x, record.y, tile);
        Self { record, rect }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Area id the zone leads to.
    pub fn destination(&self) -> &str {
        &self.record.destination
    }

    pub fn record(&self) -> &TeleportRecord {
        &self.record
    }
}

/// All teleport zones of a map, in load order.
///
/// Lookup returns the first overlapping zone; when zones overlap, load order
/// decides, so the order must stay deterministic for reproducibility.
#[derive(Debug, Clone, Default)]
pub struct TeleportIndex {
    zones: Vec<TeleportZone>,
}

impl TeleportIndex {
    /// Builds the index from persisted records, preserving their order.
    pub fn build(records: &[TeleportRecord], tile: i32) -> Self {
        Self {
            zones: records
                .iter()
                .map(|record| TeleportZone::new(record.clone(), tile))
                .collect(),
        }
    }

    /// First zone whose rectangle overlaps `rect`, or `None`.
    pub fn find(&self, rect: &Rect) -> Option<&TeleportZone> {
        self.zones.iter().find(|zone| zone.rect.overlaps(rect))
    }

    /// The persisted records, in load order.
    pub fn records(&self) -> Vec<TeleportRecord> {
        self.zones.iter().map(|zone| zone.record.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
