//! # Map Module
//!
//! Tile map loading and the lookup indices baked from it.
//!
//! A map load consumes a [`MapDefinition`] (tile layers from the map loader)
//! and a [`MapRecord`] (doorways and spawn from the persistence layer) once,
//! producing a [`TileMap`] whose collision, teleport, and encounter-zone
//! indices are immutable for the lifetime of the map.

pub mod collision;
pub mod encounter;
pub mod teleport;

pub use collision::*;
pub use encounter::*;
pub use teleport::*;

use crate::game::{PlacementRecord, Position, Rect, TilePoint};
use crate::{config, VerdantError, VerdantResult};
use serde::{Deserialize, Serialize};
use std::io::BufReader;
use std::path::PathBuf;

/// One named layer of tiles from the map loader.
///
/// Tiles are `(col, row, tile_id)` triples; a tile id of zero means "no tile
/// here". Layer names carry the tags the indices look for ("collision",
/// "house", "bush").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    #[serde(default)]
    pub tiles: Vec<(i32, i32, u32)>,
}

impl TileLayer {
    /// Case-insensitive substring tag check on the layer name.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.name.to_lowercase().contains(tag)
    }
}

/// Everything the map loader supplies for one map: grid dimensions, the tile
/// size, and the tile layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDefinition {
    pub name: String,
    /// Map width in tiles
    pub width: i32,
    /// Map height in tiles
    pub height: i32,
    #[serde(default = "default_tile_size")]
    pub tile_size: i32,
    #[serde(default)]
    pub layers: Vec<TileLayer>,
}

fn default_tile_size() -> i32 {
    config::TILE_SIZE
}

impl MapDefinition {
    /// Map width in world pixels.
    pub fn pixel_width(&self) -> i32 {
        self.width * self.tile_size
    }

    /// Map height in world pixels.
    pub fn pixel_height(&self) -> i32 {
        self.height * self.tile_size
    }
}

/// The persisted record of a map: which definition it uses, its doorways,
/// and the player spawn in tile units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapRecord {
    pub path: String,
    #[serde(default)]
    pub teleport: Vec<TeleportRecord>,
    pub player: TilePoint,
}

/// A loaded map with its baked lookup indices.
///
/// Built exactly once per map load; never mutated afterwards.
pub struct TileMap {
    path: String,
    tile_size: i32,
    pixel_w: i32,
    pixel_h: i32,
    spawn: Position,
    collision: CollisionIndex,
    teleports: TeleportIndex,
    bushes: EncounterZoneIndex,
}

impl TileMap {
    /// Bakes a map from its definition and persisted record.
    pub fn new(definition: &MapDefinition, record: &MapRecord) -> Self {
        Self {
            path: record.path.clone(),
            tile_size: definition.tile_size,
            pixel_w: definition.pixel_width(),
            pixel_h: definition.pixel_height(),
            spawn: record.player.to_world(definition.tile_size),
            collision: CollisionIndex::build(definition),
            teleports: TeleportIndex::build(&record.teleport, definition.tile_size),
            bushes: EncounterZoneIndex::build(definition),
        }
    }

    /// Identifier of the map definition this map was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn pixel_width(&self) -> i32 {
        self.pixel_w
    }

    pub fn pixel_height(&self) -> i32 {
        self.pixel_h
    }

    /// World position the player spawns at on this map.
    pub fn spawn(&self) -> Position {
        self.spawn
    }

    /// True iff `rect` overlaps any solid tile.
    pub fn check_collision(&self, rect: &Rect) -> bool {
        self.collision.collides(rect)
    }

    /// First teleport zone overlapping `rect`, in load order.
    pub fn check_teleport(&self, rect: &Rect) -> Option<&TeleportZone> {
        self.teleports.find(rect)
    }

    /// True iff the sampled footprint of `rect` lands in an encounter zone.
    pub fn is_bush_at(&self, rect: &Rect) -> bool {
        self.bushes.contains_footprint(rect)
    }

    /// Rebuilds the persisted record for this map with the given player
    /// position, converting back to tile units.
    pub fn to_record(&self, player: Position) -> MapRecord {
        MapRecord {
            path: self.path.clone(),
            teleport: self.teleports.records(),
            player: TilePoint::from_world(player, self.tile_size),
        }
    }
}

/// Everything needed to enter an area: the map definition plus the stock
/// record and entity placements for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSeed {
    pub definition: MapDefinition,
    pub record: MapRecord,
    #[serde(default)]
    pub trainers: Vec<PlacementRecord>,
    #[serde(default)]
    pub sellers: Vec<PlacementRecord>,
}

/// Resolves area ids (teleport destinations, initial maps) to their seeds.
///
/// The simulation core only reports which doorway the player stepped on; the
/// driver resolves the destination through this trait and installs the new
/// area.
pub trait AreaSource {
    fn area(&self, id: &str) -> VerdantResult<AreaSeed>;
}

/// Area source reading one JSON [`AreaSeed`] file per area id from a
/// directory.
pub struct JsonAreaSource {
    root: PathBuf,
}

impl JsonAreaSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AreaSource for JsonAreaSource {
    fn area(&self, id: &str) -> VerdantResult<AreaSeed> {
        let path = self.root.join(format!("{}.json", id));
        if !path.is_file() {
            return Err(VerdantError::UnknownArea(id.to_string()));
        }
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
