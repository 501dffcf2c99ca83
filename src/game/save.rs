//! # Persistence
//!
//! The JSON save file: current map record, entity placements, and the bag.
//! All positions persist in tile units; world pixels are recovered on load.

use super::bag::Bag;
use super::entities::PlacementRecord;
use crate::map::MapRecord;
use crate::VerdantResult;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One saved session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGame {
    pub map: MapRecord,
    #[serde(default)]
    pub trainers: Vec<PlacementRecord>,
    #[serde(default)]
    pub sellers: Vec<PlacementRecord>,
    #[serde(default)]
    pub bag: Bag,
}

impl SaveGame {
    /// Reads a save file.
    pub fn read(path: impl AsRef<Path>) -> VerdantResult<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Writes the save file, pretty-printed for hand inspection.
    pub fn write(&self, path: impl AsRef<Path>) -> VerdantResult<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Classification, Direction, TilePoint};

    #[test]
    fn test_save_parses_with_minimal_fields() {
        let json = r#"{
            "map": {
                "path": "town",
                "teleport": [{"x": 5, "y": 2, "destination": "house"}],
                "player": {"x": 4, "y": 7}
            }
        }"#;
        let save: SaveGame = serde_json::from_str(json).unwrap();
        assert_eq!(save.map.path, "town");
        assert_eq!(save.map.player, TilePoint::new(4, 7));
        assert_eq!(save.map.teleport[0].destination, "house");
        assert!(save.trainers.is_empty());
        assert_eq!(save.bag.creature_count(), 0);
    }

    #[test]
    fn test_placement_records_round_trip_through_json() {
        let record = PlacementRecord {
            x: 3,
            y: 9,
            classification: Classification::Stationary,
            facing: Some(Direction::Up),
            max_tiles: Some(3),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"stationary\""));
        assert!(json.contains("\"UP\""));
        let back: PlacementRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
