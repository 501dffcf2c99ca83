//! Integration tests for session persistence: tile-unit round-trips and the
//! JSON area source.

use tempfile::tempdir;
use verdant::{
    Actor, AreaSeed, AreaSource, Bag, Classification, Creature, Direction, GameState,
    InputSnapshot, Item, JsonAreaSource, MapDefinition, MapRecord, PlacementRecord, Position,
    SaveGame, TeleportRecord, TileLayer, TilePoint, VerdantError, VerdantResult,
};

/// Area source serving a single fixed seed, keyed by its record path.
struct FixedSource(AreaSeed);

impl AreaSource for FixedSource {
    fn area(&self, id: &str) -> VerdantResult<AreaSeed> {
        if id == self.0.record.path {
            Ok(self.0.clone())
        } else {
            Err(VerdantError::UnknownArea(id.to_string()))
        }
    }
}

fn town_area() -> AreaSeed {
    AreaSeed {
        definition: MapDefinition {
            name: "town".to_string(),
            width: 20,
            height: 20,
            tile_size: 32,
            layers: vec![TileLayer {
                name: "collision".to_string(),
                tiles: vec![(9, 9, 2)],
            }],
        },
        record: MapRecord {
            path: "town".to_string(),
            teleport: vec![TeleportRecord {
                x: 6,
                y: 1,
                destination: "gym".to_string(),
            }],
            player: TilePoint::new(4, 7),
        },
        trainers: vec![PlacementRecord {
            x: 2,
            y: 3,
            classification: Classification::Stationary,
            facing: Some(Direction::Left),
            max_tiles: Some(3),
        }],
        sellers: vec![PlacementRecord {
            x: 8,
            y: 8,
            classification: Classification::Stationary,
            facing: None,
            max_tiles: None,
        }],
    }
}

fn stocked_bag() -> Bag {
    let mut bag = Bag::new();
    bag.add_item(Item {
        name: "Coins".to_string(),
        count: 7,
    });
    bag.add_creature(Creature {
        name: "sprout".to_string(),
        base: 10,
        level: 4,
        exp: 120,
        element: "Grass".to_string(),
        sprite_path: None,
    });
    bag
}

#[test]
fn test_save_and_reload_reproduces_world_positions() {
    let dir = tempdir().expect("temp dir");
    let save_path = dir.path().join("game0.json");

    let area = town_area();
    let state = GameState::from_area(&area, stocked_bag(), 7);
    state.save(&save_path).expect("save session");

    // On-disk record stays in tile units.
    let raw = SaveGame::read(&save_path).expect("read save");
    assert_eq!(raw.map.player, TilePoint::new(4, 7));
    assert_eq!(raw.trainers[0].x, 2);
    assert_eq!(raw.trainers[0].y, 3);

    // Reloading multiplies back to exact world pixels.
    let source = FixedSource(area);
    let restored = GameState::load(&save_path, &source, 7).expect("restore session");
    assert_eq!(restored.player().position(), Position::new(128.0, 224.0));
    assert_eq!(
        restored.trainers()[0].to_record(),
        PlacementRecord {
            x: 2,
            y: 3,
            classification: Classification::Stationary,
            facing: Some(Direction::Left),
            max_tiles: Some(3),
        }
    );
    // Seller facing defaulted to Down on first load and persists as such.
    assert_eq!(restored.sellers()[0].to_record().facing, Some(Direction::Down));

    // Doorways and bag contents survive.
    assert_eq!(raw.map.teleport[0].destination, "gym");
    assert_eq!(restored.bag.coins(), 7);
    assert_eq!(restored.bag.creature(0).unwrap().exp, 120);
}

#[test]
fn test_reload_arms_the_bush_latch() {
    let dir = tempdir().expect("temp dir");
    let save_path = dir.path().join("game0.json");

    let area = town_area();
    GameState::from_area(&area, Bag::new(), 7)
        .save(&save_path)
        .expect("save session");

    let source = FixedSource(area);
    let restored = GameState::load(&save_path, &source, 7).expect("restore session");
    assert!(restored.player().on_bush());
}

#[test]
fn test_moved_player_saves_its_new_tile() {
    let dir = tempdir().expect("temp dir");
    let save_path = dir.path().join("game0.json");

    let area = town_area();
    let mut state = GameState::from_area(&area, Bag::new(), 7);
    // Walk right a shade over a second: ~136 px, landing well inside tile 8.
    for _ in 0..64 {
        state.tick(
            1.0 / 60.0,
            InputSnapshot {
                movement: Some(Direction::Right),
                ..InputSnapshot::idle()
            },
        );
    }
    state.save(&save_path).expect("save session");

    let raw = SaveGame::read(&save_path).expect("read save");
    assert_eq!(raw.map.player, TilePoint::new(8, 7));
}

#[test]
fn test_json_area_source_round_trip() {
    let dir = tempdir().expect("temp dir");
    let area = town_area();
    let file = std::fs::File::create(dir.path().join("town.json")).expect("create area file");
    serde_json::to_writer(file, &area).expect("write area");

    let source = JsonAreaSource::new(dir.path());
    let loaded = source.area("town").expect("load area");
    assert_eq!(loaded.record.path, "town");
    assert_eq!(loaded.definition.tile_size, 32);
    assert_eq!(loaded.trainers.len(), 1);

    match source.area("route-1") {
        Err(VerdantError::UnknownArea(id)) => assert_eq!(id, "route-1"),
        other => panic!("expected UnknownArea, got {:?}", other.map(|_| ())),
    }
}
