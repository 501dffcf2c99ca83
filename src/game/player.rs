//! # Player
//!
//! The player avatar: position, facing, hitbox, and collision-checked
//! movement. Detection code only ever reads the hitbox; nothing here is
//! mutated by other entities.

use super::geometry::Rect;
use super::{Direction, Position};
use crate::config;
use crate::map::TileMap;

/// The player-controlled actor.
#[derive(Debug, Clone)]
pub struct Player {
    position: Position,
    facing: Direction,
    /// Tile size of the map the player stands on; refreshed on teleport.
    tile: i32,
    hitbox: Rect,
    /// Latched while standing in an encounter zone so a single bush only
    /// rolls one encounter per entry. Armed on load to keep a restored
    /// session from rolling immediately.
    on_bush: bool,
}

impl Player {
    pub fn new(position: Position, tile: i32) -> Self {
        Self {
            position,
            facing: Direction::Down,
            tile,
            hitbox: position.tile_hitbox(tile),
            on_bush: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    pub fn on_bush(&self) -> bool {
        self.on_bush
    }

    pub fn set_on_bush(&mut self, on_bush: bool) {
        self.on_bush = on_bush;
    }

    /// Walks one tick in `direction`, refusing the move when the proposed
    /// hitbox would overlap a solid tile.
    pub fn walk(&mut self, direction: Direction, dt: f64, map: &TileMap) {
        self.facing = direction;
        let (dx, dy) = direction.delta();
        let step = config::PLAYER_SPEED * dt as f32;
        let proposed = Position::new(
            self.position.x + dx as f32 * step,
            self.position.y + dy as f32 * step,
        );
        if !map.check_collision(&proposed.tile_hitbox(self.tile)) {
            self.position = proposed;
        }
        self.sync_hitbox();
    }

    /// Places the player at a spawn point, e.g. after a teleport, adopting
    /// the destination map's tile size.
    pub fn place_at(&mut self, position: Position, tile: i32) {
        self.position = position;
        self.tile = tile;
        self.sync_hitbox();
    }

    fn sync_hitbox(&mut self) {
        self.hitbox = self.position.tile_hitbox(self.tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapDefinition, MapRecord, TileLayer, TileMap};
    use crate::game::TilePoint;

    fn map_with_wall_at(col: i32, row: i32) -> TileMap {
        let definition = MapDefinition {
            name: "test".to_string(),
            width: 10,
            height: 10,
            tile_size: 32,
            layers: vec![TileLayer {
                name: "collision".to_string(),
                tiles: vec![(col, row, 1)],
            }],
        };
        let record = MapRecord {
            path: "test".to_string(),
            teleport: Vec::new(),
            player: TilePoint::new(0, 0),
        };
        TileMap::new(&definition, &record)
    }

    #[test]
    fn test_walk_moves_and_faces() {
        let map = map_with_wall_at(9, 9);
        let mut player = Player::new(Position::origin(), 32);
        player.walk(Direction::Right, 0.25, &map);

        assert_eq!(player.facing(), Direction::Right);
        assert_eq!(player.position(), Position::new(32.0, 0.0));
        assert_eq!(player.hitbox(), Rect::new(32, 0, 32, 32));
    }

    #[test]
    fn test_walk_refuses_collision() {
        // Wall directly right of the spawn tile
        let map = map_with_wall_at(1, 0);
        let mut player = Player::new(Position::origin(), 32);
        player.walk(Direction::Right, 0.25, &map);

        // Move rejected, facing still updates
        assert_eq!(player.position(), Position::origin());
        assert_eq!(player.facing(), Direction::Right);
    }

    #[test]
    fn test_small_steps_stop_at_wall_edge() {
        let map = map_with_wall_at(2, 0);
        let mut player = Player::new(Position::origin(), 32);
        // 16 px per step; the second step would clip the wall at x = 64
        player.walk(Direction::Right, 0.125, &map);
        assert_eq!(player.position(), Position::new(16.0, 0.0));
        player.walk(Direction::Right, 0.125, &map);
        assert_eq!(player.position(), Position::new(32.0, 0.0));
        player.walk(Direction::Right, 0.125, &map);
        assert_eq!(player.position(), Position::new(32.0, 0.0));
    }

    #[test]
    fn test_place_at_resyncs_hitbox() {
        let mut player = Player::new(Position::origin(), 32);
        player.place_at(Position::new(128.0, 224.0), 16);
        assert_eq!(player.hitbox(), Rect::new(128, 224, 16, 16));
    }
}
