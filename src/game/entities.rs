//! # Entities
//!
//! Stationary interactive actors: trainers that trigger wild battles and
//! sellers that open a shop.
//!
//! Each actor owns a hitbox kept in sync with its position every tick, a
//! transient `detected` flag recomputed per tick, and an
//! [`InteractionGate`] deciding when detection plus a confirm press becomes
//! an action. Movement and hitbox sync always run; only detection and
//! triggering are gated by the cooldown windows.

use super::context::SimContext;
use super::detection::{detect_target, InteractionGate};
use super::encounters::{EncounterOutbox, EncounterRequest, SpeciesTable, TriggerError};
use super::geometry::{Rect, TilePoint};
use super::shop::Shop;
use super::{new_entity_id, Direction, EntityId, Position};
use crate::input::FrameInput;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Movement classification of a placed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    #[default]
    Stationary,
}

/// Persisted placement of a trainer or seller, in tile units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub facing: Option<Direction>,
    #[serde(default)]
    pub max_tiles: Option<i32>,
}

/// Everything an actor update may touch during one tick.
pub struct UpdateCtx<'a> {
    pub sim: &'a SimContext,
    /// The player's bounding box this tick, if a player exists
    pub player_hitbox: Option<Rect>,
    pub input: FrameInput,
    pub species: Option<&'a SpeciesTable>,
    pub outbox: &'a mut EncounterOutbox,
    pub rng: &'a mut StdRng,
}

/// Common capability set of interactive entities.
pub trait Actor {
    fn id(&self) -> EntityId;
    fn hitbox(&self) -> Rect;
    /// Transient per-frame detection flag; never persisted.
    fn detected(&self) -> bool;
    fn update(&mut self, tick: &mut UpdateCtx<'_>);
    fn to_record(&self) -> PlacementRecord;
}

/// A stationary trainer that challenges the player to a wild battle.
#[derive(Debug, Clone)]
pub struct Trainer {
    id: EntityId,
    position: Position,
    facing: Direction,
    classification: Classification,
    /// Patrol budget from the placement record; `Some(3)` marks trainers
    /// that draw from the special candidate pool.
    max_tiles: Option<i32>,
    /// Tile size of the map this trainer stands on
    tile: i32,
    hitbox: Rect,
    detected: bool,
    gate: InteractionGate,
}

impl Trainer {
    pub fn new(position: Position, facing: Direction, max_tiles: Option<i32>, tile: i32) -> Self {
        Self {
            id: new_entity_id(),
            position,
            facing,
            classification: Classification::Stationary,
            max_tiles,
            tile,
            hitbox: position.tile_hitbox(tile),
            detected: false,
            gate: InteractionGate::new(),
        }
    }

    /// Builds a trainer from its placement record, scaling tile units to
    /// world pixels with the map's tile size. Stationary trainers face down
    /// unless the record says otherwise.
    pub fn from_record(record: &PlacementRecord, tile: i32) -> Self {
        let position = TilePoint::new(record.x, record.y).to_world(tile);
        let facing = record.facing.unwrap_or(Direction::Down);
        let mut trainer = Self::new(position, facing, record.max_tiles, tile);
        trainer.classification = record.classification;
        trainer
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn gate(&self) -> &InteractionGate {
        &self.gate
    }

    /// Suppresses this trainer's detection until the given session time.
    pub fn suppress_until(&mut self, until: f64) {
        self.gate.suppress_until(until);
    }

    fn sync_hitbox(&mut self) {
        self.hitbox = self.position.tile_hitbox(self.tile);
    }

    fn draws_special_pool(&self) -> bool {
        self.max_tiles == Some(3)
    }

    fn trigger(&self, tick: &mut UpdateCtx<'_>) {
        let Some(table) = tick.species else {
            log::warn!(
                "trainer {}: cannot start battle: {}",
                self.id,
                TriggerError::ResolverUnavailable
            );
            return;
        };
        match table.draw(self.draws_special_pool(), tick.rng) {
            Ok(species) => {
                log::info!("trainer {} starts a battle against {}", self.id, species.name);
                tick.outbox
                    .push(EncounterRequest::wild(Some(self.id), species));
            }
            Err(err) => {
                log::warn!("trainer {}: cannot start battle: {}", self.id, err);
            }
        }
    }
}

impl Actor for Trainer {
    fn id(&self) -> EntityId {
        self.id
    }

    fn hitbox(&self) -> Rect {
        self.hitbox
    }

    fn detected(&self) -> bool {
        self.detected
    }

    fn update(&mut self, tick: &mut UpdateCtx<'_>) {
        self.sync_hitbox();

        self.detected = if self.gate.is_suppressed(tick.sim) {
            false
        } else {
            tick.player_hitbox.map_or(false, |player| {
                detect_target(&self.hitbox, self.facing, &player, self.tile)
            })
        };

        if self
            .gate
            .advance(tick.sim, self.detected, tick.input.confirm_pressed)
        {
            self.trigger(tick);
        }
    }

    fn to_record(&self) -> PlacementRecord {
        let tile = TilePoint::from_world(self.position, self.tile);
        PlacementRecord {
            x: tile.x,
            y: tile.y,
            classification: self.classification,
            facing: Some(self.facing),
            max_tiles: self.max_tiles,
        }
    }
}

/// A stationary seller whose trigger opens a shop session.
#[derive(Debug, Clone)]
pub struct Seller {
    id: EntityId,
    position: Position,
    facing: Direction,
    classification: Classification,
    max_tiles: Option<i32>,
    tile: i32,
    hitbox: Rect,
    detected: bool,
    gate: InteractionGate,
    shop: Shop,
}

impl Seller {
    pub fn new(position: Position, facing: Direction, max_tiles: Option<i32>, tile: i32) -> Self {
        Self {
            id: new_entity_id(),
            position,
            facing,
            classification: Classification::Stationary,
            max_tiles,
            tile,
            hitbox: position.tile_hitbox(tile),
            detected: false,
            gate: InteractionGate::new(),
            shop: Shop::new(),
        }
    }

    pub fn from_record(record: &PlacementRecord, tile: i32) -> Self {
        let position = TilePoint::new(record.x, record.y).to_world(tile);
        let facing = record.facing.unwrap_or(Direction::Down);
        let mut seller = Self::new(position, facing, record.max_tiles, tile);
        seller.classification = record.classification;
        seller
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn shop_mut(&mut self) -> &mut Shop {
        &mut self.shop
    }

    pub fn suppress_until(&mut self, until: f64) {
        self.gate.suppress_until(until);
    }

    fn sync_hitbox(&mut self) {
        self.hitbox = self.position.tile_hitbox(self.tile);
    }
}

impl Actor for Seller {
    fn id(&self) -> EntityId {
        self.id
    }

    fn hitbox(&self) -> Rect {
        self.hitbox
    }

    fn detected(&self) -> bool {
        self.detected
    }

    fn update(&mut self, tick: &mut UpdateCtx<'_>) {
        self.sync_hitbox();

        self.detected = if self.gate.is_suppressed(tick.sim) {
            false
        } else {
            tick.player_hitbox.map_or(false, |player| {
                detect_target(&self.hitbox, self.facing, &player, self.tile)
            })
        };

        if self
            .gate
            .advance(tick.sim, self.detected, tick.input.confirm_pressed)
            && !self.shop.is_open()
        {
            log::info!("seller {} opens the shop", self.id);
            self.shop.open();
        }

        if tick.input.cancel_pressed && self.shop.is_open() {
            self.shop.close();
            self.detected = false;
        }
    }

    fn to_record(&self) -> PlacementRecord {
        let tile = TilePoint::from_world(self.position, self.tile);
        PlacementRecord {
            x: tile.x,
            y: tile.y,
            classification: self.classification,
            facing: Some(self.facing),
            max_tiles: self.max_tiles,
        }
    }
}
