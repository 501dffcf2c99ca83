//! # Game State Module
//!
//! Tick-driven coordination of the loaded map, the player, the placed
//! actors, and the encounter outbox.
//!
//! One `tick` is one simulation step: advance the clock, report any doorway
//! the player is standing on, walk the player, roll bush encounters, then
//! update every actor. The driver drains the outbox between ticks and calls
//! the resolution hooks when a battle or shop interaction concludes.

use super::bag::Bag;
use super::context::SimContext;
use super::encounters::{EncounterOutbox, EncounterRequest, SpeciesTable, TriggerError};
use super::entities::{Actor, Seller, Trainer, UpdateCtx};
use super::player::Player;
use super::save::SaveGame;
use super::shop::ShopOutcome;
use super::EntityId;
use crate::input::{InputLatch, InputSnapshot};
use crate::map::{AreaSeed, AreaSource, TeleportRecord, TileMap};
use crate::{config, VerdantError, VerdantResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Central simulation state for one session.
pub struct GameState {
    map: TileMap,
    player: Player,
    trainers: Vec<Trainer>,
    sellers: Vec<Seller>,
    /// The player's inventory
    pub bag: Bag,
    /// Session clock and the session-wide battle cooldown slot
    pub context: SimContext,
    species: Option<SpeciesTable>,
    outbox: EncounterOutbox,
    rng: StdRng,
    rng_seed: u64,
    input_latch: InputLatch,
    pending_teleport: Option<TeleportRecord>,
}

impl GameState {
    /// Starts a fresh session in the given area.
    ///
    /// The on-bush latch is armed so spawning inside an encounter zone does
    /// not roll an instant encounter.
    pub fn from_area(area: &AreaSeed, bag: Bag, seed: u64) -> Self {
        let map = TileMap::new(&area.definition, &area.record);
        let tile = map.tile_size();
        let mut player = Player::new(map.spawn(), tile);
        player.set_on_bush(true);
        Self {
            map,
            player,
            trainers: area
                .trainers
                .iter()
                .map(|record| Trainer::from_record(record, tile))
                .collect(),
            sellers: area
                .sellers
                .iter()
                .map(|record| Seller::from_record(record, tile))
                .collect(),
            bag,
            context: SimContext::new(),
            species: None,
            outbox: EncounterOutbox::new(),
            rng: StdRng::seed_from_u64(seed),
            rng_seed: seed,
            input_latch: InputLatch::new(),
            pending_teleport: None,
        }
    }

    /// Restores a session from a save, resolving the map definition through
    /// the area source. The saved record (doorways, spawn, placements)
    /// overrides the area's stock record.
    pub fn from_save(save: &SaveGame, source: &dyn AreaSource, seed: u64) -> VerdantResult<Self> {
        let area = source.area(&save.map.path)?;
        let map = TileMap::new(&area.definition, &save.map);
        let tile = map.tile_size();
        let mut player = Player::new(map.spawn(), tile);
        player.set_on_bush(true);
        Ok(Self {
            map,
            player,
            trainers: save
                .trainers
                .iter()
                .map(|record| Trainer::from_record(record, tile))
                .collect(),
            sellers: save
                .sellers
                .iter()
                .map(|record| Seller::from_record(record, tile))
                .collect(),
            bag: save.bag.clone(),
            context: SimContext::new(),
            species: None,
            outbox: EncounterOutbox::new(),
            rng: StdRng::seed_from_u64(seed),
            rng_seed: seed,
            input_latch: InputLatch::new(),
            pending_teleport: None,
        })
    }

    /// Reads a save file and restores the session from it.
    pub fn load(
        path: impl AsRef<Path>,
        source: &dyn AreaSource,
        seed: u64,
    ) -> VerdantResult<Self> {
        Self::from_save(&SaveGame::read(path)?, source, seed)
    }

    /// Snapshots the session into its persisted form.
    pub fn to_save(&self) -> SaveGame {
        SaveGame {
            map: self.map.to_record(self.player.position()),
            trainers: self.trainers.iter().map(Trainer::to_record).collect(),
            sellers: self.sellers.iter().map(Seller::to_record).collect(),
            bag: self.bag.clone(),
        }
    }

    /// Writes the session to a save file.
    pub fn save(&self, path: impl AsRef<Path>) -> VerdantResult<()> {
        self.to_save().write(path)
    }

    /// Installs the wild-candidate table the trainers and bushes draw from.
    pub fn set_species_table(&mut self, table: SpeciesTable) {
        self.species = Some(table);
    }

    pub fn species_table(&self) -> Option<&SpeciesTable> {
        self.species.as_ref()
    }

    /// Runs one simulation step.
    pub fn tick(&mut self, dt: f64, snapshot: InputSnapshot) {
        self.context.advance(dt);
        let input = self.input_latch.latch(snapshot);

        // Doorway lookup only reports; the driver performs the switch.
        if self.pending_teleport.is_none() {
            if let Some(zone) = self.map.check_teleport(&self.player.hitbox()) {
                log::info!("player stepped on a doorway to {}", zone.destination());
                self.pending_teleport = Some(zone.record().clone());
            }
        }

        if let Some(direction) = input.movement {
            self.player.walk(direction, dt, &self.map);
        }

        self.roll_bush_encounter();

        let mut tick_ctx = UpdateCtx {
            sim: &self.context,
            player_hitbox: Some(self.player.hitbox()),
            input,
            species: self.species.as_ref(),
            outbox: &mut self.outbox,
            rng: &mut self.rng,
        };
        for trainer in &mut self.trainers {
            trainer.update(&mut tick_ctx);
        }
        for seller in &mut self.sellers {
            seller.update(&mut tick_ctx);
        }
    }

    /// Rolls a wild encounter when the player newly enters a bush.
    ///
    /// The latch clears only after leaving the zone, so standing still in a
    /// bush rolls once, not every tick.
    fn roll_bush_encounter(&mut self) {
        let in_bush = self.map.is_bush_at(&self.player.hitbox());
        if in_bush && !self.player.on_bush() && !self.context.global_cooldown_active() {
            if self.rng.gen_bool(config::WILD_ENCOUNTER_CHANCE) {
                match &self.species {
                    Some(table) => match table.draw(false, &mut self.rng) {
                        Ok(species) => {
                            log::info!("a wild {} appears in the bush", species.name);
                            self.outbox.push(EncounterRequest::wild(None, species));
                        }
                        Err(err) => log::warn!("bush encounter failed: {}", err),
                    },
                    None => log::warn!(
                        "bush encounter failed: {}",
                        TriggerError::ResolverUnavailable
                    ),
                }
            }
        }
        self.player.set_on_bush(in_bush);
    }

    /// The doorway the player is standing on, if the driver has not yet
    /// resolved it.
    pub fn pending_teleport(&self) -> Option<&TeleportRecord> {
        self.pending_teleport.as_ref()
    }

    /// Takes the pending doorway for resolution.
    pub fn take_pending_teleport(&mut self) -> Option<TeleportRecord> {
        self.pending_teleport.take()
    }

    /// Installs a new area after a teleport: fresh map, fresh actors, player
    /// placed at the destination spawn with the on-bush latch armed.
    pub fn switch_area(&mut self, area: &AreaSeed) {
        self.map = TileMap::new(&area.definition, &area.record);
        let tile = self.map.tile_size();
        self.trainers = area
            .trainers
            .iter()
            .map(|record| Trainer::from_record(record, tile))
            .collect();
        self.sellers = area
            .sellers
            .iter()
            .map(|record| Seller::from_record(record, tile))
            .collect();
        self.player.place_at(self.map.spawn(), tile);
        self.player.set_on_bush(true);
        self.pending_teleport = None;
    }

    /// Removes and returns every pending encounter request, oldest first.
    pub fn drain_encounters(&mut self) -> Vec<EncounterRequest> {
        self.outbox.drain()
    }

    pub fn pending_encounters(&self) -> usize {
        self.outbox.len()
    }

    /// Resolution hook: stamps the session-wide cooldown when a battle or
    /// shop interaction concludes.
    pub fn note_battle_end(&mut self, cooldown: f64) {
        self.context.note_battle_end(cooldown);
    }

    /// Resolution hook: suppresses one actor's detection for `duration`
    /// seconds. Returns false when no actor has the given id.
    pub fn suppress_actor(&mut self, id: EntityId, duration: f64) -> bool {
        let until = self.context.now + duration;
        if let Some(trainer) = self.trainers.iter_mut().find(|t| t.id() == id) {
            trainer.suppress_until(until);
            return true;
        }
        if let Some(seller) = self.sellers.iter_mut().find(|s| s.id() == id) {
            seller.suppress_until(until);
            return true;
        }
        false
    }

    /// Buys from a seller's open shop on the player's behalf.
    ///
    /// The shop must have been opened by the seller's gate first; buying
    /// from a closed shop is an invalid action.
    pub fn purchase_from_seller(
        &mut self,
        seller: EntityId,
        stock_index: usize,
    ) -> VerdantResult<ShopOutcome> {
        let Some(seller) = self.sellers.iter_mut().find(|s| s.id() == seller) else {
            return Err(VerdantError::InvalidState(format!(
                "no seller with id {}",
                seller
            )));
        };
        if !seller.shop().is_open() {
            return Err(VerdantError::InvalidAction("shop is not open".to_string()));
        }
        seller.shop_mut().purchase(stock_index, &mut self.bag)
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn trainers(&self) -> &[Trainer] {
        &self.trainers
    }

    pub fn sellers(&self) -> &[Seller] {
        &self.sellers
    }

    pub fn sellers_mut(&mut self) -> &mut [Seller] {
        &mut self.sellers
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}
