//! # Verdant
//!
//! A top-down 2D tile adventure core: a player explores tile maps, runs into
//! stationary trainers and sellers, fills a bag with creatures and items, and
//! saves the whole session to disk.
//!
//! ## Architecture Overview
//!
//! The crate is organized around a handful of small, testable subsystems:
//!
//! - **Map Indices**: collision, teleport, and encounter-zone lookups baked
//!   once per map load and immutable afterwards
//! - **Detection**: contact and line-of-sight beam checks between actors
//! - **Interaction Gate**: the per-entity state machine that turns a
//!   detection plus a confirm press into a battle or shop trigger, behind
//!   per-entity and session-wide cooldowns
//! - **Game State**: tick-driven coordination of the map, the player, the
//!   entities, and the encounter outbox drained by an external resolver
//!
//! Everything runs on a single simulation thread; all queries are cheap
//! synchronous computations over in-memory state.

pub mod game;
pub mod input;
pub mod map;

// Explicit re-exports for commonly used types
pub use game::{
    Actor, Bag, Classification, Creature, Direction, EncounterOutbox, EncounterRequest, EntityId,
    GameState, GateState, InteractionGate, Item, PlacementRecord, Player, Position, Rect,
    SaveGame, Seller, Shop, ShopOutcome, SimContext, SpeciesTable, TilePoint, Trainer,
    TriggerError, WildSpecies,
};

pub use input::{FrameInput, InputLatch, InputSnapshot};
pub use map::{
    AreaSeed, AreaSource, CollisionIndex, EncounterZoneIndex, JsonAreaSource, MapDefinition,
    MapRecord, TeleportIndex, TeleportRecord, TeleportZone, TileLayer, TileMap,
};

/// Core error type for the Verdant game engine.
#[derive(thiserror::Error, Debug)]
pub enum VerdantError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// No area with the given id is known to the area source
    #[error("Unknown area: {0}")]
    UnknownArea(String),
}

/// Result type used throughout the Verdant codebase.
pub type VerdantResult<T> = Result<T, VerdantError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default edge length of a map tile in world pixels; definitions may
    /// override it per map
    pub const TILE_SIZE: i32 = 32;

    /// Length of an actor's line-of-sight beam, in tiles
    pub const SIGHT_RANGE_TILES: i32 = 6;

    /// Session-wide cooldown after a battle resolves, in seconds
    pub const DEFAULT_BATTLE_COOLDOWN: f64 = 3.0;

    /// Chance of a wild encounter when the player steps into a bush
    pub const WILD_ENCOUNTER_CHANCE: f64 = 0.15;

    /// Player walking speed in world pixels per second
    pub const PLAYER_SPEED: f32 = 128.0;
}
