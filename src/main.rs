//! # Verdant Main Entry Point
//!
//! Loads or starts a session, runs a headless scripted simulation of the
//! world, and writes the session back to disk.

use clap::Parser;
use log::{info, warn, LevelFilter};
use std::path::PathBuf;
use verdant::{
    config, AreaSource, Bag, Direction, GameState, InputSnapshot, JsonAreaSource, SpeciesTable,
    VerdantResult,
};

/// Command line arguments for the Verdant simulation.
#[derive(Parser, Debug)]
#[command(name = "verdant")]
#[command(about = "A top-down tile adventure with trainers, sellers, and wild encounters")]
#[command(version)]
struct Args {
    /// Directory holding one JSON area file per area id
    #[arg(long, default_value = "assets/areas")]
    areas: PathBuf,

    /// Area to start in when no save file exists
    #[arg(long, default_value = "town")]
    start_area: String,

    /// Save file to restore from and write back to
    #[arg(long)]
    save: Option<PathBuf>,

    /// Wild-candidate table (JSON)
    #[arg(long)]
    species: Option<PathBuf>,

    /// Random seed for encounter rolls
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> VerdantResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Verdant v{}", verdant::VERSION);

    let source = JsonAreaSource::new(&args.areas);
    let mut state = match &args.save {
        Some(path) if path.is_file() => {
            info!("Restoring session from {}", path.display());
            GameState::load(path, &source, args.seed)?
        }
        _ => {
            info!("Starting a fresh session in {}", args.start_area);
            GameState::from_area(&source.area(&args.start_area)?, Bag::new(), args.seed)
        }
    };

    if let Some(path) = &args.species {
        state.set_species_table(SpeciesTable::load(path)?);
    } else {
        warn!("No species table given; trainers cannot start battles");
    }

    run_simulation(&mut state, &source, args.ticks);

    if let Some(path) = &args.save {
        state.save(path)?;
        info!("Session saved to {}", path.display());
    }

    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::new().filter_level(level).init();
}

/// Runs the scripted demo loop: walk a lap, press confirm now and then, and
/// resolve whatever the simulation reports.
fn run_simulation(state: &mut GameState, source: &JsonAreaSource, ticks: u64) {
    const DT: f64 = 1.0 / 60.0;

    for tick in 0..ticks {
        state.tick(DT, scripted_input(tick));

        if let Some(doorway) = state.take_pending_teleport() {
            match source.area(&doorway.destination) {
                Ok(area) => {
                    info!("Entering {}", doorway.destination);
                    state.switch_area(&area);
                }
                Err(err) => warn!("Doorway to {} leads nowhere: {}", doorway.destination, err),
            }
        }

        // Stand-in resolver: log the handoff and immediately conclude it.
        for request in state.drain_encounters() {
            info!(
                "Battle handoff: {} (level {}, {})",
                request.name, request.level, request.element
            );
            if let Some(entity) = request.source {
                state.suppress_actor(entity, config::DEFAULT_BATTLE_COOLDOWN);
            }
            state.note_battle_end(config::DEFAULT_BATTLE_COOLDOWN);
        }
    }

    info!(
        "Simulation finished after {} ticks at t={:.2}s",
        ticks, state.context.now
    );
}

/// Demo input: walk one edge of a square per second, confirming twice a
/// second.
fn scripted_input(tick: u64) -> InputSnapshot {
    let movement = match (tick / 60) % 4 {
        0 => Some(Direction::Down),
        1 => Some(Direction::Right),
        2 => Some(Direction::Up),
        _ => Some(Direction::Left),
    };
    InputSnapshot {
        confirm: tick % 30 == 0,
        cancel: false,
        movement,
    }
}
