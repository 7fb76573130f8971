//! Danmaku Shooter headless runner
//!
//! Drives a session with a scripted pilot and prints a summary. Useful for
//! replaying seeds and checking determinism without a renderer.
//!
//! Usage:
//!   cargo run --release -- --seed 42 --ticks 7200
//!   RUST_LOG=debug cargo run -- --config tuning.json --json

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use danmaku_shooter::SimConfig;
use danmaku_shooter::sim::{Frame, GameEvent, GameState, Movement, TickInput, step};

/// Half-period of the pilot's left/right weave, in ticks
const WEAVE_TICKS: u64 = 90;
/// Enemy bullets closer than this trigger a bomb
const PANIC_DISTANCE: f32 = 60.0;

#[derive(Parser)]
#[command(name = "danmaku-shooter")]
#[command(about = "Run a deterministic bullet-hell session headlessly")]
struct Args {
    /// RNG seed for the session
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// JSON file with session tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final frame as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default)]
struct Tally {
    enemies_destroyed: u32,
    bombs_used: u32,
    hits_taken: u32,
}

impl Tally {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::EnemyDestroyed { .. } => self.enemies_destroyed += 1,
                GameEvent::BombUsed { .. } => self.bombs_used += 1,
                GameEvent::PlayerHit => self.hits_taken += 1,
                _ => {}
            }
        }
    }
}

/// Weave, fire constantly, bomb when a bullet gets close
fn pilot(state: &GameState) -> TickInput {
    let leftward = (state.time_ticks / WEAVE_TICKS) % 2 == 0;
    let player = state.player.pos;
    let threatened = state
        .enemy_bullets
        .iter()
        .any(|b| b.pos.distance(player) < PANIC_DISTANCE);

    TickInput {
        movement: Movement {
            left: leftward,
            right: !leftward,
            ..Default::default()
        },
        fire: true,
        special: threatened,
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Failed to load {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    let mut state = match GameState::with_config(args.seed, config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let mut tally = Tally::default();
    let mut frame = Frame::capture(&state);

    while frame.tick < args.ticks && !frame.game_over {
        let input = pilot(&state);
        frame = step(&mut state, &input);
        tally.record(&frame.events);
    }

    if args.json {
        match serde_json::to_string_pretty(&frame) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                log::error!("Failed to serialize frame: {err}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("=== SESSION SUMMARY ===");
    println!("  Seed:       {}", args.seed);
    println!("  Ticks:      {}", frame.tick);
    println!("  Score:      {}", frame.score);
    println!("  Lives:      {}", frame.lives);
    println!("  Destroyed:  {}", tally.enemies_destroyed);
    println!("  Bombs:      {}", tally.bombs_used);
    println!("  Hits:       {}", tally.hits_taken);
    if frame.game_over {
        println!("  GAME OVER");
    }
    ExitCode::SUCCESS
}
