//! Session state and core simulation types
//!
//! A [`GameState`] owns every pool, the player, the spawner, the RNG and the
//! score/lives counters for one session. Nothing is global, so independent
//! sessions can run side by side.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{BombExplosion, Enemy, EnemyBullet, Explosion, PlayerBullet, ScoreItem};
use super::geometry::Field;
use super::player::Player;
use super::pool::Pool;
use super::spawner::Spawner;
use super::tier::Tier;
use crate::config::{ConfigError, SimConfig};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted; steps are no-ops until reset
    GameOver,
}

/// Discrete occurrences for audio/VFX layers, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyDestroyed { x: f32, y: f32, tier: Tier },
    PlayerHit,
    BombUsed { x: f32, y: f32 },
    ShotFired,
    ItemCollected,
    GameOver,
}

/// Monotonic entity id source
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete session state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: SimConfig,
    pub field: Field,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    pub lives: u8,
    pub player: Player,
    pub spawner: Spawner,
    pub player_bullets: Pool<PlayerBullet>,
    pub enemy_bullets: Pool<EnemyBullet>,
    pub enemies: Pool<Enemy>,
    pub items: Pool<ScoreItem>,
    pub bombs: Pool<BombExplosion>,
    /// Visual bursts (not gameplay-affecting)
    pub bursts: Pool<Explosion>,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    pub ids: EntityIds,
}

impl GameState {
    /// Create a new session with default tunables
    pub fn new(seed: u64) -> Self {
        Self::build(seed, SimConfig::default())
    }

    /// Create a new session with explicit tunables
    pub fn with_config(seed: u64, config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(seed, config))
    }

    /// Assemble a session from an already validated config
    fn build(seed: u64, config: SimConfig) -> Self {
        let field = Field::new(config.field_width, config.field_height);
        log::info!(
            "Session start: seed={seed}, field={}x{}, lives={}",
            field.width,
            field.height,
            config.starting_lives
        );
        Self {
            seed,
            field,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Playing,
            time_ticks: 0,
            score: 0,
            lives: config.starting_lives,
            player: Player::new(&config),
            spawner: Spawner::new(config.spawn_interval),
            player_bullets: Pool::new(),
            enemy_bullets: Pool::new(),
            enemies: Pool::new(),
            items: Pool::new(),
            bombs: Pool::new(),
            bursts: Pool::new(),
            events: Vec::new(),
            ids: EntityIds::default(),
            config,
        }
    }

    /// Discard everything and restart with the same seed and config
    pub fn reset_session(&mut self) {
        self.reset_with_seed(self.seed);
    }

    /// Discard everything and restart on a new RNG stream
    pub fn reset_with_seed(&mut self, seed: u64) {
        log::info!("Session reset (score was {})", self.score);
        *self = Self::build(seed, self.config.clone());
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next_id()
    }

    /// Drop every entity marked during collision resolution
    pub fn apply_removals(&mut self) {
        self.player_bullets.apply_removals();
        self.enemy_bullets.apply_removals();
        self.enemies.apply_removals();
        self.items.apply_removals();
        self.bombs.apply_removals();
        self.bursts.apply_removals();
    }
}
