//! Danmaku Shooter - a deterministic bullet-hell simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, bullet patterns, pools, collisions, player)
//! - `config`: Data-driven session tunables loaded from JSON
//!
//! Rendering, audio, menus and high-score storage live outside this crate and
//! only read the [`sim::Frame`] produced by each [`sim::step`].

pub mod config;
pub mod sim;

pub use config::{ConfigError, SimConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Ticks per minute, used by the difficulty curve
    pub const TICKS_PER_MINUTE: u32 = TICKS_PER_SECOND * 60;

    /// Play field dimensions (left two thirds of a 1920x1080 screen)
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 1080.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Respawn height above the bottom edge
    pub const PLAYER_RESPAWN_OFFSET: f32 = 100.0;
    pub const PLAYER_START_LIVES: u8 = 3;
    /// Ticks between shots
    pub const SHOOT_DELAY: u32 = 5;
    /// Ticks between bombs
    pub const SPECIAL_DELAY: u32 = 30;
    /// Bomb charges at session start and after every hit
    pub const MAX_SPECIAL_CHARGES: u8 = 2;
    /// Invulnerability window after a hit (3 seconds)
    pub const INVULNERABLE_TICKS: u32 = 180;

    /// Player bullet
    pub const PLAYER_BULLET_WIDTH: f32 = 6.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 12.0;
    pub const PLAYER_BULLET_SPEED: f32 = 10.0;

    /// Enemy bullet
    pub const ENEMY_BULLET_SIZE: f32 = 6.0;

    /// Enemy spawn cadence
    pub const SPAWN_INTERVAL: u32 = 120;

    /// Score pickups
    pub const ITEM_SIZE: f32 = 8.0;
    pub const ITEM_GRAVITY: f32 = 0.1;
    pub const ITEM_DRAG: f32 = 0.98;
    pub const ITEM_LIFETIME: u32 = 600;
    /// Items falling this far below the field are culled
    pub const ITEM_CULL_MARGIN: f32 = 50.0;

    /// Bomb explosion
    pub const BOMB_MAX_RADIUS: f32 = 200.0;
    pub const BOMB_RAMP_TICKS: u32 = 20;
    pub const BOMB_LIFETIME: u32 = 60;

    /// Visual burst left behind by a destroyed enemy
    pub const BURST_LIFETIME: u32 = 30;

    /// Score deltas
    pub const ENEMY_SCORE: u64 = 100;
    pub const ITEM_SCORE: u64 = 10;
}

/// Unit vector pointing at `degrees` (0 = +x, 90 = +y which is down-screen)
#[inline]
pub fn unit_from_degrees(degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(theta.cos(), theta.sin())
}

/// Angle of a vector in degrees, normalized to [0, 360)
#[inline]
pub fn degrees_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees().rem_euclid(360.0)
}
