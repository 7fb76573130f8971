//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (insertion order within each pool)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entities;
pub mod frame;
pub mod geometry;
pub mod pattern;
pub mod player;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod tier;

pub use collision::{CollisionReport, drop_items, resolve};
pub use entities::{BombExplosion, Enemy, EnemyBullet, Explosion, PlayerBullet, ScoreItem};
pub use frame::{BulletOwner, BulletView, EnemyView, ExplosionView, Frame, ItemView};
pub use geometry::{Field, Hitbox, within_radius};
pub use pattern::{BulletPattern, PatternKind};
pub use player::{Movement, Player, PlayerState};
pub use pool::{Pool, Pooled};
pub use spawner::{SpawnPlan, Spawner, roll_tier, tier_weights};
pub use state::{GameEvent, GameState, SessionPhase};
pub use tick::{TickInput, step};
pub use tier::{Tier, TierStats};
