//! Moving entities and their per-tick rules

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Field, Hitbox};
use super::pattern::PatternKind;
use super::pool::Pooled;
use super::spawner::SpawnPlan;
use super::tier::Tier;
use crate::consts::*;

/// Upward laser fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub id: u32,
    pub pos: Vec2,
}

impl PlayerBullet {
    pub const SIZE: Vec2 = Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT);

    pub fn new(id: u32, pos: Vec2) -> Self {
        Self { id, pos }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::centered(self.pos, Self::SIZE)
    }
}

impl Pooled for PlayerBullet {
    fn id(&self) -> u32 {
        self.id
    }

    fn advance(&mut self, _field: &Field) {
        self.pos.y -= PLAYER_BULLET_SPEED;
    }

    fn expired(&self, _field: &Field) -> bool {
        self.pos.y < 0.0
    }
}

/// Bullet emitted by an enemy pattern; velocity fixed at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl EnemyBullet {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self { id, pos, vel }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::square(self.pos, ENEMY_BULLET_SIZE)
    }
}

impl Pooled for EnemyBullet {
    fn id(&self) -> u32 {
        self.id
    }

    fn advance(&mut self, _field: &Field) {
        self.pos += self.vel;
    }

    fn expired(&self, field: &Field) -> bool {
        !field.contains(self.pos)
    }
}

/// A pattern-firing enemy drifting down the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    tier: Tier,
    pattern: PatternKind,
    /// Volleys fired so far; drives pattern rotation/modulation
    pub phase: u32,
    /// Ticks since the last volley
    pub shoot_timer: u32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, tier: Tier, pattern: PatternKind) -> Self {
        Self {
            id,
            pos,
            tier,
            pattern,
            phase: 0,
            shoot_timer: 0,
        }
    }

    pub fn from_plan(id: u32, plan: SpawnPlan) -> Self {
        Self::new(id, plan.pos, plan.tier, plan.kind)
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn pattern(&self) -> PatternKind {
        self.pattern
    }

    pub fn size(&self) -> f32 {
        self.tier.stats().size
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::square(self.pos, self.size())
    }

    pub fn shoot_interval(&self) -> u32 {
        self.pattern.strategy().shoot_interval(self.tier)
    }

    /// Emit a volley if the shot timer has elapsed
    pub fn fire(&mut self) -> Option<Vec<Vec2>> {
        if self.shoot_timer < self.shoot_interval() {
            return None;
        }
        self.shoot_timer = 0;
        let volley = self.pattern.volley(self.tier, self.phase);
        self.phase += 1;
        Some(volley)
    }
}

impl Pooled for Enemy {
    fn id(&self) -> u32 {
        self.id
    }

    fn advance(&mut self, _field: &Field) {
        self.pos.y += self.tier.stats().speed;
        self.shoot_timer += 1;
    }

    fn expired(&self, field: &Field) -> bool {
        self.pos.y > field.height + self.size()
    }
}

/// Score pickup scattered by a destroyed enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreItem {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks alive
    pub age: u32,
}

impl ScoreItem {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self { id, pos, vel, age: 0 }
    }

    /// Item jittered around `origin` with a random toss
    pub fn scatter<R: Rng>(id: u32, origin: Vec2, rng: &mut R) -> Self {
        let jitter = Vec2::new(rng.random_range(-20.0..=20.0), rng.random_range(-10.0..=10.0));
        let pos = origin + jitter;
        let vel = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(1.0..=3.0));
        Self::new(id, pos, vel)
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::square(self.pos, ITEM_SIZE)
    }

    /// Last fifth of its life (renderers blink it)
    pub fn is_fading(&self) -> bool {
        self.age * 5 > ITEM_LIFETIME * 4
    }
}

impl Pooled for ScoreItem {
    fn id(&self) -> u32 {
        self.id
    }

    fn advance(&mut self, _field: &Field) {
        self.pos += self.vel;
        self.vel.y += ITEM_GRAVITY;
        self.vel.x *= ITEM_DRAG;
        self.age += 1;
    }

    fn expired(&self, field: &Field) -> bool {
        self.age >= ITEM_LIFETIME || self.pos.y > field.height + ITEM_CULL_MARGIN
    }
}

/// Area-of-effect bomb
///
/// Damage radius grows linearly to `max_radius` over [`BOMB_RAMP_TICKS`];
/// the bomb goes inert after [`BOMB_LIFETIME`] ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BombExplosion {
    pub id: u32,
    pub origin: Vec2,
    pub max_radius: f32,
    /// Ticks since detonation
    pub timer: u32,
}

impl BombExplosion {
    pub fn new(id: u32, origin: Vec2, max_radius: f32) -> Self {
        Self {
            id,
            origin,
            max_radius,
            timer: 0,
        }
    }

    /// Current damage radius
    pub fn radius(&self) -> f32 {
        let progress = (self.timer as f32 / BOMB_RAMP_TICKS as f32).min(1.0);
        self.max_radius * progress
    }

    /// Whether the bomb still deals damage this tick
    pub fn is_active(&self) -> bool {
        self.timer < BOMB_LIFETIME && self.radius() > 0.0
    }
}

impl Pooled for BombExplosion {
    fn id(&self) -> u32 {
        self.id
    }

    fn advance(&mut self, _field: &Field) {
        self.timer += 1;
    }

    fn expired(&self, _field: &Field) -> bool {
        self.timer >= BOMB_LIFETIME
    }
}

/// Short-lived burst left where an enemy died (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    pub timer: u32,
}

impl Explosion {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self { id, pos, timer: 0 }
    }

    /// 0 at spawn, 1 when finished
    pub fn progress(&self) -> f32 {
        (self.timer as f32 / BURST_LIFETIME as f32).min(1.0)
    }
}

impl Pooled for Explosion {
    fn id(&self) -> u32 {
        self.id
    }

    fn advance(&mut self, _field: &Field) {
        self.timer += 1;
    }

    fn expired(&self, _field: &Field) -> bool {
        self.timer >= BURST_LIFETIME
    }
}
