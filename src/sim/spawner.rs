//! Enemy spawner and difficulty curve
//!
//! Spawns one enemy every `interval` ticks. Pattern kind is uniform; tier is a
//! weighted draw whose weights drift toward Strong as the session ages.

use glam::Vec2;
use rand::Rng;

use super::geometry::Field;
use super::pattern::PatternKind;
use super::tier::Tier;
use crate::consts::TICKS_PER_MINUTE;

/// Where and what to spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub pos: Vec2,
    pub kind: PatternKind,
    pub tier: Tier,
}

/// Fixed-cadence spawn timer
#[derive(Debug, Clone)]
pub struct Spawner {
    timer: u32,
    interval: u32,
}

impl Spawner {
    pub fn new(interval: u32) -> Self {
        debug_assert!(interval > 0, "spawn interval must be positive");
        Self { timer: 0, interval }
    }

    /// Advance one tick; returns a plan when the cadence fires
    pub fn tick<R: Rng>(
        &mut self,
        elapsed_ticks: u64,
        field: &Field,
        rng: &mut R,
    ) -> Option<SpawnPlan> {
        self.timer += 1;
        if self.timer < self.interval {
            return None;
        }
        self.timer = 0;
        Some(plan_spawn(elapsed_minutes(elapsed_ticks), field, rng))
    }
}

/// Session age in minutes at the nominal tick rate
#[inline]
pub fn elapsed_minutes(elapsed_ticks: u64) -> f32 {
    elapsed_ticks as f32 / TICKS_PER_MINUTE as f32
}

/// Normalized [weak, normal, strong] weights at `minutes` into the session
///
/// Raw weights are `weak = max(0.5 - 0.1t, 0.1)`, `normal = max(0.4 - 0.05t, 0.3)`
/// and `strong = min(0.1 + 0.15t, 0.6)`, then scaled to sum to 1.
pub fn tier_weights(minutes: f32) -> [f32; 3] {
    let t = minutes.max(0.0);
    let weak = (0.5 - 0.1 * t).max(0.1);
    let normal = (0.4 - 0.05 * t).max(0.3);
    let strong = (0.1 + 0.15 * t).min(0.6);
    let total = weak + normal + strong;
    [weak / total, normal / total, strong / total]
}

/// Weighted tier draw
pub fn roll_tier<R: Rng>(rng: &mut R, minutes: f32) -> Tier {
    let weights = tier_weights(minutes);
    let roll: f32 = rng.random();
    let mut acc = 0.0;
    for (tier, weight) in Tier::ALL.into_iter().zip(weights) {
        acc += weight;
        if roll < acc {
            return tier;
        }
    }
    // Rounding can leave acc a hair under 1.0
    Tier::Strong
}

/// Pick kind, tier and position for a new enemy
pub fn plan_spawn<R: Rng>(minutes: f32, field: &Field, rng: &mut R) -> SpawnPlan {
    let kind = PatternKind::ALL[rng.random_range(0..PatternKind::ALL.len())];
    let tier = roll_tier(rng, minutes);

    let size = tier.stats().size;
    let margin = size / 2.0;
    let (lo, hi) = (margin, field.width - margin);
    let x = if lo < hi {
        rng.random_range(lo..=hi)
    } else {
        field.center_x()
    };

    SpawnPlan {
        // Starts just above the visible field
        pos: Vec2::new(x, -size),
        kind,
        tier,
    }
}
