//! Procedural bullet patterns
//!
//! Each pattern kind is a stateless strategy. Given a tier and the emitter's
//! phase (the number of shots it has already fired) it yields the velocity of
//! every bullet in the next volley. No randomness: the same phase and tier
//! always produce the same volley.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tier::Tier;
use crate::unit_from_degrees;

/// Bullets per Radial volley, indexed by tier
const RADIAL_COUNTS: [usize; 3] = [6, 8, 12];
/// Bullets per Circular-Wave volley, indexed by tier
const WAVE_COUNTS: [usize; 3] = [8, 12, 16];
/// Spiral arms, indexed by tier
const SPIRAL_ARMS: [usize; 3] = [2, 3, 4];

const RADIAL_SPEED: f32 = 3.0;
/// Degrees the radial fan turns per shot
pub const RADIAL_STEP_DEG: u64 = 10;

const WAVE_BASE_SPEED: f32 = 2.0;
const WAVE_SPEED_AMPLITUDE: f32 = 1.0;
const WAVE_FREQUENCY: f32 = 0.1;
/// Degrees the ring turns per unit of wave timer
pub const WAVE_STEP_DEG: u64 = 2;

const SPIRAL_SPEED: f32 = 4.0;
/// Degrees the spiral base angle advances per shot
pub const SPIRAL_STEP_DEG: u64 = 15;

/// Emission strategy an enemy is spawned with (immutable after spawn)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Radial,
    CircularWave,
    Spiral,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [
        PatternKind::Radial,
        PatternKind::CircularWave,
        PatternKind::Spiral,
    ];

    /// The strategy implementing this kind
    pub fn strategy(self) -> &'static dyn BulletPattern {
        match self {
            PatternKind::Radial => &Radial,
            PatternKind::CircularWave => &CircularWave,
            PatternKind::Spiral => &Spiral,
        }
    }

    /// Convenience for `strategy().velocities(..)`
    pub fn volley(self, tier: Tier, phase: u32) -> Vec<Vec2> {
        self.strategy().velocities(tier, phase)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Radial => "Radial",
            PatternKind::CircularWave => "CircularWave",
            PatternKind::Spiral => "Spiral",
        }
    }
}

/// A bullet-pattern strategy
///
/// Volleys are evenly spaced around the full circle starting at
/// [`base_angle_deg`](BulletPattern::base_angle_deg).
pub trait BulletPattern {
    /// Bullets (or arms) per volley
    fn bullet_count(&self, tier: Tier) -> usize;

    /// Angle of the first bullet for the given phase, in [0, 360)
    fn base_angle_deg(&self, phase: u32) -> f32;

    /// Speed of every bullet in the volley
    fn speed(&self, tier: Tier, phase: u32) -> f32;

    /// Ticks between volleys
    fn shoot_interval(&self, tier: Tier) -> u32 {
        tier.stats().ring_interval
    }

    fn velocities(&self, tier: Tier, phase: u32) -> Vec<Vec2> {
        let count = self.bullet_count(tier);
        let step = 360.0 / count as f32;
        let base = self.base_angle_deg(phase);
        let speed = self.speed(tier, phase);

        (0..count)
            .map(|i| unit_from_degrees(base + i as f32 * step) * speed)
            .collect()
    }
}

/// Integer phase arithmetic keeps the angle exact for long sessions
#[inline]
fn wrapped_degrees(phase: u32, step: u64) -> f32 {
    (u64::from(phase) * step % 360) as f32
}

/// Slowly rotating fan
pub struct Radial;

impl BulletPattern for Radial {
    fn bullet_count(&self, tier: Tier) -> usize {
        RADIAL_COUNTS[tier.index()]
    }

    fn base_angle_deg(&self, phase: u32) -> f32 {
        wrapped_degrees(phase, RADIAL_STEP_DEG)
    }

    fn speed(&self, tier: Tier, _phase: u32) -> f32 {
        RADIAL_SPEED * tier.stats().bullet_speed_scale
    }
}

/// Rotating ring whose speed breathes with the wave timer
pub struct CircularWave;

impl BulletPattern for CircularWave {
    fn bullet_count(&self, tier: Tier) -> usize {
        WAVE_COUNTS[tier.index()]
    }

    fn base_angle_deg(&self, phase: u32) -> f32 {
        wrapped_degrees(phase, WAVE_STEP_DEG)
    }

    fn speed(&self, tier: Tier, phase: u32) -> f32 {
        let wave = (phase as f32 * WAVE_FREQUENCY).sin();
        (WAVE_BASE_SPEED + wave * WAVE_SPEED_AMPLITUDE) * tier.stats().bullet_speed_scale
    }
}

/// Few fast arms, fired often
pub struct Spiral;

impl BulletPattern for Spiral {
    fn bullet_count(&self, tier: Tier) -> usize {
        SPIRAL_ARMS[tier.index()]
    }

    fn base_angle_deg(&self, phase: u32) -> f32 {
        wrapped_degrees(phase, SPIRAL_STEP_DEG)
    }

    fn speed(&self, tier: Tier, _phase: u32) -> f32 {
        SPIRAL_SPEED * tier.stats().bullet_speed_scale
    }

    fn shoot_interval(&self, tier: Tier) -> u32 {
        tier.stats().spiral_interval
    }
}
