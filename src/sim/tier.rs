//! Enemy strength tiers
//!
//! One lookup table drives size, speed, hit points, bullet speed and drops,
//! so the pattern strategies never branch on tier themselves.

use serde::{Deserialize, Serialize};

/// Enemy strength classification (immutable after spawn)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Weak,
    Normal,
    Strong,
}

/// Per-tier parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierStats {
    /// Square hitbox side
    pub size: f32,
    /// Downward speed (px/tick)
    pub speed: f32,
    /// Nominal hit points; every tier still dies to a single hit
    pub hp: u8,
    /// Multiplier applied to every pattern's bullet speed
    pub bullet_speed_scale: f32,
    /// Inclusive score item drop range on death
    pub drops: (u32, u32),
    /// Ticks between shots for Radial and Circular-Wave emitters
    pub ring_interval: u32,
    /// Ticks between shots for Spiral emitters
    pub spiral_interval: u32,
}

static TIER_TABLE: [TierStats; 3] = [
    // Weak
    TierStats {
        size: 24.0,
        speed: 2.5,
        hp: 1,
        bullet_speed_scale: 0.9,
        drops: (1, 2),
        ring_interval: 90,
        spiral_interval: 15,
    },
    // Normal
    TierStats {
        size: 30.0,
        speed: 2.0,
        hp: 2,
        bullet_speed_scale: 1.0,
        drops: (2, 4),
        ring_interval: 60,
        spiral_interval: 10,
    },
    // Strong
    TierStats {
        size: 40.0,
        speed: 1.5,
        hp: 3,
        bullet_speed_scale: 1.2,
        drops: (4, 7),
        ring_interval: 40,
        spiral_interval: 8,
    },
];

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Weak, Tier::Normal, Tier::Strong];

    /// Table index (Weak = 0)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Tier::Weak => 0,
            Tier::Normal => 1,
            Tier::Strong => 2,
        }
    }

    #[inline]
    pub fn stats(self) -> &'static TierStats {
        &TIER_TABLE[self.index()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Weak => "Weak",
            Tier::Normal => "Normal",
            Tier::Strong => "Strong",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stronger_tiers_are_bigger_and_slower() {
        let [weak, normal, strong] = Tier::ALL.map(|t| *t.stats());
        assert!(weak.size < normal.size && normal.size < strong.size);
        assert!(weak.speed > normal.speed && normal.speed > strong.speed);
        assert!(weak.bullet_speed_scale < strong.bullet_speed_scale);
    }

    #[test]
    fn test_drop_ranges() {
        assert_eq!(Tier::Weak.stats().drops, (1, 2));
        assert_eq!(Tier::Normal.stats().drops, (2, 4));
        assert_eq!(Tier::Strong.stats().drops, (4, 7));
    }

    #[test]
    fn test_shoot_intervals_in_expected_bands() {
        for tier in Tier::ALL {
            let stats = tier.stats();
            assert!((40..=90).contains(&stats.ring_interval));
            assert!((8..=15).contains(&stats.spiral_interval));
        }
    }
}
