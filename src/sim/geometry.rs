//! Play-field and hitbox geometry
//!
//! Everything moving in the field is a point with an axis-aligned box centred
//! on it. Screen coordinates: origin top-left, +y points down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The rectangle entities live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Horizontal centre line
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Inclusive point containment
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Clamp a centre so a box of `half` extents stays fully inside
    pub fn clamp_center(&self, pos: Vec2, half: Vec2) -> Vec2 {
        let min = half;
        let max = Vec2::new(self.width, self.height) - half;
        // Degenerate field: pin to the middle rather than panic in clamp
        Vec2::new(
            if min.x <= max.x { pos.x.clamp(min.x, max.x) } else { self.center_x() },
            if min.y <= max.y { pos.y.clamp(min.y, max.y) } else { self.height / 2.0 },
        )
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

impl Hitbox {
    /// Box of `size` centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Square box of side `side` centred on `center`
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::centered(center, Vec2::splat(side))
    }

    /// Strict overlap: boxes sharing only an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Check if `point` lies within `radius` of `origin` (inclusive)
#[inline]
pub fn within_radius(origin: Vec2, point: Vec2, radius: f32) -> bool {
    origin.distance_squared(point) <= radius * radius
}
