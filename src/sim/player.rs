//! Player controller and state machine
//!
//! States: Normal and Invulnerable. A registered hit moves the ship back to
//! the respawn point, refills bomb charges and starts the invulnerability
//! countdown; reaching zero returns the ship to Normal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{BombExplosion, PlayerBullet};
use super::geometry::{Field, Hitbox};
use super::state::EntityIds;
use crate::config::SimConfig;
use crate::consts::*;

/// Player damage state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Can be hit
    Normal,
    /// Ignores enemy bullets for `remaining` more ticks
    Invulnerable { remaining: u32 },
}

/// Directional input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Movement {
    /// Unit-less direction; opposing keys cancel
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    pub state: PlayerState,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    pub shoot_delay: u32,
    /// Ticks until the next bomb is allowed
    pub special_cooldown: u32,
    pub special_delay: u32,
    special_charges: u8,
    max_special_charges: u8,
    invulnerable_ticks: u32,
}

impl Player {
    pub const SIZE: f32 = PLAYER_SIZE;

    pub fn new(config: &SimConfig) -> Self {
        let field = Field::new(config.field_width, config.field_height);
        Self {
            pos: Self::respawn_point(&field),
            speed: config.player_speed,
            state: PlayerState::Normal,
            shoot_cooldown: 0,
            shoot_delay: config.shoot_delay,
            special_cooldown: 0,
            special_delay: config.special_delay,
            special_charges: config.max_special_charges,
            max_special_charges: config.max_special_charges,
            invulnerable_ticks: config.invulnerable_ticks,
        }
    }

    /// Horizontal centre, fixed offset above the bottom edge
    pub fn respawn_point(field: &Field) -> Vec2 {
        let half = Vec2::splat(Self::SIZE / 2.0);
        field.clamp_center(
            Vec2::new(field.center_x(), field.height - PLAYER_RESPAWN_OFFSET),
            half,
        )
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::square(self.pos, Self::SIZE)
    }

    pub fn special_charges(&self) -> u8 {
        self.special_charges
    }

    pub fn max_special_charges(&self) -> u8 {
        self.max_special_charges
    }

    pub fn is_invulnerable(&self) -> bool {
        matches!(self.state, PlayerState::Invulnerable { .. })
    }

    /// Remaining invulnerability (0 when Normal)
    pub fn invulnerable_timer(&self) -> u32 {
        match self.state {
            PlayerState::Invulnerable { remaining } => remaining,
            PlayerState::Normal => 0,
        }
    }

    /// Movement, clamping and timer countdowns for one tick
    pub fn update(&mut self, movement: Movement, field: &Field) {
        let half = Vec2::splat(Self::SIZE / 2.0);
        self.pos = field.clamp_center(self.pos + movement.direction() * self.speed, half);

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.special_cooldown = self.special_cooldown.saturating_sub(1);

        if let PlayerState::Invulnerable { remaining } = self.state {
            debug_assert!(remaining > 0, "invulnerable with an exhausted timer");
            let remaining = remaining.saturating_sub(1);
            self.state = if remaining == 0 {
                PlayerState::Normal
            } else {
                PlayerState::Invulnerable { remaining }
            };
        }

        self.debug_check(field);
    }

    /// Fire a bullet from the ship's nose if the cooldown allows
    pub fn try_shoot(&mut self, ids: &mut EntityIds) -> Option<PlayerBullet> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = self.shoot_delay;
        let nose = self.pos - Vec2::new(0.0, Self::SIZE / 2.0);
        Some(PlayerBullet::new(ids.next_id(), nose))
    }

    /// Detonate a bomb at the ship if a charge is available and off cooldown
    pub fn try_bomb(&mut self, ids: &mut EntityIds, max_radius: f32) -> Option<BombExplosion> {
        if self.special_cooldown > 0 || self.special_charges == 0 {
            return None;
        }
        self.special_charges -= 1;
        self.special_cooldown = self.special_delay;
        Some(BombExplosion::new(ids.next_id(), self.pos, max_radius))
    }

    /// Register a hit: respawn, refill charges, start invulnerability
    pub fn hit(&mut self, field: &Field) {
        self.pos = Self::respawn_point(field);
        self.special_charges = self.max_special_charges;
        self.state = if self.invulnerable_ticks > 0 {
            PlayerState::Invulnerable {
                remaining: self.invulnerable_ticks,
            }
        } else {
            PlayerState::Normal
        };
    }

    fn debug_check(&self, field: &Field) {
        let half = Self::SIZE / 2.0;
        debug_assert!(self.special_charges <= self.max_special_charges);
        debug_assert!(
            self.pos.x >= half - f32::EPSILON && self.pos.x <= field.width - half + f32::EPSILON,
            "player left the field: {:?}",
            self.pos
        );
        debug_assert!(
            self.pos.y >= half - f32::EPSILON && self.pos.y <= field.height - half + f32::EPSILON,
            "player left the field: {:?}",
            self.pos
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Player, Field) {
        let config = SimConfig::default();
        let field = Field::new(config.field_width, config.field_height);
        (Player::new(&config), field)
    }

    #[test]
    fn test_spawn_position() {
        let (player, _) = setup();
        assert_eq!(player.pos, Vec2::new(640.0, 980.0));
        assert_eq!(player.special_charges(), 2);
        assert!(!player.is_invulnerable());
    }

    #[test]
    fn test_movement_is_clamped() {
        let (mut player, field) = setup();
        let left_up = Movement {
            left: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..1000 {
            player.update(left_up, &field);
        }
        assert_eq!(player.pos, Vec2::new(10.0, 10.0));

        let right_down = Movement {
            right: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..1000 {
            player.update(right_down, &field);
        }
        assert_eq!(player.pos, Vec2::new(1270.0, 1070.0));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let all = Movement {
            left: true,
            right: true,
            up: true,
            down: true,
        };
        assert_eq!(all.direction(), Vec2::ZERO);
    }

    #[test]
    fn test_shoot_cooldown() {
        let (mut player, field) = setup();
        let mut ids = EntityIds::default();
        let bullet = player.try_shoot(&mut ids).expect("first shot");
        assert_eq!(bullet.pos, Vec2::new(640.0, 970.0));

        let mut shots = 1;
        for _ in 2..=20 {
            player.update(Movement::default(), &field);
            if player.try_shoot(&mut ids).is_some() {
                shots += 1;
            }
        }
        // One shot every 5 ticks over 20 ticks
        assert_eq!(shots, 4);
        // Blocked attempts leave the id counter alone
        assert_eq!(ids.next_id(), 5);
    }

    #[test]
    fn test_bomb_consumes_charges() {
        let (mut player, field) = setup();
        let mut ids = EntityIds::default();
        assert!(player.try_bomb(&mut ids, 200.0).is_some());
        assert_eq!(player.special_charges(), 1);

        // Cooldown blocks an immediate second bomb
        assert!(player.try_bomb(&mut ids, 200.0).is_none());
        assert_eq!(player.special_charges(), 1);

        for _ in 0..SPECIAL_DELAY {
            player.update(Movement::default(), &field);
        }
        assert!(player.try_bomb(&mut ids, 200.0).is_some());
        assert_eq!(player.special_charges(), 0);

        for _ in 0..SPECIAL_DELAY {
            player.update(Movement::default(), &field);
        }
        assert!(player.try_bomb(&mut ids, 200.0).is_none());
        assert_eq!(player.special_charges(), 0);
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn test_hit_refills_and_expires_invulnerability() {
        let (mut player, field) = setup();
        player.try_bomb(&mut EntityIds::default(), 200.0);
        player.pos = Vec2::new(30.0, 30.0);

        player.hit(&field);
        assert_eq!(player.special_charges(), 2);
        assert!(player.is_invulnerable());
        assert_eq!(player.invulnerable_timer(), 180);
        assert_eq!(player.pos, Vec2::new(640.0, 980.0));

        for _ in 0..179 {
            player.update(Movement::default(), &field);
        }
        assert!(player.is_invulnerable());
        assert_eq!(player.invulnerable_timer(), 1);

        player.update(Movement::default(), &field);
        assert!(!player.is_invulnerable());
        assert_eq!(player.state, PlayerState::Normal);
    }

    #[test]
    fn test_hit_at_cap_keeps_cap() {
        let (mut player, field) = setup();
        player.hit(&field);
        player.hit(&field);
        assert_eq!(player.special_charges(), player.max_special_charges());
    }
}
