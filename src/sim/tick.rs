//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically. Order within a
//! tick never changes:
//! spawner -> pool motion -> pattern emission -> player -> collisions -> removals.

use serde::{Deserialize, Serialize};

use super::collision;
use super::entities::{Enemy, EnemyBullet};
use super::frame::Frame;
use super::player::Movement;
use super::state::{GameEvent, GameState, SessionPhase};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Directional movement flags
    pub movement: Movement,
    /// Fire main gun
    pub fire: bool,
    /// Trigger a bomb
    pub special: bool,
}

/// Advance the session by one tick and return the resulting snapshot
pub fn step(state: &mut GameState, input: &TickInput) -> Frame {
    state.events.clear();

    // Frozen until reset
    if state.phase == SessionPhase::GameOver {
        return Frame::capture(state);
    }

    state.time_ticks += 1;

    // Spawner
    if let Some(plan) = state.spawner.tick(state.time_ticks, &state.field, &mut state.rng) {
        let id = state.next_entity_id();
        log::debug!(
            "Spawn #{id}: {} {} at x={:.0}",
            plan.tier.as_str(),
            plan.kind.as_str(),
            plan.pos.x
        );
        state.enemies.add(Enemy::from_plan(id, plan));
    }

    // Motion and lifetimes
    let field = state.field;
    state.player_bullets.update(&field);
    state.enemy_bullets.update(&field);
    state.enemies.update(&field);
    state.items.update(&field);
    state.bombs.update(&field);
    state.bursts.update(&field);

    // Pattern emission; new bullets are not moved until next tick
    let mut volleys = Vec::new();
    for enemy in state.enemies.iter_mut() {
        if let Some(velocities) = enemy.fire() {
            volleys.push((enemy.pos, velocities));
        }
    }
    for (origin, velocities) in volleys {
        for vel in velocities {
            let id = state.next_entity_id();
            state.enemy_bullets.add(EnemyBullet::new(id, origin, vel));
        }
    }

    // Player controller
    state.player.update(input.movement, &field);
    if input.fire {
        if let Some(bullet) = state.player.try_shoot(&mut state.ids) {
            state.player_bullets.add(bullet);
            state.events.push(GameEvent::ShotFired);
        }
    }
    if input.special {
        let radius = state.config.bomb_max_radius;
        if let Some(bomb) = state.player.try_bomb(&mut state.ids, radius) {
            log::debug!(
                "Bomb at ({:.0}, {:.0}), {} charges left",
                bomb.origin.x,
                bomb.origin.y,
                state.player.special_charges()
            );
            state.events.push(GameEvent::BombUsed {
                x: bomb.origin.x,
                y: bomb.origin.y,
            });
            state.bombs.add(bomb);
        }
    }

    collision::resolve(state);
    state.apply_removals();

    if state.lives == 0 {
        state.phase = SessionPhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over at tick {} with score {}",
            state.time_ticks,
            state.score
        );
    }

    Frame::capture(state)
}
