//! Collision detection and damage resolution
//!
//! One authoritative pass per tick, in this order:
//! 1. player bullets vs enemies (first enemy hit per bullet)
//! 2. active bombs vs enemies and enemy bullets (circular)
//! 3. enemy bullets vs player, skipped while invulnerable (one hit per tick)
//! 4. score items vs player
//!
//! Destroyed entities are marked with `Pool::kill` and vanish from iteration
//! immediately; the caller drops them afterwards with `apply_removals`.

use glam::Vec2;
use rand::Rng;

use super::entities::{Explosion, ScoreItem};
use super::geometry::within_radius;
use super::pool::Pool;
use super::state::{EntityIds, GameEvent, GameState};
use super::tier::Tier;
use crate::consts::{ENEMY_SCORE, ITEM_SCORE};

/// Counts from one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemies_shot: u32,
    pub enemies_bombed: u32,
    pub bullets_cleared: u32,
    pub player_hit: bool,
    pub items_collected: u32,
}

/// Run the full resolution pass against `state`
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut destroyed: Vec<(Vec2, Tier)> = Vec::new();

    // 1. Player bullets vs enemies
    let mut shots = Vec::new();
    for bullet in state.player_bullets.iter() {
        let hitbox = bullet.hitbox();
        let target = state
            .enemies
            .iter()
            .filter(|e| !shots.iter().any(|&(_, id)| id == e.id))
            .find(|e| e.hitbox().overlaps(&hitbox));
        if let Some(enemy) = target {
            shots.push((bullet.id, enemy.id));
        }
    }
    for (bullet_id, enemy_id) in shots {
        state.player_bullets.kill(bullet_id);
        if let Some(enemy) = state.enemies.iter().find(|e| e.id == enemy_id) {
            destroyed.push((enemy.pos, enemy.tier()));
        }
        state.enemies.kill(enemy_id);
        report.enemies_shot += 1;
    }

    // 2. Bomb explosions vs enemies and enemy bullets
    let blasts: Vec<(Vec2, f32)> = state
        .bombs
        .iter()
        .filter(|b| b.is_active())
        .map(|b| (b.origin, b.radius()))
        .collect();
    for (origin, radius) in blasts {
        let caught: Vec<(u32, Vec2, Tier)> = state
            .enemies
            .iter()
            .filter(|e| within_radius(origin, e.pos, radius))
            .map(|e| (e.id, e.pos, e.tier()))
            .collect();
        for (id, pos, tier) in caught {
            state.enemies.kill(id);
            destroyed.push((pos, tier));
            report.enemies_bombed += 1;
        }

        let cleared: Vec<u32> = state
            .enemy_bullets
            .iter()
            .filter(|b| within_radius(origin, b.pos, radius))
            .map(|b| b.id)
            .collect();
        for id in cleared {
            state.enemy_bullets.kill(id);
            report.bullets_cleared += 1;
        }
    }

    for (pos, tier) in destroyed {
        destroy_enemy(state, pos, tier);
    }

    // 3. Enemy bullets vs player
    if !state.player.is_invulnerable() {
        let player_box = state.player.hitbox();
        let hit = state
            .enemy_bullets
            .iter()
            .find(|b| b.hitbox().overlaps(&player_box))
            .map(|b| b.id);
        if let Some(bullet_id) = hit {
            state.enemy_bullets.kill(bullet_id);
            state.lives = state.lives.saturating_sub(1);
            state.player.hit(&state.field);
            state.events.push(GameEvent::PlayerHit);
            report.player_hit = true;
            log::debug!("Player hit, {} lives left", state.lives);
        }
    }

    // 4. Score items vs player
    let player_box = state.player.hitbox();
    let collected: Vec<u32> = state
        .items
        .iter()
        .filter(|i| i.hitbox().overlaps(&player_box))
        .map(|i| i.id)
        .collect();
    for id in collected {
        state.items.kill(id);
        state.score += ITEM_SCORE;
        state.events.push(GameEvent::ItemCollected);
        report.items_collected += 1;
    }

    if report != CollisionReport::default() {
        log::trace!("tick {}: {:?}", state.time_ticks, report);
    }
    report
}

/// Score, burst, event and item drops for one destroyed enemy
fn destroy_enemy(state: &mut GameState, pos: Vec2, tier: Tier) {
    state.score += ENEMY_SCORE;
    let burst_id = state.next_entity_id();
    state.bursts.add(Explosion::new(burst_id, pos));
    state.events.push(GameEvent::EnemyDestroyed {
        x: pos.x,
        y: pos.y,
        tier,
    });
    let GameState { items, ids, rng, .. } = state;
    drop_items(items, ids, rng, pos, tier);
}

/// Scatter a tier-dependent number of score items around `pos`
pub fn drop_items<R: Rng>(
    items: &mut Pool<ScoreItem>,
    ids: &mut EntityIds,
    rng: &mut R,
    pos: Vec2,
    tier: Tier,
) -> u32 {
    let (lo, hi) = tier.stats().drops;
    let count = rng.random_range(lo..=hi);
    for _ in 0..count {
        items.add(ScoreItem::scatter(ids.next_id(), pos, rng));
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{BombExplosion, Enemy, EnemyBullet, PlayerBullet};
    use crate::sim::pattern::PatternKind;

    fn empty_state() -> GameState {
        GameState::new(2024)
    }

    fn add_enemy(state: &mut GameState, pos: Vec2, tier: Tier) -> u32 {
        let id = state.next_entity_id();
        state.enemies.add(Enemy::new(id, pos, tier, PatternKind::Radial));
        id
    }

    fn add_enemy_bullet(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.enemy_bullets.add(EnemyBullet::new(id, pos, Vec2::ZERO));
        id
    }

    #[test]
    fn test_player_bullet_kills_normal_enemy() {
        let mut state = empty_state();
        let enemy = add_enemy(&mut state, Vec2::new(100.0, 100.0), Tier::Normal);
        let bullet = state.next_entity_id();
        state.player_bullets.add(PlayerBullet::new(bullet, Vec2::new(100.0, 100.0)));

        let report = resolve(&mut state);
        state.apply_removals();

        assert_eq!(report.enemies_shot, 1);
        assert_eq!(state.score, 100);
        assert!(!state.enemies.is_alive(enemy));
        assert!(state.player_bullets.is_empty());

        let drops = state.items.len();
        assert!((2..=4).contains(&drops), "dropped {drops}");
        for item in state.items.iter() {
            assert!(item.pos.distance(Vec2::new(100.0, 100.0)) < 25.0);
        }
        assert_eq!(state.bursts.len(), 1);
        assert!(matches!(
            state.events[0],
            GameEvent::EnemyDestroyed { tier: Tier::Normal, .. }
        ));
    }

    #[test]
    fn test_one_enemy_per_bullet() {
        let mut state = empty_state();
        add_enemy(&mut state, Vec2::new(100.0, 100.0), Tier::Strong);
        add_enemy(&mut state, Vec2::new(105.0, 100.0), Tier::Strong);
        let bullet = state.next_entity_id();
        state.player_bullets.add(PlayerBullet::new(bullet, Vec2::new(102.0, 100.0)));

        let report = resolve(&mut state);
        state.apply_removals();

        assert_eq!(report.enemies_shot, 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_two_bullets_one_enemy_scores_once() {
        let mut state = empty_state();
        add_enemy(&mut state, Vec2::new(100.0, 100.0), Tier::Weak);
        for dx in [-2.0, 2.0] {
            let id = state.next_entity_id();
            state.player_bullets.add(PlayerBullet::new(id, Vec2::new(100.0 + dx, 100.0)));
        }

        resolve(&mut state);
        state.apply_removals();

        assert_eq!(state.score, 100);
        // Second bullet flies on
        assert_eq!(state.player_bullets.len(), 1);
    }

    #[test]
    fn test_bomb_radius_boundary() {
        let mut state = empty_state();
        let origin = Vec2::new(400.0, 400.0);
        let bomb_id = state.next_entity_id();
        let mut bomb = BombExplosion::new(bomb_id, origin, 200.0);
        bomb.timer = 15; // radius 150
        assert!((bomb.radius() - 150.0).abs() < 1e-4);
        state.bombs.add(bomb);

        let inside = add_enemy(&mut state, origin + Vec2::new(150.0, 0.0), Tier::Weak);
        let near = add_enemy(&mut state, origin + Vec2::new(0.0, -60.0), Tier::Strong);
        let outside = add_enemy(&mut state, origin + Vec2::new(0.0, 151.0), Tier::Weak);
        let bullet_in = add_enemy_bullet(&mut state, origin + Vec2::new(-100.0, 100.0));
        let bullet_out = add_enemy_bullet(&mut state, origin + Vec2::new(-120.0, 120.0));

        let report = resolve(&mut state);
        state.apply_removals();

        assert_eq!(report.enemies_bombed, 2);
        assert_eq!(report.bullets_cleared, 1);
        assert!(!state.enemies.is_alive(inside));
        assert!(!state.enemies.is_alive(near));
        assert!(state.enemies.is_alive(outside));
        assert!(!state.enemy_bullets.is_alive(bullet_in));
        assert!(state.enemy_bullets.is_alive(bullet_out));
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_single_hit_per_tick() {
        let mut state = empty_state();
        let pos = state.player.pos;
        add_enemy_bullet(&mut state, pos);
        add_enemy_bullet(&mut state, pos + Vec2::new(2.0, 0.0));
        state.player.pos = Vec2::new(200.0, 200.0);
        let pos = state.player.pos;
        add_enemy_bullet(&mut state, pos);
        add_enemy_bullet(&mut state, pos + Vec2::new(1.0, 1.0));

        let report = resolve(&mut state);
        state.apply_removals();

        assert!(report.player_hit);
        assert_eq!(state.lives, 2);
        assert_eq!(state.enemy_bullets.len(), 3);
        assert!(state.player.is_invulnerable());
        assert_eq!(state.player.invulnerable_timer(), 180);
    }

    #[test]
    fn test_invulnerable_player_ignores_bullets() {
        let mut state = empty_state();
        state.player.hit(&state.field.clone());
        let pos = state.player.pos;
        add_enemy_bullet(&mut state, pos);

        let report = resolve(&mut state);
        state.apply_removals();

        assert!(!report.player_hit);
        assert_eq!(state.lives, 3);
        assert_eq!(state.enemy_bullets.len(), 1);
    }

    #[test]
    fn test_items_collected() {
        let mut state = empty_state();
        let pos = state.player.pos;
        for dx in [0.0, 5.0, 100.0] {
            let id = state.next_entity_id();
            state.items.add(ScoreItem::new(id, pos + Vec2::new(dx, 0.0), Vec2::ZERO));
        }

        let report = resolve(&mut state);
        state.apply_removals();

        assert_eq!(report.items_collected, 2);
        assert_eq!(state.score, 20);
        assert_eq!(state.items.len(), 1);
        assert_eq!(
            state.events,
            vec![GameEvent::ItemCollected, GameEvent::ItemCollected]
        );
    }

    #[test]
    fn test_drop_counts_per_tier() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(11);
        let mut ids = EntityIds::default();
        for tier in Tier::ALL {
            let (lo, hi) = tier.stats().drops;
            for _ in 0..50 {
                let mut items = Pool::new();
                let n = drop_items(&mut items, &mut ids, &mut rng, Vec2::ZERO, tier);
                assert!(n >= lo && n <= hi);
                assert_eq!(items.len() as u32, n);
            }
        }
    }
}
