//! Read-only per-tick snapshot for rendering, HUD and audio layers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pattern::PatternKind;
use super::state::{GameEvent, GameState};
use super::tier::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// Nominal strength for health-bar style HUDs
    pub hp: u8,
    pub tier: Tier,
    pub pattern: PatternKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub owner: BulletOwner,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub pos: Vec2,
    /// Near the end of its lifetime
    pub fading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExplosionView {
    /// Bomb with its current damage radius
    Bomb { pos: Vec2, radius: f32 },
    /// Enemy death burst, `progress` in [0, 1]
    Burst { pos: Vec2, progress: f32 },
}

/// Everything external layers may read after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub score: u64,
    pub lives: u8,
    pub special_charges: u8,
    pub max_special_charges: u8,
    pub invulnerable: bool,
    pub invulnerable_ticks: u32,
    pub player_position: Vec2,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub items: Vec<ItemView>,
    pub explosions: Vec<ExplosionView>,
    pub events: Vec<GameEvent>,
    pub game_over: bool,
}

impl Frame {
    /// Snapshot the session as it stands
    pub fn capture(state: &GameState) -> Self {
        let player_bullets = state.player_bullets.iter().map(|b| BulletView {
            owner: BulletOwner::Player,
            pos: b.pos,
            size: super::entities::PlayerBullet::SIZE,
        });
        let enemy_bullets = state.enemy_bullets.iter().map(|b| BulletView {
            owner: BulletOwner::Enemy,
            pos: b.pos,
            size: b.hitbox().size(),
        });
        let bombs = state.bombs.iter().map(|b| ExplosionView::Bomb {
            pos: b.origin,
            radius: b.radius(),
        });
        let bursts = state.bursts.iter().map(|b| ExplosionView::Burst {
            pos: b.pos,
            progress: b.progress(),
        });

        Self {
            tick: state.time_ticks,
            score: state.score,
            lives: state.lives,
            special_charges: state.player.special_charges(),
            max_special_charges: state.player.max_special_charges(),
            invulnerable: state.player.is_invulnerable(),
            invulnerable_ticks: state.player.invulnerable_timer(),
            player_position: state.player.pos,
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    size: e.size(),
                    hp: e.tier().stats().hp,
                    tier: e.tier(),
                    pattern: e.pattern(),
                })
                .collect(),
            bullets: player_bullets.chain(enemy_bullets).collect(),
            items: state
                .items
                .iter()
                .map(|i| ItemView {
                    pos: i.pos,
                    fading: i.is_fading(),
                })
                .collect(),
            explosions: bombs.chain(bursts).collect(),
            events: state.events.clone(),
            game_over: state.is_game_over(),
        }
    }

    pub fn bullet_count(&self, owner: BulletOwner) -> usize {
        self.bullets.iter().filter(|b| b.owner == owner).count()
    }
}
