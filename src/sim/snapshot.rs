//! Read-only view of the game state for presentation
//!
//! Everything a renderer or HUD needs per frame, decoupled from the mutable
//! simulation types. Serializes to JSON for the headless runner.

use glam::{IVec2, Vec2};
use serde::Serialize;

use super::state::{GameEvent, GamePhase, GameState};

/// Ticks per on/off period of the invulnerability blink
const BLINK_PERIOD: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub hp: i32,
    pub invulnerable_ticks: u32,
    /// Took damage during the last tick
    pub hurt: bool,
    pub stunned: bool,
    pub on_ground: bool,
}

impl PlayerView {
    /// Whether to draw the player this frame; blinks while invulnerable
    pub fn visible(&self) -> bool {
        self.invulnerable_ticks == 0 || (self.invulnerable_ticks / (BLINK_PERIOD / 2)) % 2 == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: i32,
    pub dead: bool,
    /// Recently hit
    pub flashing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: u32,
    pub life: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiningView {
    pub cell: IVec2,
    /// 0..1
    pub progress: f32,
}

/// Per-frame view of the game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub seed: u64,
    pub tick: u64,
    pub phase: GamePhase,
    /// World size in cells
    pub world_size: IVec2,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub particles: Vec<ParticleView>,
    pub mining: Option<MiningView>,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let hurt = state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerHurt { .. }));

        let mining = state.mining.target().and_then(|cell| {
            state
                .mining
                .fraction(&state.grid)
                .map(|progress| MiningView { cell, progress })
        });

        Self {
            seed: state.seed,
            tick: state.time_ticks,
            phase: state.phase,
            world_size: IVec2::new(state.grid.width() as i32, state.grid.height() as i32),
            player: PlayerView {
                pos: player.body.pos,
                vel: player.body.vel,
                size: player.body.size,
                hp: player.hp,
                invulnerable_ticks: player.invulnerable_ticks,
                hurt,
                stunned: player.is_stunned(),
                on_ground: player.on_ground,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.body.pos,
                    size: e.body.size,
                    hp: e.hp,
                    dead: e.dead,
                    flashing: e.is_flashing(),
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    color: p.color,
                    life: p.life,
                })
                .collect(),
            mining,
            events: state.events.clone(),
        }
    }

    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| !e.dead).count()
    }
}
