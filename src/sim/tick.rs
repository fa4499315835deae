//! Fixed-step simulation tick
//!
//! One call advances the world by exactly one step, always in the same order:
//! player, enemies (with contact damage), interactions, then effects.

use glam::Vec2;

use super::block::BlockKind;
use super::interaction::{melee_attack, place_block, resolve_contact, spawn_debris};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::pixel_to_cell;

/// Intents for a single tick, captured before the tick starts
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// -1 left, 0 none, 1 right
    pub move_axis: f32,
    /// Jump held
    pub jump: bool,
    /// Pointer in world pixels
    pub pointer: Option<Vec2>,
    /// Primary button went down: attack an enemy under the pointer, else start mining
    pub pointer_pressed: bool,
    /// Primary button went up: stop mining
    pub pointer_released: bool,
    /// Attack only, never mines
    pub attack: bool,
    /// Secondary button went down: place `selected_block` under the pointer
    pub place: bool,
    pub selected_block: BlockKind,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    let tuning = state.settings.physics;

    // --- PLAYER ---
    state
        .player
        .update(&state.grid, input.move_axis, input.jump, &tuning);

    let fall_limit = state.grid.pixel_size().y + FALL_RESET_MARGIN;
    if state.player.body.pos.y > fall_limit {
        log::debug!("Player fell out of the world, respawning");
        state.player.respawn(state.spawn_point);
        state.events.push(GameEvent::PlayerRespawned);
    }

    // --- ENEMIES ---
    let player_pos = state.player.body.pos;
    for enemy in state.enemies.iter_mut() {
        enemy.update(&state.grid, player_pos, &tuning);
        if resolve_contact(&mut state.player, enemy) {
            state.events.push(GameEvent::PlayerHurt {
                amount: ENEMY_DAMAGE,
                hp: state.player.hp,
            });
        }
    }

    // --- INTERACTION ---
    resolve_interactions(state, input);

    // --- EFFECTS ---
    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(|p| p.life > 0);
    for enemy in state.enemies.iter_mut() {
        enemy.flash_ticks = enemy.flash_ticks.saturating_sub(1);
    }

    if state.player.hp <= 0 {
        log::info!("Player died at tick {}", state.time_ticks);
        state.phase = GamePhase::GameOver;
        state.mining.release();
        state.events.push(GameEvent::PlayerDied);
    }
}

/// Building, combat and mining for this tick
fn resolve_interactions(state: &mut GameState, input: &TickInput) {
    if input.pointer_released {
        state.mining.release();
    }

    if let Some(point) = input.pointer {
        if input.place {
            if let Some(cell) = place_block(&mut state.grid, point, input.selected_block) {
                state.events.push(GameEvent::BlockPlaced {
                    cell,
                    kind: input.selected_block,
                });
            }
        }

        let mut attacked = false;
        if input.pointer_pressed || input.attack {
            if let Some(index) = melee_attack(&mut state.enemies, &state.player, point) {
                attacked = true;
                let enemy = &state.enemies[index];
                state.events.push(GameEvent::EnemyHit { index, hp: enemy.hp });
                if enemy.dead {
                    log::debug!("Enemy {} killed", index);
                    state.events.push(GameEvent::EnemyKilled { index });
                }
            }
        }

        // An attack consumes the press
        if input.pointer_pressed && !attacked {
            state.mining.begin(pixel_to_cell(point));
        }
    }

    if let Some((cell, kind)) = state.mining.step(&mut state.grid) {
        log::debug!("Mined {} at ({}, {})", kind.as_str(), cell.x, cell.y);
        spawn_debris(&mut state.particles, cell, kind.color(), state.time_ticks);
        state.events.push(GameEvent::BlockMined { cell, kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::grid::TileGrid;
    use crate::sim::state::Enemy;
    use glam::IVec2;

    /// 20x12 world, stone from row 8 down
    fn flat_state() -> GameState {
        let mut grid = TileGrid::new(20, 12);
        for x in 0..20 {
            for y in 8..12 {
                grid.set(x, y, BlockKind::Stone);
            }
        }
        let settings = Settings {
            enemy_count: 0,
            ..Settings::default()
        };
        GameState::from_grid(1, settings, grid)
    }

    /// Let the player fall onto the floor
    fn settle(state: &mut GameState) {
        for _ in 0..60 {
            tick(state, &TickInput::default());
        }
    }

    fn press(point: Vec2) -> TickInput {
        TickInput {
            pointer: Some(point),
            pointer_pressed: true,
            ..Default::default()
        }
    }

    fn hold(point: Vec2) -> TickInput {
        TickInput {
            pointer: Some(point),
            ..Default::default()
        }
    }

    #[test]
    fn test_player_lands_and_rests() {
        let mut state = flat_state();
        settle(&mut state);
        assert!(state.player.on_ground);
        let resting = state.player.body.pos;
        assert!(resting.y + PLAYER_HEIGHT < 8.0 * TILE_SIZE);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.body.pos, resting);
        assert_eq!(state.player.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_mining_through_tick() {
        let mut state = flat_state();
        settle(&mut state);
        let target = Vec2::new(15.5 * TILE_SIZE, 9.5 * TILE_SIZE);

        tick(&mut state, &press(target));
        assert_eq!(state.mining.target(), Some(IVec2::new(15, 9)));
        assert_eq!(state.mining.progress(), 1);

        for _ in 0..58 {
            tick(&mut state, &hold(target));
        }
        assert_eq!(state.grid.get(15, 9), Some(BlockKind::Stone));

        tick(&mut state, &hold(target));
        assert_eq!(state.grid.get(15, 9), Some(BlockKind::Air));
        assert!(state.events.contains(&GameEvent::BlockMined {
            cell: IVec2::new(15, 9),
            kind: BlockKind::Stone,
        }));
        assert_eq!(state.particles.len(), DEBRIS_PER_BLOCK as usize);

        // Debris fades out
        for _ in 0..DEBRIS_LIFE_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_release_stops_mining() {
        let mut state = flat_state();
        settle(&mut state);
        let target = Vec2::new(15.5 * TILE_SIZE, 9.5 * TILE_SIZE);
        tick(&mut state, &press(target));
        for _ in 0..30 {
            tick(&mut state, &hold(target));
        }
        tick(
            &mut state,
            &TickInput {
                pointer_released: true,
                ..Default::default()
            },
        );
        assert_eq!(state.mining.target(), None);
        assert_eq!(state.mining.progress(), 0);
        assert_eq!(state.grid.get(15, 9), Some(BlockKind::Stone));
    }

    #[test]
    fn test_place_block() {
        let mut state = flat_state();
        let input = TickInput {
            pointer: Some(Vec2::new(18.5 * TILE_SIZE, 2.5 * TILE_SIZE)),
            place: true,
            selected_block: BlockKind::Dirt,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.grid.get(18, 2), Some(BlockKind::Dirt));
        assert_eq!(state.mining.target(), None);
    }

    #[test]
    fn test_attack_suppresses_mining() {
        let mut state = flat_state();
        settle(&mut state);
        let player = state.player.body.pos;
        let enemy_pos = Vec2::new(player.x + 60.0, player.y - 100.0);
        state.enemies.push(Enemy::new(enemy_pos));

        // The enemy drifts 1.5 px toward the player first; the middle of its box is still hit
        let point = enemy_pos + Vec2::splat(ENEMY_SIZE * 0.5);
        tick(&mut state, &press(point));
        assert_eq!(state.enemies[0].hp, ENEMY_HP - 1);
        assert_eq!(state.mining.target(), None);
        assert!(matches!(state.events[0], GameEvent::EnemyHit { index: 0, .. }));
    }

    #[test]
    fn test_contact_damage_and_invulnerability() {
        let mut state = flat_state();
        settle(&mut state);
        let player = state.player.body.pos;
        state.enemies.push(Enemy::new(Vec2::new(player.x + 5.0, player.y)));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.hp, PLAYER_MAX_HP - ENEMY_DAMAGE);
        assert!(state.player.is_invulnerable());

        // Still overlapping or not, no more damage inside the window
        for _ in 0..INVULNERABILITY_TICKS - 1 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.player.hp, PLAYER_MAX_HP - ENEMY_DAMAGE);
        }
    }

    #[test]
    fn test_pause_skips_ticks() {
        let mut state = flat_state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let pos = state.player.body.pos;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.body.pos, pos);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_game_over_on_death() {
        let mut state = flat_state();
        state.player.hp = 0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::PlayerDied));

        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);

        state.restart(9);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_fall_out_of_world_respawns() {
        // No ground at all
        let settings = Settings {
            enemy_count: 0,
            ..Settings::default()
        };
        let mut state = GameState::from_grid(1, settings, TileGrid::new(20, 4));
        let mut respawned = false;
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
            if state.events.contains(&GameEvent::PlayerRespawned) {
                respawned = true;
                break;
            }
        }
        assert!(respawned);
        assert_eq!(state.player.body.pos, state.spawn_point);
        assert_eq!(state.player.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Settings::default());
        let mut state2 = GameState::new(99999, Settings::default());

        let inputs = [
            TickInput {
                move_axis: 1.0,
                ..Default::default()
            },
            TickInput {
                move_axis: 1.0,
                jump: true,
                ..Default::default()
            },
            TickInput {
                pointer: Some(Vec2::new(300.0, 900.0)),
                pointer_pressed: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.grid, state2.grid);
        assert_eq!(state1.player.body, state2.player.body);
        assert_eq!(state1.player.hp, state2.player.hp);
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.body, b.body);
            assert_eq!(a.dead, b.dead);
        }
    }
}
