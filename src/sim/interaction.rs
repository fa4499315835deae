//! Mining, building and combat resolution

use glam::{IVec2, Vec2};

use super::block::BlockKind;
use super::grid::TileGrid;
use super::state::{Enemy, Particle, Player};
use crate::consts::*;
use crate::{cell_to_pixel, pixel_to_cell};

/// Block currently being mined
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mining {
    target: Option<IVec2>,
    /// Ticks spent on the current target
    progress: u32,
}

impl Mining {
    pub fn target(&self) -> Option<IVec2> {
        self.target
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Start mining a cell from scratch
    pub fn begin(&mut self, cell: IVec2) {
        self.target = Some(cell);
        self.progress = 0;
    }

    /// Drop the target and any partial progress
    pub fn release(&mut self) {
        self.target = None;
        self.progress = 0;
    }

    /// Advance one tick. Returns the cell and kind if the block broke.
    ///
    /// Unbreakable blocks hold the target without progress. A target that
    /// turned to air (or lies outside the grid) is dropped.
    pub fn step(&mut self, grid: &mut TileGrid) -> Option<(IVec2, BlockKind)> {
        let cell = self.target?;
        let kind = match grid.get(cell.x, cell.y) {
            Some(kind) if kind != BlockKind::Air => kind,
            _ => {
                self.release();
                return None;
            }
        };
        let health = kind.mining_health()?;

        self.progress += 1;
        if self.progress < health {
            return None;
        }

        grid.set(cell.x, cell.y, BlockKind::Air);
        self.release();
        Some((cell, kind))
    }

    /// Progress toward breaking the target, 0..1
    pub fn fraction(&self, grid: &TileGrid) -> Option<f32> {
        let cell = self.target?;
        let health = grid.get(cell.x, cell.y)?.mining_health()?;
        Some((self.progress as f32 / health as f32).min(1.0))
    }
}

/// Overwrite the cell under `point` with `kind`. Returns the cell if it was in bounds.
pub fn place_block(grid: &mut TileGrid, point: Vec2, kind: BlockKind) -> Option<IVec2> {
    let cell = pixel_to_cell(point);
    grid.set(cell.x, cell.y, kind).then_some(cell)
}

/// Melee attack at `point`.
///
/// The first live enemy whose box contains the point and that is within melee
/// range of the player takes a hit and is knocked away. Returns its index.
pub fn melee_attack(enemies: &mut [Enemy], player: &Player, point: Vec2) -> Option<usize> {
    let player_pos = player.body.pos;
    let (index, enemy) = enemies.iter_mut().enumerate().find(|(_, enemy)| {
        !enemy.dead
            && enemy.body.aabb().contains(point)
            && player_pos.distance(enemy.body.pos) < MELEE_RANGE
    })?;

    enemy.take_damage(MELEE_DAMAGE);
    let away = if enemy.body.pos.x - player_pos.x > 0.0 { 1.0 } else { -1.0 };
    enemy.body.vel = Vec2::new(MELEE_KNOCKBACK_X * away, MELEE_KNOCKBACK_Y);
    Some(index)
}

/// Contact damage from a live enemy overlapping the player.
///
/// Returns true if the player took damage.
pub fn resolve_contact(player: &mut Player, enemy: &Enemy) -> bool {
    if enemy.dead || player.is_invulnerable() {
        return false;
    }
    if !player.body.aabb().overlaps(&enemy.body.aabb()) {
        return false;
    }
    // Push the player away from the enemy
    let direction = if player.body.pos.x < enemy.body.pos.x { -1.0 } else { 1.0 };
    player.damage(ENEMY_DAMAGE, direction)
}

/// Burst of debris from a broken block
pub fn spawn_debris(particles: &mut Vec<Particle>, cell: IVec2, color: u32, time_ticks: u64) {
    let center = cell_to_pixel(cell) + Vec2::splat(TILE_SIZE * 0.5);
    for j in 0..DEBRIS_PER_BLOCK {
        let hash = (time_ticks as u32)
            .wrapping_mul(2654435761)
            .wrapping_add(j * 7919)
            .wrapping_add((cell.x as u32).wrapping_mul(31))
            .wrapping_add(cell.y as u32);
        let rand1 = (hash % 1000) as f32 / 1000.0 - 0.5; // -0.5 to 0.5
        let rand2 = ((hash >> 10) % 1000) as f32 / 1000.0; // 0 to 1
        particles.push(Particle {
            pos: center,
            vel: Vec2::new(rand1 * 6.0, -2.0 - rand2 * 4.0),
            color,
            life: DEBRIS_LIFE_TICKS,
        });
    }

    if particles.len() > MAX_PARTICLES {
        let excess = particles.len() - MAX_PARTICLES;
        particles.drain(..excess);
    }
}
