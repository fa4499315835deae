//! Tile Sandbox - A tile-based 2D sandbox world simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain generation, tile grid, physics, combat)
//! - `settings`: Data-driven tuning and world presets

pub mod settings;
pub mod sim;

pub use settings::{GenParams, PhysicsTuning, Settings, WorldSize};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Side length of one tile in pixels
    pub const TILE_SIZE: f32 = 32.0;

    /// Default world dimensions (cells)
    pub const WORLD_WIDTH: usize = 100;
    pub const WORLD_HEIGHT: usize = 60;

    /// Physics (per tick)
    pub const GRAVITY: f32 = 0.6;
    pub const MOVE_SPEED: f32 = 0.5; // Acceleration
    pub const MAX_SPEED: f32 = 6.0;
    pub const FRICTION: f32 = 0.85;
    pub const JUMP_FORCE: f32 = -12.0;
    /// Horizontal speeds below this snap to zero
    pub const STOP_EPSILON: f32 = 0.1;

    /// Player
    pub const PLAYER_WIDTH: f32 = 20.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_MAX_HP: i32 = 100;
    pub const PLAYER_SPAWN_X: f32 = 200.0;
    /// Spawn this far above the surface
    pub const PLAYER_SPAWN_CLEARANCE: f32 = 100.0;
    pub const INVULNERABILITY_TICKS: u32 = 60;
    /// Velocity imparted on the player by a hit
    pub const PLAYER_KNOCKBACK_X: f32 = 10.0;
    pub const PLAYER_KNOCKBACK_Y: f32 = -5.0;
    /// At or above this horizontal speed the player is stunned
    pub const STUN_SPEED: f32 = 8.0;
    pub const AIR_DRAG: f32 = 0.95;
    /// Falling this far below the world resets the player to spawn
    pub const FALL_RESET_MARGIN: f32 = 1000.0;

    /// Enemy
    pub const ENEMY_SIZE: f32 = TILE_SIZE;
    pub const ENEMY_HP: i32 = 3;
    pub const ENEMY_SPEED: f32 = 1.5;
    pub const ENEMY_COUNT: usize = 8;
    pub const ENEMY_AGGRO_RADIUS: f32 = 400.0;
    pub const ENEMY_DEAD_ZONE: f32 = 10.0;
    pub const ENEMY_JUMP_FORCE: f32 = -9.0;
    pub const ENEMY_SPAWN_CLEARANCE: f32 = 50.0;
    /// Contact damage dealt to the player
    pub const ENEMY_DAMAGE: i32 = 10;
    /// Hit flash length (~100 ms at 60 Hz)
    pub const ENEMY_FLASH_TICKS: u32 = 6;

    /// Combat
    pub const MELEE_RANGE: f32 = 150.0;
    pub const MELEE_DAMAGE: i32 = 1;
    pub const MELEE_KNOCKBACK_X: f32 = 5.0;
    pub const MELEE_KNOCKBACK_Y: f32 = -5.0;

    /// Debris particles
    pub const DEBRIS_PER_BLOCK: u32 = 8;
    pub const DEBRIS_LIFE_TICKS: u32 = 30;
    pub const DEBRIS_GRAVITY: f32 = 0.3;
    pub const MAX_PARTICLES: usize = 256;
}

/// Convert a pixel position to the cell that contains it.
///
/// Uses floor division so negative pixels map to negative cells.
#[inline]
pub fn pixel_to_cell(pos: Vec2) -> IVec2 {
    let tile = consts::TILE_SIZE;
    IVec2::new((pos.x / tile).floor() as i32, (pos.y / tile).floor() as i32)
}

/// Top-left pixel of a cell
#[inline]
pub fn cell_to_pixel(cell: IVec2) -> Vec2 {
    cell.as_vec2() * consts::TILE_SIZE
}

/// Parse a seed string, falling back to OS randomness when it is not a number.
pub fn parse_seed(text: &str) -> u64 {
    let trimmed = text.trim();
    if let Ok(seed) = trimmed.parse::<u64>() {
        return seed;
    }
    // Fractional seeds (e.g. "0.1234") are scaled to 32.32 fixed point
    if let Ok(seed) = trimmed.parse::<f64>() {
        if seed.is_finite() {
            return (seed.abs() * 4_294_967_296.0) as u64;
        }
    }
    let seed = rand::random::<u64>();
    log::warn!("Invalid seed {:?}, using random seed {}", text, seed);
    seed
}
