//! Game state and core simulation types
//!
//! The grid is owned here and lent to each entity update by reference.

use glam::{IVec2, Vec2};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::collision::{Body, VerticalContact};
use super::grid::TileGrid;
use super::interaction::Mining;
use super::worldgen::generate_world_with;
use crate::consts::*;
use crate::settings::{PhysicsTuning, Settings};

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Ticks are skipped entirely
    Paused,
    /// Player hp reached zero; waits for a restart
    GameOver,
}

/// Things that happened during the last tick, for presentation feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BlockMined { cell: IVec2, kind: BlockKind },
    BlockPlaced { cell: IVec2, kind: BlockKind },
    EnemyHit { index: usize, hp: i32 },
    EnemyKilled { index: usize },
    PlayerHurt { amount: i32, hp: i32 },
    PlayerRespawned,
    PlayerDied,
}

/// The avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub hp: i32,
    /// Ticks of damage immunity left
    pub invulnerable_ticks: u32,
    /// Landed during the last vertical step
    pub on_ground: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            hp: PLAYER_MAX_HP,
            invulnerable_ticks: 0,
            on_ground: false,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Knocked back hard enough that input is ignored
    pub fn is_stunned(&self) -> bool {
        self.body.vel.x.abs() >= STUN_SPEED
    }

    /// Take a hit pushing toward `direction` (-1 left, 1 right).
    ///
    /// Ignored while invulnerable. Returns true if the hit landed.
    pub fn damage(&mut self, amount: i32, direction: f32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.hp -= amount;
        self.invulnerable_ticks = INVULNERABILITY_TICKS;
        self.body.vel = Vec2::new(PLAYER_KNOCKBACK_X * direction.clamp(-1.0, 1.0), PLAYER_KNOCKBACK_Y);
        true
    }

    pub fn tick_invulnerability(&mut self) {
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
    }

    /// One physics step
    pub fn update(&mut self, grid: &TileGrid, move_axis: f32, jump: bool, tuning: &PhysicsTuning) {
        self.tick_invulnerability();

        if self.is_stunned() {
            self.body.vel.x *= AIR_DRAG;
        } else {
            self.body.walk(move_axis, tuning);
        }
        self.body.move_x(grid);

        self.on_ground = false;
        if self.body.move_y(grid, tuning.gravity) == VerticalContact::Landed {
            self.on_ground = true;
            if jump {
                self.body.vel.y = tuning.jump_force;
            }
        }
    }

    /// Put the player back at a spawn point, at rest
    pub fn respawn(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.body.vel = Vec2::ZERO;
    }
}

/// What an enemy does this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    Idle,
    Chasing,
}

impl EnemyBehavior {
    /// Chase when the player is within the aggro radius
    pub fn select(enemy_pos: Vec2, player_pos: Vec2) -> Self {
        if enemy_pos.distance(player_pos) < ENEMY_AGGRO_RADIUS {
            EnemyBehavior::Chasing
        } else {
            EnemyBehavior::Idle
        }
    }

    /// Horizontal velocity for this behavior
    pub fn desired_vx(self, enemy_pos: Vec2, player_pos: Vec2, speed: f32) -> f32 {
        match self {
            EnemyBehavior::Idle => 0.0,
            EnemyBehavior::Chasing => {
                let dx = player_pos.x - enemy_pos.x;
                if dx > ENEMY_DEAD_ZONE {
                    speed
                } else if dx < -ENEMY_DEAD_ZONE {
                    -speed
                } else {
                    0.0
                }
            }
        }
    }
}

/// A hostile slime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub hp: i32,
    /// Dead enemies stay in the list but no longer update
    pub dead: bool,
    pub behavior: EnemyBehavior,
    /// Hit flash ticks left (cosmetic)
    pub flash_ticks: u32,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(ENEMY_SIZE)),
            hp: ENEMY_HP,
            dead: false,
            behavior: EnemyBehavior::Idle,
            flash_ticks: 0,
        }
    }

    /// Returns true if this hit killed it
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.dead {
            return false;
        }
        self.hp -= amount;
        self.flash_ticks = ENEMY_FLASH_TICKS;
        if self.hp <= 0 {
            self.dead = true;
        }
        self.dead
    }

    pub fn update(&mut self, grid: &TileGrid, player_pos: Vec2, tuning: &PhysicsTuning) {
        if self.dead {
            return;
        }

        self.behavior = EnemyBehavior::select(self.body.pos, player_pos);
        self.body.vel.x = self
            .behavior
            .desired_vx(self.body.pos, player_pos, tuning.enemy_speed);

        // Auto-jump when walking into a wall while standing
        if self.body.move_x(grid) && self.body.vel.y == 0.0 {
            self.body.vel.y = tuning.enemy_jump_force;
        }

        self.body.move_y(grid, tuning.gravity);
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_ticks > 0
    }
}

/// A cosmetic debris particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    /// Ticks left
    pub life: u32,
}

impl Particle {
    pub fn update(&mut self) {
        self.vel.y += DEBRIS_GRAVITY;
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }
}

/// RNG stream for enemy placement, separate from terrain
const ENEMY_SPAWN_STREAM: u64 = 0x5EED_E4E7;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// World seed
    pub seed: u64,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub grid: TileGrid,
    pub player: Player,
    /// Where the player respawns after falling out of the world
    pub spawn_point: Vec2,
    /// Spawned once per world, never removed
    pub enemies: Vec<Enemy>,
    pub mining: Mining,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Events from the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Generate a world from `seed` and populate it
    pub fn new(seed: u64, settings: Settings) -> Self {
        let (width, height) = settings.world_size.dimensions();
        let grid = generate_world_with(seed, width, height, &settings.generation);
        Self::from_grid(seed, settings, grid)
    }

    /// Populate an existing grid with a player and enemies
    pub fn from_grid(seed: u64, settings: Settings, grid: TileGrid) -> Self {
        let spawn_point = player_spawn(&grid);
        let enemies = spawn_enemies(&grid, seed, settings.enemy_count);
        log::info!(
            "New game (seed {}): player at ({:.0}, {:.0}), {} enemies",
            seed,
            spawn_point.x,
            spawn_point.y,
            enemies.len()
        );

        Self {
            seed,
            settings,
            phase: GamePhase::Playing,
            time_ticks: 0,
            grid,
            player: Player::new(spawn_point),
            spawn_point,
            enemies,
            mining: Mining::default(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Throw away the world and every entity and start over
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting with seed {}", seed);
        *self = Self::new(seed, self.settings.clone());
    }

    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| !e.dead)
    }
}

/// Player spawn point: fixed x, above the surface of that column
fn player_spawn(grid: &TileGrid) -> Vec2 {
    let x = PLAYER_SPAWN_X.min((grid.pixel_size().x - PLAYER_WIDTH).max(0.0));
    let column = (x / TILE_SIZE).floor() as i32;
    let y = grid.surface_height(column) as f32 * TILE_SIZE - PLAYER_SPAWN_CLEARANCE;
    Vec2::new(x, y)
}

/// Enemies at seeded random columns, just above the surface
fn spawn_enemies(grid: &TileGrid, seed: u64, count: usize) -> Vec<Enemy> {
    let max_x = grid.pixel_size().x - ENEMY_SIZE;
    if max_x <= 0.0 {
        return Vec::new();
    }

    let mut rng = Pcg32::new(seed, ENEMY_SPAWN_STREAM);
    (0..count)
        .map(|_| {
            let x = rng.random_range(0.0..max_x);
            let column = (x / TILE_SIZE).floor() as i32;
            let y = grid.surface_height(column) as f32 * TILE_SIZE - ENEMY_SPAWN_CLEARANCE;
            Enemy::new(Vec2::new(x, y))
        })
        .collect()
}
