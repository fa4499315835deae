//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded noise and RNG only
//! - Stable iteration order (grid row-major, enemies by index)
//! - No rendering or platform dependencies

pub mod block;
pub mod collision;
pub mod grid;
pub mod interaction;
pub mod noise;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod worldgen;

pub use block::{BlockKind, BlockProps, Hardness, SKY_COLOR};
pub use collision::{Aabb, Body, VerticalContact, box_collides};
pub use grid::TileGrid;
pub use interaction::{Mining, melee_attack, place_block, resolve_contact, spawn_debris};
pub use noise::Perlin;
pub use snapshot::Snapshot;
pub use state::{Enemy, EnemyBehavior, GameEvent, GamePhase, GameState, Particle, Player};
pub use tick::{TickInput, tick};
pub use worldgen::{generate_world, generate_world_with};
