//! Grid collision and per-tick integration
//!
//! Bodies are axis-aligned boxes anchored at their top-left corner. A body
//! collides when any of its four corners sits in a solid cell. Motion is
//! resolved one axis at a time by moving, sampling, and undoing the move on
//! contact. This is not swept collision: fast bodies can tunnel through thin
//! walls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::TileGrid;
use crate::consts::STOP_EPSILON;
use crate::settings::PhysicsTuning;

/// Axis-aligned box, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.pos,
            Vec2::new(max.x, self.pos.y),
            Vec2::new(self.pos.x, max.y),
            max,
        ]
    }

    /// Strict overlap; touching edges don't count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.pos.x < b_max.x && a_max.x > other.pos.x && self.pos.y < b_max.y && a_max.y > other.pos.y
    }

    /// Strictly inside
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x > self.pos.x && point.x < max.x && point.y > self.pos.y && point.y < max.y
    }
}

/// Whether a box at `pos` with `size` touches a solid cell at any corner
pub fn box_collides(grid: &TileGrid, pos: Vec2, size: Vec2) -> bool {
    Aabb::new(pos, size)
        .corners()
        .iter()
        .any(|c| grid.is_solid(c.x, c.y))
}

/// Outcome of the vertical step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalContact {
    /// No contact this tick
    Airborne,
    /// Hit the ground while falling
    Landed,
    /// Hit something while rising (or at rest with no fall)
    Ceiling,
}

/// A moving box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn collides(&self, grid: &TileGrid) -> bool {
        box_collides(grid, self.pos, self.size)
    }

    /// Input acceleration, speed clamp, friction, then snap tiny speeds to zero.
    ///
    /// `axis` is -1 (left), 0 or 1 (right). Friction applies every tick.
    pub fn walk(&mut self, axis: f32, tuning: &PhysicsTuning) {
        self.vel.x += axis.clamp(-1.0, 1.0) * tuning.move_accel;
        self.vel.x = self.vel.x.clamp(-tuning.max_speed, tuning.max_speed);
        self.vel.x *= tuning.friction;
        self.snap_horizontal();
    }

    /// Zero horizontal speeds below the stop threshold
    pub fn snap_horizontal(&mut self) {
        if self.vel.x.abs() < STOP_EPSILON {
            self.vel.x = 0.0;
        }
    }

    /// Apply horizontal velocity. On contact the move is undone and vx zeroed.
    ///
    /// Returns true if blocked.
    pub fn move_x(&mut self, grid: &TileGrid) -> bool {
        let prev = self.pos.x;
        self.pos.x += self.vel.x;
        if self.collides(grid) {
            self.pos.x = prev;
            self.vel.x = 0.0;
            return true;
        }
        false
    }

    /// Add gravity, apply vertical velocity, resolve contact.
    pub fn move_y(&mut self, grid: &TileGrid, gravity: f32) -> VerticalContact {
        self.vel.y += gravity;
        let prev = self.pos.y;
        self.pos.y += self.vel.y;
        if !self.collides(grid) {
            return VerticalContact::Airborne;
        }

        self.pos.y = prev;
        let falling = self.vel.y > 0.0;
        self.vel.y = 0.0;
        if falling {
            VerticalContact::Landed
        } else {
            VerticalContact::Ceiling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TILE_SIZE;
    use crate::sim::block::BlockKind;

    /// 10x10 grid with a stone floor on row 8 and a wall in column 6
    fn test_grid() -> TileGrid {
        let mut grid = TileGrid::new(10, 10);
        for x in 0..10 {
            grid.set(x, 8, BlockKind::Stone);
        }
        for y in 0..8 {
            grid.set(6, y, BlockKind::Stone);
        }
        grid
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(20.0, 40.0));
        let b = Aabb::new(Vec2::new(10.0, 30.0), Vec2::splat(32.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching edges only
        let c = Aabb::new(Vec2::new(20.0, 0.0), Vec2::splat(32.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_contains() {
        let a = Aabb::new(Vec2::new(10.0, 10.0), Vec2::splat(32.0));
        assert!(a.contains(Vec2::new(20.0, 20.0)));
        assert!(!a.contains(Vec2::new(10.0, 20.0)));
        assert!(!a.contains(Vec2::new(50.0, 20.0)));
    }

    #[test]
    fn test_walk_friction_and_snap() {
        let tuning = PhysicsTuning::default();
        let mut body = Body::new(Vec2::ZERO, Vec2::new(20.0, 40.0));
        body.walk(1.0, &tuning);
        assert!((body.vel.x - 0.5 * 0.85).abs() < 1e-6);

        // Held input converges below max speed
        for _ in 0..200 {
            body.walk(1.0, &tuning);
        }
        assert!(body.vel.x <= tuning.max_speed);
        assert!(body.vel.x > 2.0);

        // Released input decays to exactly zero
        for _ in 0..100 {
            body.walk(0.0, &tuning);
        }
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_wall_stops_without_sliding() {
        let grid = test_grid();
        // Right edge at 180, wall starts at 192
        let mut body = Body::new(Vec2::new(160.0, 200.0), Vec2::new(20.0, 40.0));
        body.vel = Vec2::new(15.0, 0.0);
        assert!(body.move_x(&grid));
        assert_eq!(body.pos.x, 160.0);
        assert_eq!(body.vel.x, 0.0);

        body.vel.x = 5.0;
        assert!(!body.move_x(&grid));
        assert_eq!(body.pos.x, 165.0);
    }

    #[test]
    fn test_landing() {
        let grid = test_grid();
        // Floor top at 256; bottom edge at 255.5
        let mut body = Body::new(Vec2::new(40.0, 215.5), Vec2::new(20.0, 40.0));
        body.vel.y = 3.0;
        assert_eq!(body.move_y(&grid, 0.6), VerticalContact::Landed);
        assert_eq!(body.pos.y, 215.5);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_head_bonk() {
        let mut grid = TileGrid::new(4, 4);
        grid.set(1, 0, BlockKind::Dirt);
        let mut body = Body::new(Vec2::new(40.0, 40.0), Vec2::new(20.0, 40.0));
        body.vel.y = -12.0;
        assert_eq!(body.move_y(&grid, 0.6), VerticalContact::Ceiling);
        assert_eq!(body.pos.y, 40.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_free_fall() {
        let grid = TileGrid::new(4, 4);
        let mut body = Body::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 40.0));
        assert_eq!(body.move_y(&grid, 0.6), VerticalContact::Airborne);
        assert!((body.pos.y - 10.6).abs() < 1e-6);
    }

    #[test]
    fn test_fast_bodies_tunnel() {
        // A one-tile wall at column 2 (x 64..96)
        let mut grid = TileGrid::new(10, 4);
        for y in 0..4 {
            grid.set(2, y, BlockKind::Stone);
        }
        let mut body = Body::new(Vec2::new(20.0, 10.0), Vec2::new(20.0, 40.0));
        body.vel.x = 80.0;
        // Corners land at 100 and 120, both past the wall
        assert!(!body.move_x(&grid));
        assert_eq!(body.pos.x, 100.0);
        assert!(body.pos.x > 3.0 * TILE_SIZE);
    }

    #[test]
    fn test_outside_grid_is_open() {
        let grid = test_grid();
        assert!(!box_collides(&grid, Vec2::new(-100.0, -100.0), Vec2::splat(32.0)));
        assert!(!box_collides(&grid, Vec2::new(400.0, 0.0), Vec2::splat(32.0)));
    }
}
