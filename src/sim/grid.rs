//! The tile grid
//!
//! Fixed-size row-major array of blocks. Every access goes through a bounds
//! check: reads outside the grid are `None` / not solid, writes are ignored.

use glam::{IVec2, Vec2};

use super::block::BlockKind;
use crate::consts::TILE_SIZE;
use crate::pixel_to_cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<BlockKind>,
}

impl TileGrid {
    /// All-air grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BlockKind::Air; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// World size in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * TILE_SIZE
    }

    #[inline]
    fn index(&self, cx: i32, cy: i32) -> Option<usize> {
        if cx < 0 || cy < 0 {
            return None;
        }
        let (x, y) = (cx as usize, cy as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn in_bounds(&self, cx: i32, cy: i32) -> bool {
        self.index(cx, cy).is_some()
    }

    /// Block at a cell
    pub fn get(&self, cx: i32, cy: i32) -> Option<BlockKind> {
        self.index(cx, cy).map(|i| self.cells[i])
    }

    /// Overwrite a cell. Returns false if out of bounds.
    pub fn set(&mut self, cx: i32, cy: i32, kind: BlockKind) -> bool {
        match self.index(cx, cy) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Block under a pixel
    pub fn block_at(&self, px: f32, py: f32) -> Option<BlockKind> {
        let cell = pixel_to_cell(Vec2::new(px, py));
        self.get(cell.x, cell.y)
    }

    /// Overwrite the cell under a pixel (no-op outside the grid)
    pub fn set_block(&mut self, px: f32, py: f32, kind: BlockKind) {
        let cell = pixel_to_cell(Vec2::new(px, py));
        self.set(cell.x, cell.y, kind);
    }

    /// Whether the pixel blocks movement. Outside the grid is never solid.
    pub fn is_solid(&self, px: f32, py: f32) -> bool {
        self.block_at(px, py).is_some_and(BlockKind::is_solid)
    }

    /// First ground row from the top of a column.
    ///
    /// Returns the grid height for an empty column and 0 for a column outside
    /// the grid.
    pub fn surface_height(&self, column: i32) -> i32 {
        if column < 0 || column as usize >= self.width {
            return 0;
        }
        (0..self.height as i32)
            .find(|&y| self.get(column, y).is_some_and(BlockKind::is_ground))
            .unwrap_or(self.height as i32)
    }

    /// Iterate cells as (cell, kind), row by row
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, BlockKind)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, &kind)| {
            (IVec2::new((i % width) as i32, (i / width) as i32), kind)
        })
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: BlockKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Text dump, one char per cell
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|kind| kind.glyph()));
            out.push('\n');
        }
        out
    }
}
