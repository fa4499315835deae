//! Procedural world generation
//!
//! Terrain height, caves and tree placement come from seeded noise. The
//! remaining randomness (stone/dirt mix, trunk height, canopy fuzz) is drawn
//! from a `Pcg32` seeded with the same seed, so a seed fully determines the
//! world.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::block::BlockKind;
use super::grid::TileGrid;
use super::noise::Perlin;
use crate::settings::GenParams;

/// Rows at the bottom of every column that are always bedrock
pub const BEDROCK_ROWS: usize = 2;

/// z slice the biomass noise is read from
const VEGETATION_PLANE: f64 = 0.5;

/// Only columns in `TREE_MARGIN..width - TREE_MARGIN + 1` may grow trees
const TREE_MARGIN: usize = 3;

/// Generate a world with default terrain parameters
pub fn generate_world(seed: u64, width: usize, height: usize) -> TileGrid {
    generate_world_with(seed, width, height, &GenParams::default())
}

/// Generate a world
pub fn generate_world_with(seed: u64, width: usize, height: usize, params: &GenParams) -> TileGrid {
    let noise = Perlin::from_seed(seed);
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut grid = TileGrid::new(width, height);

    let surfaces: Vec<i32> = (0..width)
        .map(|x| surface_row(&noise, x as i32, params))
        .collect();

    let stone_row = height as f64 * params.stone_depth_ratio;
    let floor_row = height.saturating_sub(BEDROCK_ROWS) as i32;

    for (x, &surface) in surfaces.iter().enumerate() {
        let x = x as i32;
        for y in 0..height as i32 {
            let kind = if y >= floor_row {
                BlockKind::Bedrock
            } else if y < surface {
                BlockKind::Air
            } else if y == surface {
                BlockKind::Grass
            } else {
                let cave = noise.noise(
                    x as f64 * params.cave_frequency,
                    y as f64 * params.cave_frequency,
                    0.5,
                );
                if cave > params.cave_threshold {
                    BlockKind::Air
                } else if y as f64 > stone_row && rng.random_bool(params.stone_chance.clamp(0.0, 1.0)) {
                    BlockKind::Stone
                } else {
                    BlockKind::Dirt
                }
            };
            grid.set(x, y, kind);
        }
    }

    // Vegetation pass runs after all terrain so canopies aren't cut by later columns
    let mut trees = 0;
    let last_tree_column = width.saturating_sub(TREE_MARGIN - 1);
    for x in TREE_MARGIN..last_tree_column {
        let surface = surfaces[x];
        let x = x as i32;
        if biomass(&noise, x as f64 * 12.5) > params.tree_threshold
            && grid.get(x, surface) == Some(BlockKind::Grass)
        {
            grow_tree(&mut grid, &mut rng, x, surface - 1);
            trees += 1;
        }
    }

    log::info!(
        "Generated {}x{} world (seed {}): {} trees, {} stone, {} air",
        width,
        height,
        seed,
        trees,
        grid.count(BlockKind::Stone),
        grid.count(BlockKind::Air)
    );

    grid
}

/// Surface row for a column
pub fn surface_row(noise: &Perlin, column: i32, params: &GenParams) -> i32 {
    let n = noise.noise(column as f64 * params.height_frequency, 0.0, 0.0);
    (params.base_height + n * params.height_amplitude).round() as i32
}

/// Low-frequency shape plus a half-weight high-frequency detail term.
///
/// Sampled off the integer lattice plane: on `z = 0` the noise never rises
/// above 0.5 and the sum can't reach the tree threshold.
pub fn biomass(noise: &Perlin, x: f64) -> f64 {
    let low = noise.noise(x * 0.05, 0.0, VEGETATION_PLANE);
    let high = noise.noise(x * 0.5, 0.0, VEGETATION_PLANE) * 0.5;
    low + high
}

/// Grow a tree whose trunk starts at (base_x, base_y) and goes up
fn grow_tree(grid: &mut TileGrid, rng: &mut Pcg32, base_x: i32, base_y: i32) {
    let height = rng.random_range(4..=6);

    for i in 0..height {
        grid.set(base_x, base_y - i, BlockKind::Wood);
    }

    // Roughly round canopy
    let top_y = base_y - height;
    for lx in base_x - 2..=base_x + 2 {
        for ly in top_y - 2..=top_y + 1 {
            // Keep the trunk
            if lx == base_x && ly > top_y {
                continue;
            }
            // Fuzzy corners
            if (lx - base_x).abs() == 2 && (ly - top_y).abs() == 2 && rng.random_bool(0.5) {
                continue;
            }
            grid.set(lx, ly, BlockKind::Leaves);
        }
    }
}
