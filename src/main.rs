//! Tile Sandbox entry point
//!
//! Headless runner: generates a world, plays a short scripted session and
//! prints the area around the player plus a JSON snapshot.
//!
//! Usage: `tile-sandbox [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use glam::{IVec2, Vec2};

    use tile_sandbox::consts::*;
    use tile_sandbox::sim::{BlockKind, GameEvent, GameState, Snapshot, TickInput, tick};
    use tile_sandbox::{Settings, parse_seed, pixel_to_cell};

    /// Cells shown around the player in the text view
    const VIEW_COLS: i32 = 60;
    const VIEW_ROWS: i32 = 24;

    pub fn run() {
        env_logger::init();
        log::info!("Tile Sandbox (headless) starting...");

        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(text) => parse_seed(&text),
            None => rand::random::<u64>(),
        };
        let settings = match args.next() {
            Some(path) => Settings::load_from(Path::new(&path)),
            None => Settings::default(),
        };

        let mut state = GameState::new(seed, settings);
        run_session(&mut state);

        println!("seed {} after {} ticks", state.seed, state.time_ticks);
        print!("{}", render_view(&state));

        match serde_json::to_string_pretty(&Snapshot::capture(&state)) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }

    /// Walk, dig, build and swing at whatever is close
    fn run_session(state: &mut GameState) {
        // --- WALK ---
        for i in 0..120 {
            let input = TickInput {
                move_axis: 1.0,
                jump: i % 40 == 0,
                ..Default::default()
            };
            tick(state, &input);
        }
        settle(state, 30);

        // --- MINE ---
        // The cell under the player's feet
        let feet = state.player.body.aabb().max() - Vec2::new(PLAYER_WIDTH * 0.5, 0.0);
        let target = feet + Vec2::new(0.0, TILE_SIZE * 0.5);
        let cell = pixel_to_cell(target);
        log::info!("Mining cell ({}, {})", cell.x, cell.y);
        tick(
            state,
            &TickInput {
                pointer: Some(target),
                pointer_pressed: true,
                ..Default::default()
            },
        );
        for _ in 0..120 {
            if mined(state) || state.mining.target().is_none() {
                break;
            }
            tick(
                state,
                &TickInput {
                    pointer: Some(target),
                    ..Default::default()
                },
            );
        }
        tick(
            state,
            &TickInput {
                pointer: Some(target),
                pointer_released: true,
                ..Default::default()
            },
        );
        settle(state, 30);

        // --- BUILD ---
        let selected = BlockKind::from_hotbar(2).unwrap_or_default();
        let beside = state.player.body.aabb().center() + Vec2::new(TILE_SIZE * 1.5, 0.0);
        tick(
            state,
            &TickInput {
                pointer: Some(beside),
                place: true,
                selected_block: selected,
                ..Default::default()
            },
        );

        // --- FIGHT ---
        let player_pos = state.player.body.pos;
        let closest = state
            .live_enemies()
            .map(|e| e.body.aabb().center())
            .find(|c| c.distance(player_pos) < MELEE_RANGE);
        if let Some(point) = closest {
            tick(
                state,
                &TickInput {
                    pointer: Some(point),
                    attack: true,
                    ..Default::default()
                },
            );
        }

        settle(state, 10);
    }

    fn mined(state: &GameState) -> bool {
        state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BlockMined { .. }))
    }

    fn settle(state: &mut GameState, ticks: u32) {
        for _ in 0..ticks {
            tick(state, &TickInput::default());
        }
    }

    /// Text view of the cells around the player, with `P` and `E` overlaid
    fn render_view(state: &GameState) -> String {
        let center = pixel_to_cell(state.player.body.aabb().center());
        let left = center.x - VIEW_COLS / 2;
        let top = center.y - VIEW_ROWS / 2;

        let mut rows: Vec<Vec<char>> = (0..VIEW_ROWS)
            .map(|dy| {
                (0..VIEW_COLS)
                    .map(|dx| {
                        state
                            .grid
                            .get(left + dx, top + dy)
                            .map(BlockKind::glyph)
                            .unwrap_or('.')
                    })
                    .collect()
            })
            .collect();

        let mut overlay = |pos: Vec2, mark: char| {
            let cell = pixel_to_cell(pos) - IVec2::new(left, top);
            if (0..VIEW_COLS).contains(&cell.x) && (0..VIEW_ROWS).contains(&cell.y) {
                rows[cell.y as usize][cell.x as usize] = mark;
            }
        };
        for enemy in state.live_enemies() {
            overlay(enemy.body.aabb().center(), 'E');
        }
        overlay(state.player.body.aabb().center(), 'P');

        let mut out = String::with_capacity(((VIEW_COLS + 1) * VIEW_ROWS) as usize);
        for row in rows {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; the library is driven by the host page
}
