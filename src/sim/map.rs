//! Level layouts and level loading
//!
//! Levels are fixed-size character grids: `#` wall, `.` food, `P` player
//! start, `B` boss start, `r`/`g`/`c`/`o` ghosts by color, space empty.
//! The map is immutable once built; loading a level materializes its grid
//! into the entity sets of a `GameState`.

use std::fmt;

use glam::IVec2;
use rand::Rng;

use crate::consts::{BOSS_SIZE, FOOD_SIZE, KNIFE_SIZE, PLAYER_SIZE, PLAYER_STEP, TILE_SIZE};
use crate::sprites::{GhostColor, SpriteKey, SpriteProvider};
use crate::{tile_center, tile_to_px};

use super::actor::{Actor, Direction, Entity};
use super::boss::Boss;
use super::grid::Rect;
use super::state::GameState;

const SYMBOL_WALL: char = '#';
const SYMBOL_FOOD: char = '.';
const SYMBOL_PLAYER: char = 'P';
const SYMBOL_BOSS: char = 'B';
const SYMBOL_EMPTY: char = ' ';

const LEVEL_ONE: [&str; 15] = [
    "####################",
    "#........#.........#",
    "#.##.###.#.###.##..#",
    "#.#.............#..#",
    "#.#.##.######.##.#.#",
    "#......#....#......#",
    "#.####.#.gr.#.####.#",
    "#.#..............#.#",
    "#.#.##.######.##.#.#",
    "#......#....#......#",
    "#.##.#.#....#.#.##.#",
    "#..#.#........#.#..#",
    "##.#.####..####.#.##",
    "#........P.........#",
    "####################",
];

const LEVEL_TWO: [&str; 15] = [
    "####################",
    "#.........#........#",
    "#.#####.#.#.#####..#",
    "#.#...#.#.#.....#..#",
    "#.#.#.#.#.#####.#.##",
    "#...#...#.....#.#..#",
    "###.#####.###.#.##.#",
    "#...#..g......c..#.#",
    "#.###.########.###.#",
    "#.#....o....r....#.#",
    "#.#.##########.#.#.#",
    "#.#.#........#.#.#.#",
    "#...#.######.#.#...#",
    "#.....#..P.....#...#",
    "####################",
];

const LEVEL_THREE: [&str; 15] = [
    "####################",
    "#..................#",
    "#.##.##.####.##.##.#",
    "#.#..............#.#",
    "#.#..............#.#",
    "#....####..####....#",
    "#....#........#....#",
    "#.......B..........#",
    "#....#........#....#",
    "#....####..####....#",
    "#.#..............#.#",
    "#.#....c....o....#.#",
    "#.##.##.####.##.##.#",
    "#........P.........#",
    "####################",
];

/// Construction-time validation failures for custom level sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    NoLevels,
    /// Grid dimensions differ from the first level's
    SizeMismatch { level: usize },
    /// Row length differs within one grid
    RaggedRow { level: usize, row: usize },
    UnknownSymbol { level: usize, row: usize, col: usize, symbol: char },
    MissingPlayerStart { level: usize },
    /// More than one `P` or `B` in one grid
    DuplicateStart { level: usize, symbol: char },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::NoLevels => write!(f, "map has no levels"),
            MapError::SizeMismatch { level } => {
                write!(f, "level {level} has different dimensions than level 1")
            }
            MapError::RaggedRow { level, row } => {
                write!(f, "level {level} row {row} has a different length")
            }
            MapError::UnknownSymbol { level, row, col, symbol } => {
                write!(f, "level {level} row {row} col {col}: unknown symbol {symbol:?}")
            }
            MapError::MissingPlayerStart { level } => {
                write!(f, "level {level} has no player start")
            }
            MapError::DuplicateStart { level, symbol } => {
                write!(f, "level {level} has more than one {symbol:?}")
            }
        }
    }
}

impl std::error::Error for MapError {}

/// Immutable set of level grids. Levels are numbered from 1.
#[derive(Debug, Clone)]
pub struct GameMap {
    grids: Vec<Vec<String>>,
    cols: i32,
    rows: i32,
}

impl GameMap {
    /// The three shipped levels: two corridor mazes and the boss arena
    pub fn builtin() -> Self {
        let grids = [&LEVEL_ONE[..], &LEVEL_TWO[..], &LEVEL_THREE[..]]
            .iter()
            .map(|grid| grid.iter().map(|row| row.to_string()).collect())
            .collect();
        Self {
            grids,
            cols: LEVEL_ONE[0].len() as i32,
            rows: LEVEL_ONE.len() as i32,
        }
    }

    /// Build a map from custom grids, validating dimensions, symbols and
    /// start markers.
    pub fn new(grids: Vec<Vec<String>>) -> Result<Self, MapError> {
        let first = grids.first().ok_or(MapError::NoLevels)?;
        let rows = first.len();
        let cols = first.first().map_or(0, |row| row.chars().count());
        if rows == 0 || cols == 0 {
            return Err(MapError::NoLevels);
        }

        for (i, grid) in grids.iter().enumerate() {
            let level = i + 1;
            if grid.len() != rows {
                return Err(MapError::SizeMismatch { level });
            }
            let mut players = 0;
            let mut bosses = 0;
            for (row, line) in grid.iter().enumerate() {
                if line.chars().count() != cols {
                    return Err(MapError::RaggedRow { level, row });
                }
                for (col, symbol) in line.chars().enumerate() {
                    match symbol {
                        SYMBOL_WALL | SYMBOL_FOOD | SYMBOL_EMPTY => {}
                        SYMBOL_PLAYER => players += 1,
                        SYMBOL_BOSS => bosses += 1,
                        _ if ghost_color(symbol).is_some() => {}
                        _ => {
                            return Err(MapError::UnknownSymbol { level, row, col, symbol });
                        }
                    }
                }
            }
            if players == 0 {
                return Err(MapError::MissingPlayerStart { level });
            }
            if players > 1 {
                return Err(MapError::DuplicateStart { level, symbol: SYMBOL_PLAYER });
            }
            if bosses > 1 {
                return Err(MapError::DuplicateStart { level, symbol: SYMBOL_BOSS });
            }
        }

        Ok(Self { grids, cols: cols as i32, rows: rows as i32 })
    }

    pub fn level_count(&self) -> u32 {
        self.grids.len() as u32
    }

    /// Grid for a 1-based level number. Out-of-range requests fall back to
    /// the first level.
    pub fn grid(&self, level: u32) -> &[String] {
        match level.checked_sub(1).and_then(|i| self.grids.get(i as usize)) {
            Some(grid) => grid,
            None => {
                log::warn!("level {level} out of range, falling back to level 1");
                &self.grids[0]
            }
        }
    }

    /// Board size in pixels
    pub fn board_px(&self) -> IVec2 {
        IVec2::new(self.cols * TILE_SIZE, self.rows * TILE_SIZE)
    }
}

fn ghost_color(symbol: char) -> Option<GhostColor> {
    match symbol {
        'r' => Some(GhostColor::Red),
        'g' => Some(GhostColor::Green),
        'c' => Some(GhostColor::Cyan),
        'o' => Some(GhostColor::Orange),
        _ => None,
    }
}

struct Spawns {
    player: IVec2,
    boss: Option<IVec2>,
    walls: Vec<IVec2>,
    food: Vec<IVec2>,
    ghosts: Vec<(IVec2, GhostColor)>,
}

/// Collect spawn tiles from a grid. Unknown symbols are skipped with a
/// warning; a missing player start falls back to tile (1, 1).
fn parse_grid(grid: &[String]) -> Spawns {
    let mut spawns = Spawns {
        player: IVec2::new(1, 1),
        boss: None,
        walls: Vec::new(),
        food: Vec::new(),
        ghosts: Vec::new(),
    };
    let mut player_seen = false;

    for (row, line) in grid.iter().enumerate() {
        for (col, symbol) in line.chars().enumerate() {
            let tile = IVec2::new(col as i32, row as i32);
            match symbol {
                SYMBOL_WALL => spawns.walls.push(tile),
                SYMBOL_FOOD => spawns.food.push(tile),
                SYMBOL_PLAYER => {
                    spawns.player = tile;
                    player_seen = true;
                }
                SYMBOL_BOSS => spawns.boss = Some(tile),
                SYMBOL_EMPTY => {}
                _ => match ghost_color(symbol) {
                    Some(color) => spawns.ghosts.push((tile, color)),
                    None => log::warn!("skipping unknown symbol {symbol:?} at {row},{col}"),
                },
            }
        }
    }

    if !player_seen {
        log::warn!("grid has no player start, using tile (1, 1)");
    }
    spawns
}

fn tile_rect(tile: IVec2) -> Rect {
    let px = tile_to_px(tile);
    Rect::new(px.x, px.y, TILE_SIZE, TILE_SIZE)
}

/// Materialize `state.level` from the map: rebuild every entity set, keep
/// score/lives/weapon intact, move the player to the level's start tile.
pub fn load_level(state: &mut GameState, map: &GameMap, sprites: &dyn SpriteProvider) {
    let spawns = parse_grid(map.grid(state.level));
    state.clear_level_entities();
    state.board_px = map.board_px();

    for tile in &spawns.walls {
        state
            .walls
            .push(Entity::new(tile_rect(*tile), sprites.sprite(SpriteKey::Wall)));
    }
    for tile in &spawns.food {
        let rect = Rect::centered(tile_center(*tile), FOOD_SIZE);
        state.food.push(Entity::new(rect, sprites.sprite(SpriteKey::Food)));
    }

    // Knives sit on a random sample of distinct food tiles, clamped to the
    // pool when the level has fewer food tiles than requested.
    let mut pool = spawns.food.clone();
    let requested = state.tuning.knives_per_level;
    for _ in 0..requested.min(pool.len()) {
        let picked = pool.swap_remove(state.rng.random_range(0..pool.len()));
        let rect = Rect::centered(tile_center(picked), KNIFE_SIZE);
        state.knives.push(Entity::new(rect, sprites.sprite(SpriteKey::Knife)));
    }

    for (tile, color) in &spawns.ghosts {
        let rect = Rect::new(tile_to_px(*tile).x, tile_to_px(*tile).y, PLAYER_SIZE, PLAYER_SIZE);
        let mut ghost = Actor::new(rect, state.tuning.ghost_speed, sprites.sprite(SpriteKey::Ghost { color: *color }));
        ghost.direction = Direction::random_cardinal(&mut state.rng);
        ghost.update_velocity();
        state.ghosts.push(ghost);
    }

    if let Some(tile) = spawns.boss {
        let rect = Rect::centered(tile_center(tile), BOSS_SIZE);
        let mut actor = Actor::new(rect, state.tuning.boss_speed, sprites.sprite(SpriteKey::Boss { reflecting: false }));
        actor.direction = Direction::random_cardinal(&mut state.rng);
        actor.update_velocity();
        state.boss = Some(Boss::new(actor, &state.tuning));
    }

    state.player.speed = PLAYER_STEP;
    state.player.respawn_at(tile_to_px(spawns.player));
    state.player.entity.sprite = sprites.sprite(SpriteKey::Player {
        facing: state.player.direction,
        armed: state.has_knife,
    });
    state.level_load_pending = false;

    log::info!(
        "level {} loaded: {} walls, {} food, {} knives, {} ghosts, boss {}",
        state.level,
        state.walls.len(),
        state.food.len(),
        state.knives.len(),
        state.ghosts.len(),
        if state.boss.is_some() { "present" } else { "absent" },
    );
}
