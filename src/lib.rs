//! Maze Muncher - a tile-based maze arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `input`: Held-key tracking with last-pressed-wins steering
//! - `sprites`: Sprite key to atlas handle mapping
//! - `audio`: Sound effect sink abstraction
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod input;
pub mod sim;
pub mod sprites;
pub mod tuning;

pub use input::InputState;
pub use tuning::Tuning;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (20 Hz)
    pub const TICK_MS: u64 = 50;

    /// Board geometry
    pub const TILE_SIZE: i32 = 32;

    /// Player movement: pixels per tick while gliding between tiles
    pub const PLAYER_STEP: i32 = 8;
    /// Glide step with sprint held (one tile in two ticks)
    pub const SPRINT_STEP: i32 = 16;

    /// Entity extents in pixels
    pub const PLAYER_SIZE: i32 = 32;
    pub const BOSS_SIZE: i32 = 48;
    pub const PROJECTILE_SIZE: i32 = 12;
    pub const FOOD_SIZE: i32 = 8;
    pub const KNIFE_SIZE: i32 = 16;
}

/// Top-left pixel of a tile
#[inline]
pub fn tile_to_px(tile: IVec2) -> IVec2 {
    tile * consts::TILE_SIZE
}

/// Center pixel of a tile
#[inline]
pub fn tile_center(tile: IVec2) -> IVec2 {
    tile * consts::TILE_SIZE + IVec2::splat(consts::TILE_SIZE / 2)
}
