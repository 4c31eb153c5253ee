//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Integer pixel coordinates, no floating point drift
//! - No rendering or platform dependencies

pub mod actor;
pub mod boss;
pub mod collision;
pub mod grid;
pub mod map;
pub mod movement;
pub mod state;
pub mod tick;

pub use actor::{Actor, Direction, Entity};
pub use boss::Boss;
pub use collision::CollisionOutcome;
pub use grid::Rect;
pub use map::{GameMap, MapError, load_level};
pub use state::{DeathEffect, GameState};
pub use tick::{TickContext, tick};
