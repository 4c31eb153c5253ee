//! Sprite lookup interface
//!
//! The simulation stores only opaque handles on entities and asks a provider
//! for them by key; what a handle means (atlas index, texture id, glyph) is
//! the renderer's business. The indexed provider here is the built-in
//! atlas-index scheme used by the demo binary and the tests.

use crate::sim::actor::Direction;

/// Opaque visual handle. The simulation never inspects it.
pub type SpriteHandle = u32;

/// Ghost palette, straight from the level grid symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GhostColor {
    Red,
    Green,
    Cyan,
    Orange,
}

/// Everything the renderer can be asked to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Wall,
    Food,
    Knife,
    Projectile,
    Player { facing: Direction, armed: bool },
    Ghost { color: GhostColor },
    Boss { reflecting: bool },
    DeathEffect { frame: u8 },
}

/// Sprite source consumed by the simulation at spawn and on state changes
pub trait SpriteProvider {
    fn sprite(&self, key: SpriteKey) -> SpriteHandle;
}

/// Packs each key into a stable atlas index.
///
/// Layout: 0..=3 static entities, 8..=19 player (facing x armed),
/// 24..=27 ghosts, 28..=29 boss, 32.. death effect frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexedSprites;

impl IndexedSprites {
    fn facing_index(facing: Direction) -> u32 {
        match facing {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
            Direction::None => 4,
            Direction::Projectile => 5,
        }
    }

    fn color_index(color: GhostColor) -> u32 {
        match color {
            GhostColor::Red => 0,
            GhostColor::Green => 1,
            GhostColor::Cyan => 2,
            GhostColor::Orange => 3,
        }
    }
}

impl SpriteProvider for IndexedSprites {
    fn sprite(&self, key: SpriteKey) -> SpriteHandle {
        match key {
            SpriteKey::Wall => 0,
            SpriteKey::Food => 1,
            SpriteKey::Knife => 2,
            SpriteKey::Projectile => 3,
            SpriteKey::Player { facing, armed } => {
                8 + Self::facing_index(facing) * 2 + armed as u32
            }
            SpriteKey::Ghost { color } => 24 + Self::color_index(color),
            SpriteKey::Boss { reflecting } => 28 + reflecting as u32,
            SpriteKey::DeathEffect { frame } => 32 + frame as u32,
        }
    }
}
