//! Entities and movable actors
//!
//! An `Entity` is a rectangle plus an opaque sprite handle; walls, food and
//! knives are plain entities. An `Actor` wraps an entity with heading,
//! velocity and tile-interpolation state; the player, ghosts and projectiles
//! are actors. The boss wraps an actor further (see `boss`).

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sprites::SpriteHandle;

use super::grid::Rect;

/// Facing direction, plus the projectile kinematics tag.
///
/// `Projectile` is a type discriminant, not a heading: projectile actors keep
/// the aimed velocity assigned at spawn and never re-derive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
    Projectile,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this heading; zero for `None` and `Projectile`.
    /// Screen coordinates: y grows downward.
    #[inline]
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::None | Direction::Projectile => IVec2::ZERO,
        }
    }

    #[inline]
    pub fn is_cardinal(self) -> bool {
        !matches!(self, Direction::None | Direction::Projectile)
    }

    /// Uniform draw from the four cardinal headings
    pub fn random_cardinal(rng: &mut impl Rng) -> Direction {
        Self::CARDINALS[rng.random_range(0..4)]
    }
}

/// A positioned rectangle with an opaque visual handle.
/// The simulation never interprets the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub rect: Rect,
    pub sprite: SpriteHandle,
}

impl Entity {
    pub fn new(rect: Rect, sprite: SpriteHandle) -> Self {
        Self { rect, sprite }
    }
}

/// A movable entity.
///
/// The player moves tile-at-a-time: `begin_move` commits a tile-aligned
/// target and `glide` interpolates toward it. AI actors and projectiles are
/// velocity-driven and ignore the target/moving fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub entity: Entity,
    pub direction: Direction,
    pub velocity: IVec2,
    pub speed: i32,
    pub moving: bool,
    /// Pending tile-aligned destination while `moving`
    pub target: IVec2,
    /// Level-start position, restored by `reset`
    pub spawn: IVec2,
}

impl Actor {
    pub fn new(rect: Rect, speed: i32, sprite: SpriteHandle) -> Self {
        let pos = rect.pos();
        Self {
            entity: Entity::new(rect, sprite),
            direction: Direction::None,
            velocity: IVec2::ZERO,
            speed,
            moving: false,
            target: pos,
            spawn: pos,
        }
    }

    /// Projectile actor centered on `center`, carrying a pre-aimed velocity
    pub fn projectile(center: IVec2, size: i32, velocity: IVec2, speed: i32, sprite: SpriteHandle) -> Self {
        let rect = Rect::centered(center, size);
        let pos = rect.pos();
        Self {
            entity: Entity::new(rect, sprite),
            direction: Direction::Projectile,
            velocity,
            speed,
            moving: true,
            target: pos,
            spawn: pos,
        }
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        self.entity.rect.center()
    }

    /// Derive velocity from the current heading at this actor's speed.
    /// Projectiles keep their aimed velocity.
    pub fn update_velocity(&mut self) {
        match self.direction {
            Direction::Projectile => {}
            dir => self.velocity = dir.unit() * self.speed,
        }
    }

    /// Commit a tile move: heading, target and moving flag in one step
    pub fn begin_move(&mut self, direction: Direction, target: IVec2) {
        self.direction = direction;
        self.target = target;
        self.moving = true;
        self.update_velocity();
    }

    /// Step toward the target by `step` pixels, x-axis first, snapping to
    /// the exact target and clearing `moving` on arrival.
    pub fn glide(&mut self, step: i32) {
        if !self.moving {
            return;
        }
        let rect = &mut self.entity.rect;
        if rect.x != self.target.x {
            let d = self.target.x - rect.x;
            rect.x = if d.abs() <= step { self.target.x } else { rect.x + step * d.signum() };
        } else if rect.y != self.target.y {
            let d = self.target.y - rect.y;
            rect.y = if d.abs() <= step { self.target.y } else { rect.y + step * d.signum() };
        }
        if rect.x == self.target.x && rect.y == self.target.y {
            self.moving = false;
        }
    }

    /// Return to the level-start position with all motion state cleared
    pub fn reset(&mut self) {
        self.entity.rect.set_pos(self.spawn);
        self.target = self.spawn;
        self.direction = Direction::None;
        self.velocity = IVec2::ZERO;
        self.moving = false;
    }

    /// Rebind the spawn point (level load) and reset to it
    pub fn respawn_at(&mut self, pos: IVec2) {
        self.spawn = pos;
        self.reset();
    }
}
