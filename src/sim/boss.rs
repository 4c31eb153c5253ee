//! Boss mode cycle and ranged attacks
//!
//! The boss alternates between a vulnerable NORMAL phase and an invulnerable
//! REFLECT phase on a fixed timer, independent of anything the player does.
//! A separate cooldown gates its ranged attack. Movement is shared with the
//! ghosts (wall-bounce random walk, see `movement`).

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::PROJECTILE_SIZE;
use crate::sprites::SpriteHandle;
use crate::tuning::Tuning;

use super::actor::Actor;

/// The boss: an AI actor with lives, a phase timer and an attack cooldown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    pub actor: Actor,
    /// Hits remaining; the boss is removed when this reaches 0
    pub lives: u8,
    /// True during the REFLECT phase
    pub reflecting: bool,
    /// Ticks left in the current phase
    pub mode_ticks: u32,
    /// Ticks until the next ranged attack is allowed
    pub attack_cooldown: u32,
}

impl Boss {
    pub fn new(actor: Actor, tuning: &Tuning) -> Self {
        Self {
            actor,
            lives: tuning.boss_lives,
            reflecting: false,
            mode_ticks: tuning.boss_normal_ticks,
            attack_cooldown: 0,
        }
    }

    /// Advance the phase timer and attack cooldown by one tick. The phase
    /// flips unconditionally on expiry, regardless of combat outcomes.
    pub fn advance(&mut self, tuning: &Tuning) {
        self.mode_ticks = self.mode_ticks.saturating_sub(1);
        if self.mode_ticks == 0 {
            self.reflecting = !self.reflecting;
            self.mode_ticks = if self.reflecting {
                tuning.boss_reflect_ticks
            } else {
                tuning.boss_normal_ticks
            };
            log::debug!(
                "boss phase -> {}",
                if self.reflecting { "reflect" } else { "normal" }
            );
        }
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
    }

    /// Apply one point of damage. Ignored while reflecting.
    /// Returns whether the boss is still alive.
    pub fn take_damage(&mut self) -> bool {
        if self.reflecting {
            return true;
        }
        self.lives = self.lives.saturating_sub(1);
        self.lives > 0
    }

    /// Fire a projectile at `target` if neither reflecting nor cooling down.
    /// The shot spawns at the boss's center, moving at boss speed plus the
    /// tuned bonus, aimed at the target's center.
    pub fn long_range_attack(
        &mut self,
        target: &Actor,
        tuning: &Tuning,
        sprite: SpriteHandle,
    ) -> Option<Actor> {
        if self.reflecting || self.attack_cooldown > 0 {
            return None;
        }
        self.attack_cooldown = tuning.boss_attack_cooldown_ticks;
        let from = self.actor.center();
        let speed = self.actor.speed + tuning.projectile_speed_bonus;
        let velocity = aim(from, target.center(), speed);
        Some(Actor::projectile(from, PROJECTILE_SIZE, velocity, speed, sprite))
    }
}

/// Velocity of magnitude `speed` pointing from `from` toward `to`, rounded
/// to integer components. Coincident points aim straight down.
fn aim(from: IVec2, to: IVec2, speed: i32) -> IVec2 {
    let delta = to - from;
    if delta == IVec2::ZERO {
        return IVec2::new(0, speed);
    }
    let v = delta.as_vec2().normalize() * speed as f32;
    IVec2::new(v.x.round() as i32, v.y.round() as i32)
}
