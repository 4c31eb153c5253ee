//! Data-driven game balance
//!
//! Every gameplay number that is balance rather than geometry lives here, so
//! a JSON blob can re-tune the game without touching code. Missing fields
//! fall back to the defaults, so partial overrides are fine.

use serde::{Deserialize, Serialize};

/// Gameplay balance table, carried inside `GameState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player lives at the start of a run
    pub starting_lives: u8,
    /// Points per food item
    pub food_points: u32,
    /// Bounty for defeating the boss
    pub boss_points: u32,
    /// Knives placed per level, clamped to the number of food tiles
    pub knives_per_level: usize,
    /// Ghost travel speed, px per tick
    pub ghost_speed: i32,
    /// Boss travel speed, px per tick
    pub boss_speed: i32,
    /// Hits the boss absorbs before it is defeated
    pub boss_lives: u8,
    /// Length of the boss's vulnerable phase, ticks
    pub boss_normal_ticks: u32,
    /// Length of the boss's reflect phase, ticks
    pub boss_reflect_ticks: u32,
    /// Delay between boss ranged attacks, ticks
    pub boss_attack_cooldown_ticks: u32,
    /// Added to boss speed for its projectiles
    pub projectile_speed_bonus: i32,
    /// Pause between clearing a level and loading the next, ticks
    pub level_transition_ticks: u32,
    /// Input lockout after game over / victory before a restart counts
    pub restart_debounce_ticks: u32,
    /// Lifetime of a ghost death animation, ticks
    pub death_effect_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            food_points: 10,
            boss_points: 1000,
            knives_per_level: 2,
            ghost_speed: 2,
            boss_speed: 2,
            boss_lives: 3,
            boss_normal_ticks: 200,
            boss_reflect_ticks: 100,
            boss_attack_cooldown_ticks: 40,
            projectile_speed_bonus: 2,
            level_transition_ticks: 60,
            restart_debounce_ticks: 30,
            death_effect_ticks: 12,
        }
    }
}

impl Tuning {
    /// Parse a tuning table from JSON. Fields not present keep their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
