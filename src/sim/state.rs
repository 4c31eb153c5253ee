//! Core game state types
//!
//! `GameState` is the single mutable aggregate for one run. It is owned by
//! the caller's loop and handed to the tick orchestrator by exclusive
//! mutable reference; nothing inside the simulation keeps a reference to it
//! across ticks.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAYER_SIZE, PLAYER_STEP};
use crate::tuning::Tuning;

use super::actor::{Actor, Entity};
use super::boss::Boss;
use super::grid::Rect;
use super::map::GameMap;

/// Animation frames in a death effect
pub const DEATH_EFFECT_FRAMES: u8 = 5;

/// Maximum simultaneous death effects; the oldest is dropped beyond this
pub const MAX_EFFECTS: usize = 16;

/// A transient ghost-death animation. Purely cosmetic: it never affects
/// collision or scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathEffect {
    /// Center of the defeated ghost
    pub pos: IVec2,
    age: u32,
    total: u32,
}

impl DeathEffect {
    pub fn new(pos: IVec2, total_ticks: u32) -> Self {
        Self { pos, age: 0, total: total_ticks.max(1) }
    }

    /// Age the effect one tick; returns false once it has played out
    pub fn advance(&mut self) -> bool {
        self.age += 1;
        self.age < self.total
    }

    /// Current animation frame, 0 to `DEATH_EFFECT_FRAMES - 1`
    pub fn frame(&self) -> u8 {
        let frame = (self.age * DEATH_EFFECT_FRAMES as u32) / self.total;
        (frame as u8).min(DEATH_EFFECT_FRAMES - 1)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving every random decision in the simulation
    pub rng: Pcg32,
    /// Balance table, fixed for the run
    pub tuning: Tuning,
    /// Simulation tick counter
    pub ticks: u64,
    /// Score
    pub score: u64,
    /// Player lives
    pub lives: u8,
    /// Current level, numbered from 1
    pub level: u32,
    /// Highest level the map provides
    pub last_level: u32,
    /// Whether the player holds the knife
    pub has_knife: bool,
    /// Knife uses remaining; reaching 0 clears `has_knife`
    pub knife_charges: u32,
    /// The player actor; survives level reloads
    pub player: Actor,
    /// The boss, present only on levels that place one
    pub boss: Option<Boss>,
    /// Static wall entities
    pub walls: Vec<Entity>,
    /// Remaining food; emptying this set clears the level
    pub food: Vec<Entity>,
    /// Knife pickups
    pub knives: Vec<Entity>,
    /// Ghosts roaming the level
    pub ghosts: Vec<Actor>,
    /// Boss projectiles in flight
    pub projectiles: Vec<Actor>,
    /// Active death animations (not gameplay-affecting)
    pub effects: Vec<DeathEffect>,
    /// Board extent in pixels
    pub board_px: IVec2,
    /// Ticks left in the inter-level pause; 0 when not transitioning
    pub transition_ticks: u32,
    /// Level committed when the transition timer expires
    pub pending_level: u32,
    /// Set when the caller must load `level` before ticking again
    pub level_load_pending: bool,
    /// Out of lives
    pub game_over: bool,
    /// Final level cleared
    pub game_won: bool,
    /// Ticks before a restart press is accepted after game over / victory
    pub restart_delay: u32,
}

impl GameState {
    /// Fresh run on level 1. The caller must load the level before the
    /// first tick (`level_load_pending` starts true).
    pub fn new(seed: u64, tuning: Tuning, map: &GameMap) -> Self {
        let player = Actor::new(Rect::new(0, 0, PLAYER_SIZE, PLAYER_SIZE), PLAYER_STEP, 0);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.starting_lives,
            tuning,
            ticks: 0,
            score: 0,
            level: 1,
            last_level: map.level_count(),
            has_knife: false,
            knife_charges: 0,
            player,
            boss: None,
            walls: Vec::new(),
            food: Vec::new(),
            knives: Vec::new(),
            ghosts: Vec::new(),
            projectiles: Vec::new(),
            effects: Vec::new(),
            board_px: map.board_px(),
            transition_ticks: 0,
            pending_level: 1,
            level_load_pending: true,
            game_over: false,
            game_won: false,
            restart_delay: 0,
        }
    }

    /// Drop everything a level owns. The player actor and the aggregate
    /// counters (score, lives, knife) survive.
    pub fn clear_level_entities(&mut self) {
        self.walls.clear();
        self.food.clear();
        self.knives.clear();
        self.ghosts.clear();
        self.projectiles.clear();
        self.effects.clear();
        self.boss = None;
    }

    /// Queue a death animation at `pos`, dropping the oldest if the list
    /// is full. Never fails.
    pub fn spawn_death_effect(&mut self, pos: IVec2) {
        if self.effects.len() >= MAX_EFFECTS {
            self.effects.remove(0);
        }
        self.effects.push(DeathEffect::new(pos, self.tuning.death_effect_ticks));
    }

    #[inline]
    pub fn in_transition(&self) -> bool {
        self.transition_ticks > 0
    }

    /// Whether the frozen game may be restarted by player input
    pub fn restart_ready(&self) -> bool {
        (self.game_over || self.game_won) && self.restart_delay == 0
    }
}
