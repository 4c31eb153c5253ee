//! Collision checks and response
//!
//! Player-versus-world resolution, run right after movement each tick. Each
//! check is independent and reports what it did to the player; the
//! orchestrator reacts to the aggregate (sprite refresh, player reset, game
//! over). Every check touches at most one entity per tick: the first overlap
//! found wins.

use crate::audio::{AudioSink, SoundEffect};

use super::state::GameState;

/// What a collision check did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Nothing happened
    None,
    /// The player was hurt and a life has been deducted
    LifeLost,
    /// A ghost died or the boss took a hit (possibly fatal to it)
    EnemyDefeated,
}

impl CollisionOutcome {
    #[inline]
    pub fn is_life_lost(self) -> bool {
        matches!(self, CollisionOutcome::LifeLost)
    }

    #[inline]
    pub fn is_enemy_defeated(self) -> bool {
        matches!(self, CollisionOutcome::EnemyDefeated)
    }
}

/// Eat at most one overlapping food item. Never hurts the player, so the
/// outcome is always `None`.
pub fn check_food(state: &mut GameState, audio: &mut dyn AudioSink) -> CollisionOutcome {
    let player_rect = state.player.entity.rect;
    if let Some(index) = state.food.iter().position(|f| f.rect.overlaps(&player_rect)) {
        state.food.remove(index);
        state.score += state.tuning.food_points as u64;
        audio.play(SoundEffect::Food);
    }
    CollisionOutcome::None
}

/// Pick up the first overlapping knife. Returns whether one was collected.
pub fn check_knives(state: &mut GameState, audio: &mut dyn AudioSink) -> bool {
    let player_rect = state.player.entity.rect;
    let Some(index) = state.knives.iter().position(|k| k.rect.overlaps(&player_rect)) else {
        return false;
    };
    state.knives.remove(index);
    state.has_knife = true;
    state.knife_charges += 1;
    audio.play(SoundEffect::Pickup);
    true
}

/// Resolve contact with the boss. Touching it unarmed or while it reflects
/// costs a life (the knife is never spent on a reflected hit); a charged hit
/// in its vulnerable phase damages it and snaps the player back to spawn
/// whether or not the boss survives.
pub fn check_boss(state: &mut GameState, audio: &mut dyn AudioSink) -> CollisionOutcome {
    let player_rect = state.player.entity.rect;
    let (overlapping, reflecting) = match &state.boss {
        Some(boss) => (boss.actor.entity.rect.overlaps(&player_rect), boss.reflecting),
        None => return CollisionOutcome::None,
    };
    if !overlapping {
        return CollisionOutcome::None;
    }

    if !state.has_knife || state.knife_charges == 0 || reflecting {
        handle_life_lost(state, audio);
        return CollisionOutcome::LifeLost;
    }

    state.knife_charges -= 1;
    if state.knife_charges == 0 {
        state.has_knife = false;
    }
    let still_alive = state.boss.as_mut().is_some_and(|boss| boss.take_damage());
    if still_alive {
        audio.play(SoundEffect::BossHit);
    } else {
        state.score += state.tuning.boss_points as u64;
        state.boss = None;
        audio.play(SoundEffect::Kill);
        log::info!("boss defeated");
    }
    state.player.reset();
    CollisionOutcome::EnemyDefeated
}

/// A projectile that reaches the player is spent and costs a life.
pub fn check_projectiles(state: &mut GameState, audio: &mut dyn AudioSink) -> CollisionOutcome {
    let player_rect = state.player.entity.rect;
    let Some(index) = state
        .projectiles
        .iter()
        .position(|p| p.entity.rect.overlaps(&player_rect))
    else {
        return CollisionOutcome::None;
    };
    state.projectiles.remove(index);
    handle_life_lost(state, audio);
    CollisionOutcome::LifeLost
}

/// Resolve contact with the first overlapping ghost: a kill if the player
/// holds a charged knife, a lost life otherwise. Ghosts survive unarmed
/// contact.
pub fn check_ghosts(state: &mut GameState, audio: &mut dyn AudioSink) -> CollisionOutcome {
    let player_rect = state.player.entity.rect;
    let Some(index) = state.ghosts.iter().position(|g| g.entity.rect.overlaps(&player_rect))
    else {
        return CollisionOutcome::None;
    };

    if state.has_knife && state.knife_charges > 0 {
        state.knife_charges -= 1;
        if state.knife_charges == 0 {
            state.has_knife = false;
        }
        let pos = state.ghosts[index].center();
        state.spawn_death_effect(pos);
        state.ghosts.remove(index);
        audio.play(SoundEffect::Kill);
        CollisionOutcome::EnemyDefeated
    } else {
        handle_life_lost(state, audio);
        CollisionOutcome::LifeLost
    }
}

/// Shared life-loss bookkeeping. The orchestrator decides afterward whether
/// to reset the player or freeze the game.
fn handle_life_lost(state: &mut GameState, audio: &mut dyn AudioSink) {
    state.lives = state.lives.saturating_sub(1);
    audio.play(SoundEffect::LifeLost);
    if state.lives == 0 {
        state.game_over = true;
        log::info!("out of lives");
    }
}
