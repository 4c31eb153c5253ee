//! Movement engine
//!
//! One pass per tick: player steering and tile interpolation, the bounds
//! clamp, wall-bounce random walk for AI actors, and projectile travel.
//! Collision *resolution* against the player happens afterward in
//! `collision`; this module only moves things.

use glam::IVec2;
use rand_pcg::Pcg32;

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::{PLAYER_STEP, SPRINT_STEP, TILE_SIZE};
use crate::input::InputState;

use super::actor::{Actor, Direction, Entity};
use super::grid::Rect;
use super::state::GameState;

/// Advance every mobile entity one tick. Returns whether the player newly
/// started a tile move, which the orchestrator uses to refresh the player
/// sprite.
pub fn run(state: &mut GameState, input: &InputState, audio: &mut dyn AudioSink) -> bool {
    let started = steer_player(state, input, audio);
    glide_player(state, input);
    state.player.entity.rect.clamp_to(state.board_px);
    drive_ai_actors(state);
    drive_projectiles(state);
    started
}

/// Commit a new tile move if the player is idle, steering input is held,
/// and the target tile is not wall-blocked.
fn steer_player(state: &mut GameState, input: &InputState, audio: &mut dyn AudioSink) -> bool {
    if state.player.moving {
        return false;
    }
    let direction = input.direction();
    if direction == Direction::None {
        return false;
    }

    let target = state.player.entity.rect.pos() + direction.unit() * TILE_SIZE;
    let candidate = Rect::new(
        target.x,
        target.y,
        state.player.entity.rect.w,
        state.player.entity.rect.h,
    );
    if state.walls.iter().any(|wall| candidate.overlaps(&wall.rect)) {
        return false;
    }

    state.player.begin_move(direction, target);
    audio.play(SoundEffect::Move);
    true
}

fn glide_player(state: &mut GameState, input: &InputState) {
    let step = if input.sprint_requested() { SPRINT_STEP } else { PLAYER_STEP };
    state.player.glide(step);
}

/// Ghosts and the boss drift at their current velocity and bounce off
/// walls and board edges into a fresh random heading.
fn drive_ai_actors(state: &mut GameState) {
    let board = state.board_px;
    for ghost in &mut state.ghosts {
        bounce_move(ghost, &state.walls, board, &mut state.rng);
    }
    if let Some(boss) = state.boss.as_mut() {
        bounce_move(&mut boss.actor, &state.walls, board, &mut state.rng);
    }
}

fn bounce_move(actor: &mut Actor, walls: &[Entity], board: IVec2, rng: &mut Pcg32) {
    let delta = actor.velocity;
    actor.entity.rect.translate(delta);
    let blocked = !actor.entity.rect.within(board)
        || walls.iter().any(|wall| actor.entity.rect.overlaps(&wall.rect));
    if blocked {
        actor.entity.rect.translate(-delta);
        actor.direction = Direction::random_cardinal(rng);
        actor.update_velocity();
    }
}

/// Projectiles fly in a straight line and vanish on the first wall hit or
/// on leaving the board.
fn drive_projectiles(state: &mut GameState) {
    let board = state.board_px;
    let walls = &state.walls;
    state.projectiles.retain_mut(|shot| {
        shot.entity.rect.translate(shot.velocity);
        shot.entity.rect.within(board)
            && !walls.iter().any(|wall| shot.entity.rect.overlaps(&wall.rect))
    });
}
