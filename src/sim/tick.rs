//! Fixed timestep simulation tick
//!
//! The orchestrator: one call advances the whole game by one 50 ms step.
//! Phases run in a strict order so a given state, input and seed always
//! produce the same next state: bookkeeping, freeze checks, boss AI,
//! movement, collision checks, life-loss handling, then the win check.
//!
//! Level loading stays with the caller. While `level_load_pending` is set
//! the tick is a no-op apart from timers, until the caller has loaded the
//! level and cleared the flag.

use crate::audio::{AudioSink, SoundEffect};
use crate::input::InputState;
use crate::sprites::{SpriteKey, SpriteProvider};

use super::collision;
use super::movement;
use super::state::GameState;

/// Services a tick needs besides the state and input.
pub struct TickContext<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub sprites: &'a dyn SpriteProvider,
}

/// Advance the game state by one fixed timestep.
pub fn tick(state: &mut GameState, input: &mut InputState, ctx: &mut TickContext<'_>) {
    state.ticks += 1;
    state.effects.retain_mut(|effect| effect.advance());

    // Terminal screens: only the restart debounce keeps counting
    if state.game_over || state.game_won {
        state.restart_delay = state.restart_delay.saturating_sub(1);
        return;
    }

    if state.level_load_pending {
        return;
    }

    if state.in_transition() {
        state.transition_ticks -= 1;
        if state.transition_ticks == 0 {
            state.level = state.pending_level;
            state.level_load_pending = true;
            log::info!("entering level {}", state.level);
        }
        return;
    }

    advance_boss(state, ctx);

    let moved = movement::run(state, input, ctx.audio);

    collision::check_food(state, ctx.audio);
    let picked = collision::check_knives(state, ctx.audio);
    let boss_hit = collision::check_boss(state, ctx.audio);
    let shot_hit = collision::check_projectiles(state, ctx.audio);
    let ghost_hit = collision::check_ghosts(state, ctx.audio);

    let defeated = boss_hit.is_enemy_defeated() || ghost_hit.is_enemy_defeated();
    let hurt = boss_hit.is_life_lost() || shot_hit.is_life_lost() || ghost_hit.is_life_lost();

    if moved || picked || defeated {
        state.player.entity.sprite = ctx.sprites.sprite(SpriteKey::Player {
            facing: state.player.direction,
            armed: state.has_knife,
        });
    }

    if hurt {
        if state.game_over {
            ctx.audio.play(SoundEffect::GameOver);
            input.clear();
            state.restart_delay = state.tuning.restart_debounce_ticks;
            log::info!("game over at score {}", state.score);
        } else {
            state.player.reset();
        }
    }

    // Win check runs on the same tick the last food was eaten
    if state.food.is_empty() && !state.game_over && !state.game_won {
        input.clear();
        let next = state.level + 1;
        if next > state.last_level {
            state.game_won = true;
            state.restart_delay = state.tuning.restart_debounce_ticks;
            ctx.audio.play(SoundEffect::Victory);
            log::info!("all levels cleared, final score {}", state.score);
        } else {
            state.transition_ticks = state.tuning.level_transition_ticks;
            state.pending_level = next;
            ctx.audio.play(SoundEffect::LevelClear);
            log::info!("level {} cleared", state.level);
        }
    }
}

/// Phase timer, sprite swap on phase change, and the ranged attack.
fn advance_boss(state: &mut GameState, ctx: &mut TickContext<'_>) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let was_reflecting = boss.reflecting;
    boss.advance(&state.tuning);
    if boss.reflecting != was_reflecting {
        boss.actor.entity.sprite = ctx.sprites.sprite(SpriteKey::Boss {
            reflecting: boss.reflecting,
        });
    }
    let projectile_sprite = ctx.sprites.sprite(SpriteKey::Projectile);
    if let Some(shot) = boss.long_range_attack(&state.player, &state.tuning, projectile_sprite) {
        state.projectiles.push(shot);
        ctx.audio.play(SoundEffect::BossAttack);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{MemoryAudio, NullAudio};
    use crate::sim::actor::{Actor, Direction, Entity};
    use crate::sim::boss::Boss;
    use crate::sim::grid::Rect;
    use crate::sim::map::{GameMap, load_level};
    use crate::sim::state::DeathEffect;
    use crate::sprites::IndexedSprites;
    use crate::tuning::Tuning;
    use glam::IVec2;

    // Two-level map: open room, player at tile (1, 1), one food tile per
    // level well away from the player.
    fn room_map() -> GameMap {
        let level_one = vec![
            "########".to_string(),
            "#P     #".to_string(),
            "#      #".to_string(),
            "#  .   #".to_string(),
            "########".to_string(),
        ];
        let level_two = vec![
            "########".to_string(),
            "#P     #".to_string(),
            "#   .  #".to_string(),
            "#      #".to_string(),
            "########".to_string(),
        ];
        GameMap::new(vec![level_one, level_two]).unwrap()
    }

    fn solo_map() -> GameMap {
        let level = vec![
            "########".to_string(),
            "#P     #".to_string(),
            "#  .   #".to_string(),
            "########".to_string(),
        ];
        GameMap::new(vec![level]).unwrap()
    }

    fn setup(map: &GameMap) -> GameState {
        let mut state = GameState::new(5, Tuning::default(), map);
        load_level(&mut state, map, &IndexedSprites);
        state
    }

    fn holding(direction: Direction) -> InputState {
        let mut input = InputState::new();
        input.press(direction);
        input
    }

    #[test]
    fn test_ticks_count_and_effects_age_out() {
        let map = room_map();
        let mut state = setup(&map);
        state.effects.push(DeathEffect::new(IVec2::new(50, 50), 2));
        let mut input = InputState::new();
        let mut audio = NullAudio;
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.effects.len(), 1);
        tick(&mut state, &mut input, &mut ctx);
        assert!(state.effects.is_empty());
        assert_eq!(state.ticks, 2);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let map = room_map();
        let mut state = setup(&map);
        state.game_over = true;
        state.restart_delay = 2;
        let start = state.player.entity.rect.pos();
        let mut input = holding(Direction::Right);
        let mut audio = NullAudio;
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.player.entity.rect.pos(), start);
        assert!(!state.restart_ready());
        tick(&mut state, &mut input, &mut ctx);
        assert!(state.restart_ready());
        // The tick counter keeps running while frozen
        assert_eq!(state.ticks, 2);
    }

    #[test]
    fn test_transition_freezes_play_then_commits() {
        let map = room_map();
        let mut state = setup(&map);
        state.transition_ticks = 2;
        state.pending_level = 2;
        let start = state.player.entity.rect.pos();
        let mut input = holding(Direction::Right);
        let mut audio = NullAudio;
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.transition_ticks, 1);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.entity.rect.pos(), start);

        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.transition_ticks, 0);
        assert_eq!(state.level, 2);
        assert!(state.level_load_pending);
    }

    #[test]
    fn test_clearing_food_starts_transition() {
        let map = room_map();
        let mut state = setup(&map);
        state.food.clear();
        let mut input = holding(Direction::Right);
        let mut audio = MemoryAudio::new();
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.transition_ticks, Tuning::default().level_transition_ticks);
        assert_eq!(state.pending_level, 2);
        assert!(!input.any_active());
        assert_eq!(audio.count(SoundEffect::LevelClear), 1);

        // The pause only counts down, it never re-arms
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };
        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.transition_ticks, Tuning::default().level_transition_ticks - 1);
        assert_eq!(state.pending_level, 2);
    }

    #[test]
    fn test_eating_last_food_starts_transition_same_tick() {
        // One food tile directly right of the player, two levels, no knives
        let level_one = vec![
            "#####".to_string(),
            "#P. #".to_string(),
            "#####".to_string(),
        ];
        let level_two = vec![
            "#####".to_string(),
            "# P.#".to_string(),
            "#####".to_string(),
        ];
        let map = GameMap::new(vec![level_one, level_two]).unwrap();
        let mut tuning = Tuning::default();
        tuning.knives_per_level = 0;
        let mut state = GameState::new(5, tuning, &map);
        load_level(&mut state, &map, &IndexedSprites);
        let mut input = holding(Direction::Right);
        let mut audio = MemoryAudio::new();
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        // First glide step stops short of the food
        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.food.len(), 1);
        assert_eq!(state.score, 0);
        assert!(!state.in_transition());

        // The step that eats the last food also runs the win check
        tick(&mut state, &mut input, &mut ctx);
        assert!(state.food.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.transition_ticks, Tuning::default().level_transition_ticks);
        assert_eq!(state.pending_level, 2);
        // The level itself commits only when the pause expires
        assert_eq!(state.level, 1);
        assert!(!input.any_active());
        assert_eq!(audio.count(SoundEffect::Food), 1);
        assert_eq!(audio.count(SoundEffect::LevelClear), 1);
    }

    #[test]
    fn test_clearing_last_level_wins_the_game() {
        let map = solo_map();
        let mut state = setup(&map);
        state.food.clear();
        let mut input = holding(Direction::Right);
        let mut audio = MemoryAudio::new();
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        assert!(state.game_won);
        assert!(!state.game_over);
        assert_eq!(state.restart_delay, Tuning::default().restart_debounce_ticks);
        assert!(!input.any_active());
        assert_eq!(audio.count(SoundEffect::Victory), 1);
    }

    #[test]
    fn test_boss_phase_change_swaps_sprite() {
        let map = room_map();
        let mut state = setup(&map);
        let tuning = state.tuning.clone();
        let mut boss = Boss::new(Actor::new(Rect::new(96, 64, 48, 48), 2, 0), &tuning);
        boss.mode_ticks = 1;
        state.boss = Some(boss);
        let mut input = InputState::new();
        let mut audio = NullAudio;
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        let boss = state.boss.as_ref().unwrap();
        assert!(boss.reflecting);
        assert_eq!(
            boss.actor.entity.sprite,
            IndexedSprites.sprite(SpriteKey::Boss { reflecting: true })
        );
    }

    #[test]
    fn test_boss_opens_fire() {
        let map = room_map();
        let mut state = setup(&map);
        let tuning = state.tuning.clone();
        state.boss = Some(Boss::new(Actor::new(Rect::new(96, 64, 48, 48), 2, 0), &tuning));
        let mut input = InputState::new();
        let mut audio = MemoryAudio::new();
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(audio.count(SoundEffect::BossAttack), 1);

        // Cooling down: no second shot on the next tick
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };
        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(audio.count(SoundEffect::BossAttack), 1);
    }

    #[test]
    fn test_life_lost_resets_player_to_spawn() {
        let map = room_map();
        let mut state = setup(&map);
        // Motionless ghost parked on the player
        state.ghosts.push(Actor::new(Rect::new(32, 32, 32, 32), 2, 0));
        let mut input = InputState::new();
        let mut audio = MemoryAudio::new();
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.lives, 2);
        assert!(!state.game_over);
        assert_eq!(state.player.entity.rect.pos(), state.player.spawn);
        assert_eq!(audio.count(SoundEffect::LifeLost), 1);
    }

    #[test]
    fn test_life_lost_alone_keeps_player_sprite() {
        let map = room_map();
        let mut state = setup(&map);
        state.player.entity.sprite = 9999;
        state.ghosts.push(Actor::new(Rect::new(32, 32, 32, 32), 2, 0));
        let mut input = InputState::new();
        let mut audio = NullAudio;
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        // The sprite refresh triggers are movement, pickup and kills; the
        // respawn after a lost life is not one of them
        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.entity.rect.pos(), state.player.spawn);
        assert_eq!(state.player.entity.sprite, 9999);
    }

    #[test]
    fn test_last_life_ends_game_and_clears_input() {
        let map = room_map();
        let mut state = setup(&map);
        state.lives = 1;
        state.ghosts.push(Actor::new(Rect::new(32, 32, 32, 32), 2, 0));
        let mut input = holding(Direction::Right);
        let mut audio = MemoryAudio::new();
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        assert!(state.game_over);
        assert!(!input.any_active());
        assert_eq!(state.restart_delay, Tuning::default().restart_debounce_ticks);
        assert_eq!(audio.count(SoundEffect::GameOver), 1);

        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };
        for _ in 0..29 {
            tick(&mut state, &mut input, &mut ctx);
        }
        assert!(!state.restart_ready());
        tick(&mut state, &mut input, &mut ctx);
        assert!(state.restart_ready());
    }

    #[test]
    fn test_player_sprite_tracks_motion() {
        let map = room_map();
        let mut state = setup(&map);
        let mut input = holding(Direction::Right);
        let mut audio = NullAudio;
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        assert_eq!(
            state.player.entity.sprite,
            IndexedSprites.sprite(SpriteKey::Player { facing: Direction::Right, armed: false })
        );
    }

    #[test]
    fn test_knife_pickup_swaps_to_armed_sprite() {
        let map = room_map();
        let mut state = setup(&map);
        state.knives.push(Entity::new(Rect::new(40, 40, 16, 16), 0));
        let mut input = InputState::new();
        let mut audio = NullAudio;
        let sprites = IndexedSprites;
        let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };

        tick(&mut state, &mut input, &mut ctx);
        assert!(state.has_knife);
        assert_eq!(
            state.player.entity.sprite,
            IndexedSprites.sprite(SpriteKey::Player { facing: Direction::None, armed: true })
        );
    }

    #[test]
    fn test_same_seed_same_run() {
        fn scripted_run(seed: u64) -> String {
            let map = GameMap::builtin();
            let mut state = GameState::new(seed, Tuning::default(), &map);
            let sprites = IndexedSprites;
            let mut audio = NullAudio;
            let mut input = InputState::new();
            let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };
            input.press(Direction::Right);
            for t in 0..60 {
                if state.level_load_pending {
                    load_level(&mut state, &map, &sprites);
                }
                if t == 20 {
                    input.press(Direction::Down);
                }
                if t == 40 {
                    input.release(Direction::Down);
                }
                tick(&mut state, &mut input, &mut ctx);
            }
            serde_json::to_string(&state).unwrap()
        }

        assert_eq!(scripted_run(42), scripted_run(42));
        assert_ne!(scripted_run(42), scripted_run(43));
    }
}
