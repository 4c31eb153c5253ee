//! Maze Muncher entry point
//!
//! Headless demo driver: runs the deterministic simulation with a random
//! walker at the fixed 20 Hz timestep and logs a run summary. Useful for
//! soak-testing the sim and eyeballing balance changes without a frontend.
//!
//! Environment knobs:
//! - `MUNCHER_SEED`: fixed seed instead of wall clock
//! - `MUNCHER_TICKS`: total ticks to simulate across runs (default 2400)
//! - `MUNCHER_TUNING`: path to a JSON tuning override file
//! - `MUNCHER_REALTIME`: pace ticks to real time instead of free-running
//! - `MUNCHER_DUMP`: write the final state as JSON to this path

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use maze_muncher::audio::MemoryAudio;
use maze_muncher::consts::TICK_MS;
use maze_muncher::input::InputState;
use maze_muncher::sim::{Direction, GameMap, GameState, TickContext, load_level, tick};
use maze_muncher::sprites::IndexedSprites;
use maze_muncher::tuning::Tuning;

fn main() {
    env_logger::init();

    let seed = seed_from_env();
    let tuning = tuning_from_env();
    let max_ticks: u64 = std::env::var("MUNCHER_TICKS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2400);
    let realtime = std::env::var("MUNCHER_REALTIME").is_ok();

    let map = GameMap::builtin();
    let mut state = GameState::new(seed, tuning, &map);
    let sprites = IndexedSprites;
    let mut audio = MemoryAudio::new();
    let mut input = InputState::new();
    let mut pilot = Pcg32::seed_from_u64(seed ^ 0x00c0_ffee);
    let mut runs = 1u32;

    log::info!("starting run: seed {seed}, {} levels", map.level_count());

    let mut ctx = TickContext { audio: &mut audio, sprites: &sprites };
    for _ in 0..max_ticks {
        let tick_started = Instant::now();

        if state.level_load_pending {
            load_level(&mut state, &map, &sprites);
        }

        steer(&mut input, &mut pilot, state.ticks);
        tick(&mut state, &mut input, &mut ctx);

        // A finished game restarts on the next key press once the debounce
        // expires; the walker supplies the press within a few ticks
        if state.restart_ready() && input.any_active() {
            log_outcome(&state);
            runs += 1;
            let reseed = seed.wrapping_add(runs as u64);
            state = GameState::new(reseed, state.tuning.clone(), &map);
            log::info!("restarting: run {runs}, seed {reseed}");
        }

        if realtime {
            let budget = Duration::from_millis(TICK_MS);
            let elapsed = tick_started.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }
    }

    log_outcome(&state);
    log::info!("{} runs, {} sound effects played", runs, audio.played.len());

    if let Ok(path) = std::env::var("MUNCHER_DUMP") {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&path, json) {
                    log::error!("cannot write state dump to {path}: {err}");
                } else {
                    log::info!("state dump written to {path}");
                }
            }
            Err(err) => log::error!("state dump failed: {err}"),
        }
    }
}

fn seed_from_env() -> u64 {
    if let Ok(raw) = std::env::var("MUNCHER_SEED") {
        match raw.parse() {
            Ok(seed) => return seed,
            Err(_) => log::warn!("ignoring unparsable MUNCHER_SEED {raw:?}"),
        }
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn tuning_from_env() -> Tuning {
    let Ok(path) = std::env::var("MUNCHER_TUNING") else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("loaded tuning overrides from {path}");
                tuning
            }
            Err(err) => {
                log::warn!("bad tuning file {path}: {err}");
                Tuning::default()
            }
        },
        Err(err) => {
            log::warn!("cannot read tuning file {path}: {err}");
            Tuning::default()
        }
    }
}

/// Random walker: re-rolls the held direction every few ticks and sprints
/// in short bursts.
fn steer(input: &mut InputState, pilot: &mut Pcg32, ticks: u64) {
    if ticks % 8 == 0 {
        input.clear();
        input.press(Direction::random_cardinal(pilot));
        input.set_sprint(pilot.random_range(0..4) == 0);
    }
}

fn log_outcome(state: &GameState) {
    if state.game_won {
        log::info!("victory: score {} in {} ticks", state.score, state.ticks);
    } else if state.game_over {
        log::info!("game over on level {}: score {}", state.level, state.score);
    } else {
        log::info!(
            "run cut short on level {}: score {}, {} lives left",
            state.level,
            state.score,
            state.lives
        );
    }
}
