//! Rocket Invaders headless runner
//!
//! Plays one autopilot session at the fixed timestep and prints the final
//! frame as JSON. Windowing and drawing belong to an external shell.
//!
//! Usage: `rocket-invaders [--tuning PATH] [--seed N] [--ticks N]`

use rocket_invaders::consts::SIM_DT_MS;
use rocket_invaders::sim::{GameEvent, GameState, TickInput, tick};
use rocket_invaders::{FrameOutput, Tuning};

const DEFAULT_SEED: u64 = 12345;
const DEFAULT_TICKS: u64 = 60 * 60 * 3;

struct RunArgs {
    tuning: Tuning,
    seed: u64,
    ticks: u64,
}

fn parse_number(flag: &str, value: Option<String>, default: u64) -> u64 {
    match value.as_deref().map(str::parse::<u64>) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Ignoring {} value: {}", flag, e);
            default
        }
        None => {
            log::warn!("{} expects a value", flag);
            default
        }
    }
}

fn parse_args() -> RunArgs {
    let mut args = RunArgs {
        tuning: Tuning::default(),
        seed: DEFAULT_SEED,
        ticks: DEFAULT_TICKS,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tuning" => match iter.next() {
                Some(path) => args.tuning = Tuning::load_or_default(&path),
                None => log::warn!("--tuning expects a path"),
            },
            "--seed" => args.seed = parse_number("--seed", iter.next(), DEFAULT_SEED),
            "--ticks" => args.ticks = parse_number("--ticks", iter.next(), DEFAULT_TICKS),
            other => log::warn!("Unknown argument: {}", other),
        }
    }
    args
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Rocket Invaders (headless) starting...");

    let args = parse_args();
    let mut state = GameState::with_tuning(args.seed, args.tuning);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut enemies = 0u32;
    let mut bosses = 0u32;
    for _ in 0..args.ticks {
        tick(&mut state, &input, SIM_DT_MS);
        for event in &state.events {
            match event {
                GameEvent::EnemyDestroyed { .. } => enemies += 1,
                GameEvent::BossDefeated => bosses += 1,
                _ => {}
            }
        }
        if state.is_terminal() || state.quit_requested {
            break;
        }
    }

    log::info!(
        "Session finished after {} ticks: score {}, lives {}, waves cleared {}, {} enemies and {} bosses destroyed",
        state.time_ticks,
        state.score,
        state.lives,
        state.director.waves_cleared,
        enemies,
        bosses
    );

    match serde_json::to_string_pretty(&FrameOutput::capture(&state)) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final frame: {}", e),
    }
}
