//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one frame. Within a playing
//! tick the order is fixed: player input, autonomous behavior, collision
//! resolution, sweep, then the director's spawn/transition checks.

use super::behavior;
use super::collision::resolve_collisions;
use super::director;
use super::player;
use super::state::{GameMode, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held: move left
    pub left: bool,
    /// Held: move right
    pub right: bool,
    /// Primary fire (rate-limited)
    pub fire: bool,
    /// Special attack (cooldown-gated)
    pub special: bool,
    /// Leave the start screen
    pub confirm: bool,
    /// Restart from the game-over screen
    pub restart: bool,
    /// Stop the session after this tick
    pub quit: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one tick of `dt_ms` simulated milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    state.events.clear();

    if input.quit {
        state.quit_requested = true;
        log::info!("Quit requested");
        return;
    }

    let input = if input.idle_mode {
        player::autopilot(state, input)
    } else {
        input.clone()
    };
    let input = &input;

    match state.mode {
        GameMode::StartScreen => {
            if input.confirm {
                state.mode = GameMode::Playing;
                log::info!("Run started (seed {})", state.seed);
            }
        }
        GameMode::GameOver => {
            if input.restart {
                state.reset();
            }
        }
        GameMode::Playing => step_playing(state, input, dt_ms),
    }
}

fn step_playing(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    state.time_ms += dt_ms as u64;
    state.time_ticks += 1;

    player::apply_input(state, input);

    behavior::update(state);
    if state.is_terminal() {
        state.registry.sweep();
        return;
    }

    resolve_collisions(state);
    state.registry.sweep();
    if state.is_terminal() {
        return;
    }

    director::evaluate(state);
}
