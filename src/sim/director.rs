//! Wave/boss director
//!
//! Strict two-phase alternation: a grid of standard enemies, and on every
//! even clearance a boss instead of the next grid. A defeated boss always
//! hands back to a fresh grid.

use rand::Rng;

use super::entity::{Category, Entity};
use super::state::{GameEvent, GameState};
use crate::consts::MAX_ARMOR_SEGMENTS;
use crate::tuning::Tuning;

/// Director phase
///
/// `WaveCleared` and `BossDefeated` are spawn-decision states; `evaluate`
/// passes through them within a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorState {
    WaveActive,
    WaveCleared,
    BossActive,
    BossDefeated,
}

/// Lock-step movement state of the enemy grid
#[derive(Debug, Clone, PartialEq)]
pub struct Formation {
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub move_delay_ms: u64,
    pub last_move_ms: u64,
}

impl Formation {
    fn new(tuning: &Tuning) -> Self {
        Self {
            direction: 1.0,
            move_delay_ms: tuning.alien_move_delay_ms,
            last_move_ms: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Director {
    pub state: DirectorState,
    pub waves_cleared: u32,
    pub boss_appearances: u32,
    pub formation: Formation,
    pub last_bomb_ms: u64,
    pub next_flyer_ms: u64,
}

impl Director {
    pub fn new(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        Self {
            state: DirectorState::WaveActive,
            waves_cleared: 0,
            boss_appearances: 0,
            formation: Formation::new(tuning),
            last_bomb_ms: 0,
            next_flyer_ms: flyer_interval(tuning, rng),
        }
    }

    #[inline]
    pub fn boss_active(&self) -> bool {
        self.state == DirectorState::BossActive
    }

    /// Current wave number as shown to the player (1-based)
    pub fn wave_number(&self) -> u32 {
        self.waves_cleared + 1
    }
}

/// Random delay until the next bonus flyer
pub fn flyer_interval(tuning: &Tuning, rng: &mut impl Rng) -> u64 {
    rng.random_range(tuning.flyer_interval_min_ms..=tuning.flyer_interval_max_ms)
}

/// Armor plates for the given boss appearance
pub fn armor_for_appearance(appearance: u32) -> u32 {
    appearance.min(MAX_ARMOR_SEGMENTS)
}

/// Spawn a full enemy grid at the slowest formation speed
pub fn spawn_grid(state: &mut GameState) {
    state.registry.clear_category(Category::StandardEnemy);
    state.registry.sweep();
    for row in 0..state.tuning.alien_rows {
        for col in 0..state.tuning.alien_cols {
            state.registry.spawn(Entity::alien(row, col));
        }
    }
    state.director.formation = Formation {
        last_move_ms: state.time_ms,
        ..Formation::new(&state.tuning)
    };
    state.director.state = DirectorState::WaveActive;
    state.events.push(GameEvent::GridSpawned);
}

/// Promote to a boss encounter
fn spawn_boss(state: &mut GameState) {
    state.director.boss_appearances += 1;
    let appearance = state.director.boss_appearances;
    let armor = armor_for_appearance(appearance);

    // The boss arrives on a clean field
    state.registry.clear_category(Category::Bomb);
    state.registry.clear_category(Category::SpecialShot);
    state.registry.sweep();

    let boss = Entity::boss(armor, &state.tuning);
    if state.registry.spawn(boss).is_none() {
        debug_assert!(false, "boss spawn rejected while promoting");
        log::error!("Boss spawn rejected; resuming standard waves");
        spawn_grid(state);
        return;
    }
    state.director.state = DirectorState::BossActive;
    state.events.push(GameEvent::BossSpawned { appearance, armor });
    log::info!("Boss appearance {} with {} armor plates", appearance, armor);
}

/// Spawn decision after a clearance or boss defeat
fn decide(state: &mut GameState) {
    match state.director.state {
        DirectorState::WaveCleared => {
            if state.director.waves_cleared.is_multiple_of(2) {
                spawn_boss(state);
            } else {
                spawn_grid(state);
                log::info!("Wave {} begins", state.director.wave_number());
            }
        }
        DirectorState::BossDefeated => {
            spawn_grid(state);
            log::info!("Boss down, wave {} begins", state.director.wave_number());
        }
        DirectorState::WaveActive | DirectorState::BossActive => {}
    }
}

/// Evaluate spawn/transition conditions (runs after collision resolution)
pub fn evaluate(state: &mut GameState) {
    if state.is_terminal() {
        return;
    }
    match state.director.state {
        DirectorState::WaveActive => {
            if state.registry.count(Category::StandardEnemy) == 0 {
                state.director.waves_cleared += 1;
                let waves_cleared = state.director.waves_cleared;
                state.director.state = DirectorState::WaveCleared;
                state.events.push(GameEvent::WaveCleared { waves_cleared });
                log::info!("Wave cleared ({} total)", waves_cleared);
                decide(state);
            }
        }
        DirectorState::BossActive => {
            if state.registry.count(Category::Boss) == 0 {
                state.director.state = DirectorState::BossDefeated;
                decide(state);
            }
        }
        DirectorState::WaveCleared | DirectorState::BossDefeated => decide(state),
    }

    debug_assert!(
        !(state.registry.count(Category::Boss) > 0
            && state.registry.count(Category::StandardEnemy) > 0),
        "boss and enemy grid active together"
    );
}
