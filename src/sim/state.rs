//! Game session state
//!
//! Everything one run mutates lives in `GameState`; there is no ambient
//! global state. Score, lives and the terminal transition are funneled
//! through the methods here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::director::Director;
use super::entity::{Category, Entity};
use super::player::PlayerController;
use super::registry::Registry;
use crate::tuning::Tuning;

/// Top-level session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for confirm
    StartScreen,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart or quit
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Last life lost to a bomb or boss shot
    LivesExhausted,
    /// Formation stepped past the depth limit
    FormationBreach,
    /// Rocket touched a standard enemy
    EnemyContact,
}

/// Domain outcomes produced during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyDestroyed { row: u32, points: u32 },
    FlyerDestroyed { points: u32 },
    ShieldHit,
    ShieldDestroyed,
    ArmorHit,
    ArmorDestroyed,
    BossHit { damage: i32 },
    BossDefeated,
    PlayerHit,
    WaveCleared { waves_cleared: u32 },
    GridSpawned,
    BossSpawned { appearance: u32, armor: u32 },
    FlyerSpawned { points: u32 },
    GameOver { reason: GameOverReason },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub mode: GameMode,
    pub score: u64,
    pub lives: u8,
    /// Simulated milliseconds since the current run started playing
    pub time_ms: u64,
    /// Playing ticks since the current run started
    pub time_ticks: u64,
    pub registry: Registry,
    pub director: Director,
    pub controller: PlayerController,
    /// Outcomes of the most recent tick
    pub events: Vec<GameEvent>,
    pub game_over_reason: Option<GameOverReason>,
    /// Set by a quit input; the outer loop stops between ticks
    pub quit_requested: bool,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a session with custom tuning
    ///
    /// The tuning must already pass `Tuning::validate`; `Tuning::load` and
    /// `Tuning::from_json` guarantee it.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning: {:?}", tuning.validate());
        let mut rng = Pcg32::seed_from_u64(seed);
        let director = Director::new(&tuning, &mut rng);
        let mut state = Self {
            seed,
            lives: tuning.lives,
            tuning,
            mode: GameMode::StartScreen,
            score: 0,
            time_ms: 0,
            time_ticks: 0,
            registry: Registry::new(),
            director,
            controller: PlayerController::default(),
            events: Vec::new(),
            game_over_reason: None,
            quit_requested: false,
            rng,
        };
        state.populate();
        state
    }

    /// Spawn the rocket, shields and first grid
    fn populate(&mut self) {
        self.registry
            .set_capacity(Category::PlayerShot, self.tuning.max_player_shots);
        self.registry.spawn(Entity::rocket());
        for i in 0..self.tuning.shield_count {
            self.registry.spawn(Entity::shield(
                i,
                self.tuning.shield_count,
                self.tuning.shield_health,
            ));
        }
        super::director::spawn_grid(self);
    }

    /// Back to a fresh first session on the start screen
    ///
    /// The RNG keeps its stream so successive runs differ.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.director = Director::new(&self.tuning, &mut self.rng);
        self.controller = PlayerController::default();
        self.score = 0;
        self.lives = self.tuning.lives;
        self.time_ms = 0;
        self.time_ticks = 0;
        self.game_over_reason = None;
        self.mode = GameMode::StartScreen;
        self.populate();
        log::info!("Session reset");
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.mode == GameMode::GameOver
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points as u64;
    }

    /// Lose one life; the last one ends the run
    pub fn lose_life(&mut self) {
        if self.is_terminal() {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::PlayerHit);
        if self.lives == 0 {
            self.end_game(GameOverReason::LivesExhausted);
        }
    }

    /// Enter the terminal mode (first reason wins)
    pub fn end_game(&mut self, reason: GameOverReason) {
        if self.is_terminal() {
            return;
        }
        self.mode = GameMode::GameOver;
        self.game_over_reason = Some(reason);
        self.events.push(GameEvent::GameOver { reason });
        log::info!(
            "Game over ({:?}) - score {} after {} waves",
            reason,
            self.score,
            self.director.waves_cleared
        );
    }
}
