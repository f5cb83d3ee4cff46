//! Rocket Invaders - a wave-and-boss arcade shoot-'em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, wave/boss director, session)
//! - `renderer`: Draw commands and HUD snapshot handed to an external renderer
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use renderer::{DrawCommand, FrameOutput, Hud};
pub use tuning::{Tuning, TuningError};

/// Game geometry constants
///
/// Positions are screen pixels with the origin at the top-left corner and
/// y growing downward.
pub mod consts {
    /// Simulated milliseconds per tick (~60 Hz)
    pub const SIM_DT_MS: u32 = 16;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player rocket, centred at (W/2, H - 50)
    pub const ROCKET_WIDTH: f32 = 40.0;
    pub const ROCKET_HEIGHT: f32 = 24.0;
    pub const ROCKET_Y_FROM_BOTTOM: f32 = 50.0;

    /// Standard enemy geometry
    pub const ALIEN_WIDTH: f32 = 36.0;
    pub const ALIEN_HEIGHT: f32 = 24.0;
    pub const ALIEN_X_MARGIN: f32 = 60.0;
    pub const ALIEN_Y_MARGIN: f32 = 60.0;
    pub const ALIEN_X_SPACING: f32 = 60.0;
    pub const ALIEN_Y_SPACING: f32 = 48.0;
    /// Formation reverses when an enemy gets this close to a side wall
    pub const ALIEN_SIDE_MARGIN: f32 = 10.0;
    /// Enemy bottom at or below `SCREEN_HEIGHT - ALIEN_DEPTH_LIMIT` ends the run
    pub const ALIEN_DEPTH_LIMIT: f32 = 120.0;

    /// Projectiles
    pub const SHOT_WIDTH: f32 = 6.0;
    pub const SHOT_HEIGHT: f32 = 18.0;
    pub const SPECIAL_WIDTH: f32 = 16.0;
    pub const SPECIAL_HEIGHT: f32 = 24.0;
    /// Special shot self-destructs once wider than this
    pub const SPECIAL_MAX_WIDTH: f32 = 120.0;
    pub const BOMB_WIDTH: f32 = 10.0;
    pub const BOMB_HEIGHT: f32 = 18.0;

    /// Shields sit on the depth-limit line
    pub const SHIELD_WIDTH: f32 = 80.0;
    pub const SHIELD_HEIGHT: f32 = 40.0;
    pub const SHIELD_Y_FROM_BOTTOM: f32 = 120.0;

    /// Bonus flyer enters from the left at this height
    pub const FLYER_WIDTH: f32 = 60.0;
    pub const FLYER_HEIGHT: f32 = 28.0;
    pub const FLYER_Y: f32 = 40.0;
    pub const FLYER_REWARDS: [u32; 4] = [50, 100, 150, 300];

    /// Boss body (mid-top anchored) and its armor plates
    pub const BOSS_WIDTH: f32 = 100.0;
    pub const BOSS_HEIGHT: f32 = 40.0;
    pub const BOSS_TOP: f32 = 40.0;
    pub const ARMOR_WIDTH: f32 = 30.0;
    pub const ARMOR_HEIGHT: f32 = 16.0;
    pub const ARMOR_GAP: f32 = 2.0;
    pub const MAX_ARMOR_SEGMENTS: u32 = 3;

    /// Minimum alpha for damaged shields and armor
    pub const MIN_DAMAGE_ALPHA: u8 = 60;
}
