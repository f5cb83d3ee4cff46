//! Per-frame draw output
//!
//! The simulation never draws. After each tick the shell captures a
//! `FrameOutput`: an ordered list of rectangles to fill, the HUD scalars and
//! any text lines for the current screen.

use glam::Vec2;
use serde::Serialize;

use super::palette;
use crate::consts::*;
use crate::sim::{Category, EntityKind, GameMode, GameState, Rect, damage_alpha};

/// One filled rectangle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub category: Category,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: [f32; 4],
    /// Sprite variant (enemy color tier, boss-fired special)
    pub variant: u32,
    /// Health-dependent for shields and armor, opaque otherwise
    pub alpha: u8,
}

impl DrawCommand {
    fn new(category: Category, rect: &Rect, color: [f32; 4]) -> Self {
        Self {
            category,
            pos: rect.pos,
            size: rect.size,
            color,
            variant: 0,
            alpha: 255,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BossHealth {
    pub health: i32,
    pub max_health: i32,
    /// Filled share of the bar, 0.0..=1.0
    pub fraction: f32,
}

/// HUD scalars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub special_cooldown_ms: u64,
    /// Whole seconds, rounded down like the on-screen counter
    pub special_cooldown_secs: u64,
    pub wave: u32,
    pub boss_health: Option<BossHealth>,
}

impl Hud {
    pub fn capture(state: &GameState) -> Self {
        let special_cooldown_ms = state
            .controller
            .special_remaining_ms(state.time_ms, state.tuning.special_cooldown_ms);
        let boss_health = state.registry.boss().map(|(_, boss)| BossHealth {
            health: boss.health,
            max_health: boss.max_health,
            fraction: if boss.max_health > 0 {
                (boss.health.max(0) as f32 / boss.max_health as f32).min(1.0)
            } else {
                0.0
            },
        });
        Self {
            score: state.score,
            lives: state.lives,
            special_cooldown_ms,
            special_cooldown_secs: special_cooldown_ms / 1000,
            wave: state.director.wave_number(),
            boss_health,
        }
    }
}

/// A centred line of text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenText {
    pub text: String,
    /// Font size in pixels
    pub size: u32,
    pub center: Vec2,
    pub color: [f32; 4],
}

impl ScreenText {
    fn new(text: impl Into<String>, size: u32, x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            text: text.into(),
            size,
            center: Vec2::new(x, y),
            color,
        }
    }
}

/// Everything the external renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutput {
    pub mode: GameMode,
    pub background: [f32; 4],
    pub commands: Vec<DrawCommand>,
    pub hud: Hud,
    pub text: Vec<ScreenText>,
}

impl FrameOutput {
    pub fn capture(state: &GameState) -> Self {
        let hud = Hud::capture(state);
        let (commands, text) = match state.mode {
            GameMode::StartScreen => (Vec::new(), start_text()),
            GameMode::GameOver => (Vec::new(), game_over_text(state.score)),
            GameMode::Playing => (draw_commands(state), hud_text(&hud)),
        };
        Self {
            mode: state.mode,
            background: palette::BACKGROUND,
            commands,
            hud,
            text,
        }
    }
}

/// Registry snapshot in draw order (back to front)
pub fn draw_commands(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    for category in Category::ALL {
        if category == Category::BossArmorSegment {
            if let Some((_, boss)) = state.registry.boss() {
                for segment in boss.armor.iter().filter(|s| s.health > 0) {
                    let mut cmd = DrawCommand::new(category, &segment.rect, palette::ARMOR);
                    cmd.alpha = damage_alpha(segment.health, segment.max_health);
                    commands.push(cmd);
                }
            }
            continue;
        }

        for entity in state.registry.iter(category) {
            let (color, variant) = palette::entity_color(entity);
            let mut cmd = DrawCommand::new(category, &entity.rect, color);
            cmd.variant = variant;
            if let EntityKind::Shield { health, max_health } = entity.kind {
                cmd.alpha = damage_alpha(health, max_health);
            }
            commands.push(cmd);
        }
    }
    commands
}

fn start_text() -> Vec<ScreenText> {
    let x = SCREEN_WIDTH / 2.0;
    vec![
        ScreenText::new("ROCKET INVADERS", 64, x, 180.0, palette::TEXT),
        ScreenText::new("Press SPACE to Start", 36, x, 320.0, palette::TEXT),
        ScreenText::new(
            "Left/Right to Move, Space to Shoot, M for Mega Shot",
            28,
            x,
            370.0,
            palette::TEXT,
        ),
    ]
}

fn game_over_text(score: u64) -> Vec<ScreenText> {
    let x = SCREEN_WIDTH / 2.0;
    vec![
        ScreenText::new("GAME OVER", 64, x, 200.0, palette::TEXT_ALERT),
        ScreenText::new(format!("Score: {score}"), 36, x, 300.0, palette::TEXT),
        ScreenText::new("Press R to Restart or Q to Quit", 32, x, 400.0, palette::TEXT),
    ]
}

fn hud_text(hud: &Hud) -> Vec<ScreenText> {
    vec![
        ScreenText::new(format!("Score: {}", hud.score), 28, 90.0, 20.0, palette::TEXT),
        ScreenText::new(
            format!("Lives: {}", hud.lives),
            28,
            SCREEN_WIDTH - 100.0,
            20.0,
            palette::TEXT,
        ),
        ScreenText::new(
            format!("Mega: {}s", hud.special_cooldown_secs),
            24,
            SCREEN_WIDTH / 2.0,
            20.0,
            palette::TEXT_COOLDOWN,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Entity;

    fn playing_state() -> GameState {
        let mut state = GameState::new(11);
        state.mode = GameMode::Playing;
        state
    }

    #[test]
    fn test_start_screen_has_title_only() {
        let state = GameState::new(11);
        let frame = FrameOutput::capture(&state);
        assert_eq!(frame.mode, GameMode::StartScreen);
        assert!(frame.commands.is_empty());
        assert!(frame.text.iter().any(|t| t.text == "Press SPACE to Start"));
    }

    #[test]
    fn test_game_over_shows_score() {
        let mut state = playing_state();
        state.score = 420;
        state.end_game(crate::sim::GameOverReason::EnemyContact);
        let frame = FrameOutput::capture(&state);
        assert!(frame.commands.is_empty());
        assert!(frame.text.iter().any(|t| t.text == "Score: 420"));
        assert!(frame.text.iter().any(|t| t.text == "GAME OVER"));
    }

    #[test]
    fn test_playing_frame_lists_every_entity() {
        let state = playing_state();
        let frame = FrameOutput::capture(&state);
        // Rocket + 4 shields + 15 enemies
        assert_eq!(frame.commands.len(), 20);
        assert_eq!(frame.commands[0].category, Category::Shield);
        assert_eq!(frame.commands.last().map(|c| c.category), Some(Category::Player));
        assert_eq!(frame.hud.score, 0);
        assert_eq!(frame.hud.lives, 3);
        assert_eq!(frame.hud.wave, 1);
        assert_eq!(frame.hud.special_cooldown_secs, 0);
        assert!(frame.hud.boss_health.is_none());
    }

    #[test]
    fn test_damaged_shield_fades() {
        let mut state = playing_state();
        if let Some(shield) = state.registry.iter_mut(Category::Shield).next() {
            shield.kind = EntityKind::Shield {
                health: 1,
                max_health: 12,
            };
        }
        let commands = draw_commands(&state);
        let alphas: Vec<u8> = commands
            .iter()
            .filter(|c| c.category == Category::Shield)
            .map(|c| c.alpha)
            .collect();
        assert_eq!(alphas, vec![60, 255, 255, 255]);
    }

    #[test]
    fn test_boss_frame_and_health_bar() {
        let mut state = playing_state();
        state.registry.clear_category(Category::StandardEnemy);
        state.registry.sweep();
        let tuning = state.tuning.clone();
        state.registry.spawn(Entity::boss(2, &tuning));
        if let Some(boss) = state.registry.boss_mut().and_then(|e| e.as_boss_mut()) {
            boss.health = 3;
            boss.armor[0].health = 1;
        }

        let frame = FrameOutput::capture(&state);
        let armor: Vec<u8> = frame
            .commands
            .iter()
            .filter(|c| c.category == Category::BossArmorSegment)
            .map(|c| c.alpha)
            .collect();
        assert_eq!(armor, vec![127, 255]);
        let bar = frame.hud.boss_health.unwrap();
        assert_eq!(bar.health, 3);
        assert!((bar.fraction - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_special_cooldown_in_whole_seconds() {
        let mut state = playing_state();
        crate::sim::player::fire_special(&mut state);
        state.time_ms = 2_500;
        let hud = Hud::capture(&state);
        assert_eq!(hud.special_cooldown_ms, 7_500);
        assert_eq!(hud.special_cooldown_secs, 7);
        let text = hud_text(&hud);
        assert_eq!(text[2].text, "Mega: 7s");
    }

    #[test]
    fn test_frame_serializes() {
        let state = playing_state();
        let json = serde_json::to_string(&FrameOutput::capture(&state)).unwrap();
        assert!(json.contains("\"mode\":\"Playing\""));
        assert!(json.contains("StandardEnemy"));
    }
}
