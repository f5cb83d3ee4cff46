//! Player controller
//!
//! Turns raw per-tick input into rocket movement, rate-limited primary fire
//! and the cooldown-gated special attack. Also hosts the idle/demo
//! autopilot that plays on the player's behalf.

use glam::Vec2;

use super::entity::{Category, Entity};
use super::state::{GameMode, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// Fire timers for the rocket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerController {
    /// None until the first standard shot
    pub last_shot_ms: Option<u64>,
    /// None until the first special; the special starts charged
    pub last_special_ms: Option<u64>,
}

impl PlayerController {
    pub fn shot_ready(&self, now: u64, cooldown: u64) -> bool {
        self.last_shot_ms
            .is_none_or(|last| now.saturating_sub(last) > cooldown)
    }

    pub fn special_ready(&self, now: u64, cooldown: u64) -> bool {
        self.last_special_ms
            .is_none_or(|last| now.saturating_sub(last) > cooldown)
    }

    /// Milliseconds until the special can fire again
    pub fn special_remaining_ms(&self, now: u64, cooldown: u64) -> u64 {
        match self.last_special_ms {
            Some(last) => cooldown.saturating_sub(now.saturating_sub(last)),
            None => 0,
        }
    }
}

/// Apply one tick of player input
pub fn apply_input(state: &mut GameState, input: &TickInput) {
    move_rocket(state, input);
    if input.fire {
        fire(state);
    }
    if input.special {
        fire_special(state);
    }
}

/// Held left/right, clamped to the playfield
pub fn move_rocket(state: &mut GameState, input: &TickInput) {
    let speed = state.tuning.rocket_speed;
    let Some(rocket) = state.registry.player_mut() else {
        return;
    };
    let mut dx = 0.0;
    if input.left {
        dx -= speed;
    }
    if input.right {
        dx += speed;
    }
    let max_x = SCREEN_WIDTH - rocket.rect.size.x;
    rocket.rect.pos.x = (rocket.rect.pos.x + dx).clamp(0.0, max_x);
}

/// Standard shot from the rocket nose
///
/// Returns false when the cooldown is running or too many shots are already
/// in flight.
pub fn fire(state: &mut GameState) -> bool {
    let now = state.time_ms;
    if !state.controller.shot_ready(now, state.tuning.shot_cooldown_ms) {
        return false;
    }
    if state.registry.count(Category::PlayerShot) >= state.tuning.max_player_shots {
        return false;
    }
    let Some(rocket) = state.registry.player() else {
        return false;
    };
    let origin = Vec2::new(rocket.rect.center().x, rocket.rect.top());
    let shot = Entity::player_shot(origin, state.tuning.shot_speed);
    if state.registry.spawn(shot).is_none() {
        return false;
    }
    state.controller.last_shot_ms = Some(now);
    true
}

/// Growing special shot, gated only by its cooldown
pub fn fire_special(state: &mut GameState) -> bool {
    let now = state.time_ms;
    if !state
        .controller
        .special_ready(now, state.tuning.special_cooldown_ms)
    {
        return false;
    }
    let Some(rocket) = state.registry.player() else {
        return false;
    };
    let origin = Vec2::new(rocket.rect.center().x, rocket.rect.top());
    let shot = Entity::special_shot(
        origin,
        -state.tuning.special_speed,
        state.tuning.special_growth,
    );
    if state.registry.spawn(shot).is_none() {
        return false;
    }
    state.controller.last_special_ms = Some(now);
    true
}

/// Demo-mode input: chase the nearest target, dodge bombs, always fire
pub fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut out = input.clone();
    match state.mode {
        GameMode::StartScreen => {
            out.confirm = true;
            return out;
        }
        GameMode::GameOver => return out,
        GameMode::Playing => {}
    }
    let Some(rocket) = state.registry.player() else {
        return out;
    };
    let rocket_x = rocket.rect.center().x;

    // Lowest enemy is the most urgent, otherwise the boss
    let target_x = state
        .registry
        .iter(Category::StandardEnemy)
        .max_by(|a, b| {
            a.rect
                .bottom()
                .partial_cmp(&b.rect.bottom())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.rect.center().x)
        .or_else(|| state.registry.boss().map(|(e, _)| e.rect.center().x));

    let threat = state
        .registry
        .iter(Category::Bomb)
        .chain(
            state
                .registry
                .iter(Category::SpecialShot)
                .filter(|s| s.is_outbound_special()),
        )
        .filter(|p| p.rect.bottom() > rocket.rect.top() - 120.0)
        .filter(|p| (p.rect.center().x - rocket_x).abs() < (p.rect.size.x + ROCKET_WIDTH) / 2.0 + 8.0)
        .map(|p| p.rect.center().x)
        .next();

    let desired = match (threat, target_x) {
        (Some(threat_x), _) => {
            if threat_x >= rocket_x {
                rocket_x - ROCKET_WIDTH
            } else {
                rocket_x + ROCKET_WIDTH
            }
        }
        (None, Some(x)) => x,
        (None, None) => rocket_x,
    };

    let deadzone = state.tuning.rocket_speed;
    out.left = desired < rocket_x - deadzone;
    out.right = desired > rocket_x + deadzone;
    out.fire = true;
    out.special = target_x.is_some();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(5);
        state.mode = GameMode::Playing;
        state
    }

    fn rocket_x(state: &GameState) -> f32 {
        state.registry.player().unwrap().rect.left()
    }

    #[test]
    fn test_rocket_clamped_to_screen() {
        let mut state = playing_state();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            move_rocket(&mut state, &left);
        }
        assert_eq!(rocket_x(&state), 0.0);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            move_rocket(&mut state, &right);
        }
        assert_eq!(rocket_x(&state), SCREEN_WIDTH - ROCKET_WIDTH);
    }

    #[test]
    fn test_fire_rate_limited() {
        let mut state = playing_state();
        assert!(fire(&mut state));
        state.time_ms = 200;
        assert!(!fire(&mut state));
        state.time_ms = 201;
        assert!(fire(&mut state));
        assert_eq!(state.registry.count(Category::PlayerShot), 2);
    }

    #[test]
    fn test_fire_capacity_limited() {
        let mut state = playing_state();
        for i in 0..5u64 {
            state.time_ms = i * 1000;
            fire(&mut state);
        }
        assert_eq!(state.registry.count(Category::PlayerShot), 3);
    }

    #[test]
    fn test_special_cooldown_rejects_second_request() {
        let mut state = playing_state();
        assert!(fire_special(&mut state));
        assert_eq!(state.registry.count(Category::SpecialShot), 1);

        state.time_ms = 5_000;
        assert!(!fire_special(&mut state));
        assert_eq!(state.registry.count(Category::SpecialShot), 1);
        assert_eq!(
            state
                .controller
                .special_remaining_ms(state.time_ms, state.tuning.special_cooldown_ms),
            5_000
        );

        state.time_ms = 10_001;
        assert!(fire_special(&mut state));
        assert_eq!(state.registry.count(Category::SpecialShot), 2);
    }

    #[test]
    fn test_special_ignores_shot_capacity() {
        let mut state = playing_state();
        for i in 0..3u64 {
            state.time_ms = i * 1000;
            fire(&mut state);
        }
        assert!(fire_special(&mut state));
    }

    #[test]
    fn test_shot_spawns_at_rocket_nose() {
        let mut state = playing_state();
        fire(&mut state);
        let rocket = state.registry.player().unwrap().rect;
        let shot = state.registry.iter(Category::PlayerShot).next().unwrap();
        assert_eq!(shot.rect.center(), Vec2::new(rocket.center().x, rocket.top()));
    }

    #[test]
    fn test_autopilot_confirms_start() {
        let state = GameState::new(5);
        let input = autopilot(&state, &TickInput::default());
        assert!(input.confirm);
    }

    #[test]
    fn test_autopilot_dodges_bomb() {
        let mut state = playing_state();
        let rocket = state.registry.player().unwrap().rect;
        state
            .registry
            .spawn(Entity::bomb(Vec2::new(rocket.center().x + 2.0, rocket.top() - 30.0), 5.0));
        let input = autopilot(&state, &TickInput::default());
        assert!(input.left);
        assert!(!input.right);
        assert!(input.fire);
    }
}
