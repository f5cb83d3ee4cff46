//! Autonomous per-category behavior
//!
//! Formation descent, bomb drops, boss patrol and fire, flyer flight and
//! projectile travel. All of it runs before collision resolution.

use glam::Vec2;
use rand::seq::IndexedRandom;

use super::director::flyer_interval;
use super::entity::{Category, Entity, EntityKind};
use super::state::{GameEvent, GameOverReason, GameState};
use crate::consts::*;

/// Run every behavior update for one tick
pub fn update(state: &mut GameState) {
    if state.director.boss_active() {
        update_boss(state);
    } else {
        update_formation(state);
        if state.is_terminal() {
            return;
        }
        drop_bombs(state);
    }
    schedule_flyer(state);
    update_projectiles(state);
    update_flyers(state);
}

/// Lock-step formation move on the move timer
///
/// The whole block shifts sideways; if any enemy touched a side margin the
/// block reverses and drops a row, and a drop past the depth limit ends the
/// run on the spot.
pub fn update_formation(state: &mut GameState) {
    let now = state.time_ms;
    let formation = &mut state.director.formation;
    if now.saturating_sub(formation.last_move_ms) <= formation.move_delay_ms {
        return;
    }
    formation.last_move_ms = now;

    let dx = formation.direction * state.tuning.alien_step;
    let mut hit_edge = false;
    for alien in state.registry.iter_mut(Category::StandardEnemy) {
        alien.rect.pos.x += dx;
        if alien.rect.right() >= SCREEN_WIDTH - ALIEN_SIDE_MARGIN
            || alien.rect.left() <= ALIEN_SIDE_MARGIN
        {
            hit_edge = true;
        }
    }

    let mut breached = false;
    if hit_edge {
        formation.direction = -formation.direction;
        let depth_limit = SCREEN_HEIGHT - ALIEN_DEPTH_LIMIT;
        for alien in state.registry.iter_mut(Category::StandardEnemy) {
            alien.rect.pos.y += state.tuning.alien_drop;
            if alien.rect.bottom() >= depth_limit {
                breached = true;
            }
        }
    }

    let survivors = state.registry.count(Category::StandardEnemy);
    if survivors > 0 {
        state.director.formation.move_delay_ms = state.tuning.alien_move_delay_for(survivors);
    }

    if breached {
        log::info!("Formation reached the depth limit");
        state.end_game(GameOverReason::FormationBreach);
    }
}

/// A random survivor drops a bomb on the bomb timer
pub fn drop_bombs(state: &mut GameState) {
    let now = state.time_ms;
    if now.saturating_sub(state.director.last_bomb_ms) <= state.tuning.bomb_interval_ms {
        return;
    }
    let shooters: Vec<Vec2> = state
        .registry
        .iter(Category::StandardEnemy)
        .map(|a| Vec2::new(a.rect.center().x, a.rect.bottom()))
        .collect();
    let Some(&origin) = shooters.choose(&mut state.rng) else {
        return;
    };
    state.director.last_bomb_ms = now;
    let speed = state.tuning.bomb_speed;
    state.registry.spawn(Entity::bomb(origin, speed));
}

/// Boss patrol, armor follow and outbound fire
pub fn update_boss(state: &mut GameState) {
    let now = state.time_ms;
    let cooldown = state.tuning.boss_shot_cooldown_ms;
    let special_speed = state.tuning.special_speed;
    let growth = state.tuning.special_growth;

    let Some(entity) = state.registry.boss_mut() else {
        return;
    };
    let boss_id = entity.id;
    let rect = &mut entity.rect;
    let EntityKind::Boss(boss) = &mut entity.kind else {
        return;
    };

    rect.pos.x += boss.speed * boss.direction;
    if rect.right() >= SCREEN_WIDTH || rect.left() <= 0.0 {
        boss.direction = -boss.direction;
    }

    for segment in &mut boss.armor {
        debug_assert_eq!(segment.owner, boss_id, "armor attached to a foreign boss");
        segment.follow(rect);
    }

    let ready = boss
        .last_shot_ms
        .is_none_or(|last| now.saturating_sub(last) > cooldown);
    if !ready {
        return;
    }
    boss.last_shot_ms = Some(now);
    let origin = Vec2::new(rect.center().x, rect.bottom());
    state
        .registry
        .spawn(Entity::special_shot(origin, special_speed, growth));
}

/// Launch the bonus flyer when its timer comes up
pub fn schedule_flyer(state: &mut GameState) {
    if state.time_ms < state.director.next_flyer_ms {
        return;
    }
    let points = *FLYER_REWARDS
        .choose(&mut state.rng)
        .unwrap_or(&FLYER_REWARDS[0]);
    let next = state.time_ms + flyer_interval(&state.tuning, &mut state.rng);
    state.director.next_flyer_ms = next;

    if state.registry.count(Category::BonusFlyer) > 0 {
        return;
    }
    state
        .registry
        .spawn(Entity::flyer(state.tuning.flyer_speed, points));
    state.events.push(GameEvent::FlyerSpawned { points });
    log::debug!("Bonus flyer worth {} launched", points);
}

/// Move shots and bombs, grow specials, cull anything off screen
pub fn update_projectiles(state: &mut GameState) {
    for category in [Category::PlayerShot, Category::Bomb, Category::SpecialShot] {
        for entity in state.registry.iter_mut(category) {
            let expired = match entity.kind {
                EntityKind::PlayerShot { vy } | EntityKind::Bomb { vy } => {
                    entity.rect.pos.y += vy;
                    false
                }
                EntityKind::SpecialShot { vy, growth } => {
                    entity.rect.pos.y += vy;
                    entity.rect.grow(growth);
                    entity.rect.size.x > SPECIAL_MAX_WIDTH
                }
                _ => false,
            };
            if expired || entity.rect.is_off_screen() {
                entity.alive = false;
            }
        }
    }
}

/// Straight-line flyer flight
pub fn update_flyers(state: &mut GameState) {
    for flyer in state.registry.iter_mut(Category::BonusFlyer) {
        if let EntityKind::BonusFlyer { vx, .. } = flyer.kind {
            flyer.rect.pos.x += vx;
        }
        if flyer.rect.left() > SCREEN_WIDTH {
            flyer.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::director::spawn_grid;
    use crate::sim::state::GameMode;

    fn playing_state() -> GameState {
        let mut state = GameState::new(3);
        state.mode = GameMode::Playing;
        state
    }

    fn alien_positions(state: &GameState) -> Vec<Vec2> {
        state
            .registry
            .iter(Category::StandardEnemy)
            .map(|a| a.rect.pos)
            .collect()
    }

    #[test]
    fn test_formation_waits_for_timer() {
        let mut state = playing_state();
        let before = alien_positions(&state);
        state.time_ms = 600;
        update_formation(&mut state);
        assert_eq!(alien_positions(&state), before);

        state.time_ms = 601;
        update_formation(&mut state);
        let after = alien_positions(&state);
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(a.x, b.x + 20.0);
            assert_eq!(a.y, b.y);
        }
    }

    #[test]
    fn test_formation_reverses_and_drops_at_edge() {
        let mut state = playing_state();
        // Push the block against the right margin
        for alien in state.registry.iter_mut(Category::StandardEnemy) {
            alien.rect.pos.x += 470.0;
        }
        let before = alien_positions(&state);
        state.time_ms = 700;
        update_formation(&mut state);

        assert_eq!(state.director.formation.direction, -1.0);
        for (b, a) in before.iter().zip(alien_positions(&state)) {
            assert_eq!(a.y, b.y + 24.0);
        }
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_move_delay_shrinks_with_kills() {
        let mut state = playing_state();
        let ids = state.registry.ids(Category::StandardEnemy);
        for id in &ids[..10] {
            state.registry.remove(*id);
        }
        state.registry.sweep();
        state.time_ms = 700;
        update_formation(&mut state);
        assert_eq!(state.director.formation.move_delay_ms, 100);
    }

    #[test]
    fn test_formation_breach_is_terminal() {
        let mut state = playing_state();
        // One enemy left, sitting at the right edge just above the limit
        let ids = state.registry.ids(Category::StandardEnemy);
        for id in &ids[1..] {
            state.registry.remove(*id);
        }
        state.registry.sweep();
        let lives = state.lives;
        for alien in state.registry.iter_mut(Category::StandardEnemy) {
            alien.rect.pos = Vec2::new(SCREEN_WIDTH - 40.0, SCREEN_HEIGHT - 160.0);
        }
        state.time_ms = 700;
        update_formation(&mut state);

        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::FormationBreach));
        assert_eq!(state.lives, lives);
    }

    #[test]
    fn test_bomb_drops_from_survivor() {
        let mut state = playing_state();
        state.time_ms = 1201;
        drop_bombs(&mut state);
        assert_eq!(state.registry.count(Category::Bomb), 1);

        // Timer gates the next drop
        state.time_ms = 2000;
        drop_bombs(&mut state);
        assert_eq!(state.registry.count(Category::Bomb), 1);

        let bomb = state.registry.iter(Category::Bomb).next().unwrap();
        let from_alien = state.registry.iter(Category::StandardEnemy).any(|a| {
            (a.rect.center().x - bomb.rect.center().x).abs() < 0.01
                && (a.rect.bottom() - bomb.rect.center().y).abs() < 0.01
        });
        assert!(from_alien);
    }

    #[test]
    fn test_no_bomb_without_survivors() {
        let mut state = playing_state();
        state.registry.clear_category(Category::StandardEnemy);
        state.registry.sweep();
        state.time_ms = 5000;
        drop_bombs(&mut state);
        assert_eq!(state.registry.count(Category::Bomb), 0);
    }

    #[test]
    fn test_special_grows_then_expires() {
        let mut state = playing_state();
        state
            .registry
            .spawn(Entity::special_shot(Vec2::new(400.0, 500.0), -8.0, 2.0));
        update_projectiles(&mut state);
        let shot = state.registry.iter(Category::SpecialShot).next().unwrap();
        assert_eq!(shot.rect.size, Vec2::new(18.0, 26.0));

        // 16 -> 122 takes 53 growth steps
        for _ in 0..52 {
            update_projectiles(&mut state);
        }
        assert_eq!(state.registry.count(Category::SpecialShot), 0);
    }

    #[test]
    fn test_shots_culled_off_screen() {
        let mut state = playing_state();
        state
            .registry
            .spawn(Entity::player_shot(Vec2::new(100.0, 5.0), 10.0));
        state
            .registry
            .spawn(Entity::bomb(Vec2::new(100.0, SCREEN_HEIGHT + 5.0), 5.0));
        update_projectiles(&mut state);
        // Shot bottom is 4 after moving, still visible; bomb is gone
        assert_eq!(state.registry.count(Category::PlayerShot), 1);
        assert_eq!(state.registry.count(Category::Bomb), 0);
        update_projectiles(&mut state);
        assert_eq!(state.registry.count(Category::PlayerShot), 0);
    }

    #[test]
    fn test_boss_patrols_and_fires() {
        let mut state = playing_state();
        state.registry.clear_category(Category::StandardEnemy);
        state.registry.sweep();
        let tuning = state.tuning.clone();
        state.registry.spawn(Entity::boss(2, &tuning));
        state.director.state = crate::sim::DirectorState::BossActive;
        state.time_ms = 100;
        update_boss(&mut state);

        let (body, boss) = state.registry.boss().unwrap();
        assert_eq!(body.rect.left(), 353.0);
        for segment in &boss.armor {
            assert_eq!(segment.rect.center().x, body.rect.center().x + segment.offset_x);
        }
        // First active tick fires immediately
        assert_eq!(state.registry.count(Category::SpecialShot), 1);
        assert!(
            state
                .registry
                .iter(Category::SpecialShot)
                .all(|s| s.is_outbound_special())
        );

        state.time_ms = 5100;
        update_boss(&mut state);
        assert_eq!(state.registry.count(Category::SpecialShot), 1);
        state.time_ms = 5101;
        update_boss(&mut state);
        assert_eq!(state.registry.count(Category::SpecialShot), 2);
    }

    #[test]
    fn test_boss_reverses_at_wall() {
        let mut state = playing_state();
        state.registry.clear_category(Category::StandardEnemy);
        state.registry.sweep();
        let tuning = state.tuning.clone();
        state.registry.spawn(Entity::boss(0, &tuning));
        if let Some(boss) = state.registry.boss_mut() {
            boss.rect.pos.x = SCREEN_WIDTH - BOSS_WIDTH - 1.0;
        }
        update_boss(&mut state);
        assert_eq!(state.registry.boss().unwrap().1.direction, -1.0);
    }

    #[test]
    fn test_flyer_flies_and_leaves() {
        let mut state = playing_state();
        state.time_ms = state.director.next_flyer_ms;
        schedule_flyer(&mut state);
        assert_eq!(state.registry.count(Category::BonusFlyer), 1);
        assert!(state.director.next_flyer_ms >= state.time_ms + 15_000);

        let flyer = state.registry.iter(Category::BonusFlyer).next().unwrap();
        let EntityKind::BonusFlyer { points, .. } = flyer.kind else {
            panic!("not a flyer");
        };
        assert!(FLYER_REWARDS.contains(&points));

        // (800 + 60) / 5 = 172 ticks to clear the right edge
        for _ in 0..173 {
            update_flyers(&mut state);
        }
        state.registry.sweep();
        assert_eq!(state.registry.count(Category::BonusFlyer), 0);
    }

    #[test]
    fn test_fresh_grid_resets_speed() {
        let mut state = playing_state();
        state.director.formation.move_delay_ms = 80;
        state.director.formation.direction = -1.0;
        spawn_grid(&mut state);
        assert_eq!(state.director.formation.move_delay_ms, 600);
        assert_eq!(state.director.formation.direction, 1.0);
    }
}
