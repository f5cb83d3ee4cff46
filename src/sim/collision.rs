//! Collision resolution
//!
//! Runs after every movement update. Each rule sweeps one category pair with
//! an axis-aligned overlap test and applies its outcome immediately: a shot
//! destroyed by an earlier rule (or an earlier pair in the same rule) never
//! hits anything else this tick.

use super::entity::{Category, Entity, EntityId, EntityKind, Rect};
use super::state::{GameEvent, GameOverReason, GameState};

/// Score for destroying a standard enemy in `row` of a `total_rows` grid
///
/// Rows nearer the top are worth more.
#[inline]
pub fn enemy_points(total_rows: u32, row: u32) -> u32 {
    10 + total_rows.saturating_sub(row) * 10
}

/// Live (id, rect) pairs for a category, filtered
fn snapshot(
    state: &GameState,
    category: Category,
    keep: impl Fn(&Entity) -> bool,
) -> Vec<(EntityId, Rect)> {
    state
        .registry
        .iter(category)
        .filter(|e| keep(*e))
        .map(|e| (e.id, e.rect))
        .collect()
}

fn all(_: &Entity) -> bool {
    true
}

/// Live targets of `category` overlapping `rect`
fn overlapping(state: &GameState, category: Category, rect: &Rect) -> Vec<EntityId> {
    state
        .registry
        .iter(category)
        .filter(|e| e.rect.intersects(rect))
        .map(|e| e.id)
        .collect()
}

/// Resolve every collision rule in priority order
pub fn resolve_collisions(state: &mut GameState) {
    shots_vs_enemies(state);
    specials_vs_enemies(state);
    projectiles_vs_shields(state);
    bombs_vs_shields(state);
    bombs_vs_player(state);
    if state.is_terminal() {
        return;
    }
    enemies_vs_player(state);
    if state.is_terminal() {
        return;
    }
    flyer_hits(state);
    if state.director.boss_active() {
        boss_encounter(state);
    }
}

fn destroy_enemy(state: &mut GameState, id: EntityId) {
    let Some(enemy) = state.registry.get(id) else {
        return;
    };
    let EntityKind::StandardEnemy { row } = enemy.kind else {
        return;
    };
    let points = enemy_points(state.tuning.alien_rows, row);
    state.registry.remove(id);
    state.add_score(points);
    state.events.push(GameEvent::EnemyDestroyed { row, points });
}

fn hit_shield(state: &mut GameState, id: EntityId) {
    let Some(shield) = state.registry.get_mut(id) else {
        return;
    };
    let destroyed = shield.hit_shield();
    state.events.push(GameEvent::ShieldHit);
    if destroyed {
        state.registry.remove(id);
        state.events.push(GameEvent::ShieldDestroyed);
    }
}

/// A standard shot destroys every enemy it overlaps, then itself
pub fn shots_vs_enemies(state: &mut GameState) {
    for (shot, rect) in snapshot(state, Category::PlayerShot, all) {
        let hits = overlapping(state, Category::StandardEnemy, &rect);
        if hits.is_empty() {
            continue;
        }
        state.registry.remove(shot);
        for enemy in hits {
            destroy_enemy(state, enemy);
        }
    }
}

/// A special destroys enemies and keeps flying, whoever fired it
pub fn specials_vs_enemies(state: &mut GameState) {
    for (_, rect) in snapshot(state, Category::SpecialShot, all) {
        for enemy in overlapping(state, Category::StandardEnemy, &rect) {
            destroy_enemy(state, enemy);
        }
    }
}

/// Shots chip shields; standard shots are spent, specials are not
pub fn projectiles_vs_shields(state: &mut GameState) {
    for (shot, rect) in snapshot(state, Category::PlayerShot, all) {
        let hits = overlapping(state, Category::Shield, &rect);
        if hits.is_empty() {
            continue;
        }
        state.registry.remove(shot);
        for shield in hits {
            hit_shield(state, shield);
        }
    }
    for (_, rect) in snapshot(state, Category::SpecialShot, all) {
        for shield in overlapping(state, Category::Shield, &rect) {
            hit_shield(state, shield);
        }
    }
}

/// Bombs are absorbed by shields
pub fn bombs_vs_shields(state: &mut GameState) {
    for (bomb, rect) in snapshot(state, Category::Bomb, all) {
        let hits = overlapping(state, Category::Shield, &rect);
        if hits.is_empty() {
            continue;
        }
        state.registry.remove(bomb);
        for shield in hits {
            hit_shield(state, shield);
        }
    }
}

/// Each bomb reaching the rocket costs a life
pub fn bombs_vs_player(state: &mut GameState) {
    let Some(rocket) = state.registry.player().map(|p| p.rect) else {
        return;
    };
    for bomb in overlapping(state, Category::Bomb, &rocket) {
        if state.is_terminal() {
            break;
        }
        state.registry.remove(bomb);
        state.lose_life();
    }
}

/// Touching an enemy ends the run outright
pub fn enemies_vs_player(state: &mut GameState) {
    let Some(rocket) = state.registry.player().map(|p| p.rect) else {
        return;
    };
    if !overlapping(state, Category::StandardEnemy, &rocket).is_empty() {
        state.end_game(GameOverReason::EnemyContact);
    }
}

/// Flyer is shot down by a standard shot (spent) or a special (kept)
pub fn flyer_hits(state: &mut GameState) {
    for (flyer, rect) in snapshot(state, Category::BonusFlyer, all) {
        let shots = overlapping(state, Category::PlayerShot, &rect);
        for &shot in &shots {
            state.registry.remove(shot);
        }
        let touched = shots.is_empty()
            && state
                .registry
                .iter(Category::SpecialShot)
                .any(|s| s.rect.intersects(&rect));
        if shots.is_empty() && !touched {
            continue;
        }
        let Some(EntityKind::BonusFlyer { points, .. }) =
            state.registry.get(flyer).map(|f| f.kind.clone())
        else {
            continue;
        };
        state.registry.remove(flyer);
        state.add_score(points);
        state.events.push(GameEvent::FlyerDestroyed { points });
    }
}

/// Boss encounter
///
/// Armor intercepts first. The body only takes damage if no armor was on
/// the boss when this pass started, so a plate broken this tick still
/// shields the body for the rest of the tick.
pub fn boss_encounter(state: &mut GameState) {
    let shots = snapshot(state, Category::PlayerShot, all);
    let inbound = snapshot(state, Category::SpecialShot, |e| e.is_inbound_special());
    let mut spent: Vec<EntityId> = Vec::new();
    let mut events: Vec<GameEvent> = Vec::new();

    let Some(entity) = state.registry.boss_mut() else {
        return;
    };
    let boss_id = entity.id;
    let body = entity.rect;
    let EntityKind::Boss(boss) = &mut entity.kind else {
        return;
    };
    let armored = !boss.armor.is_empty();

    // Every plate checks standard shots, then inbound specials
    for segment in &mut boss.armor {
        debug_assert_eq!(segment.owner, boss_id, "armor attached to a foreign boss");
        for (shot, rect) in shots.iter().chain(inbound.iter()) {
            if segment.health <= 0 {
                break;
            }
            if spent.contains(shot) || !segment.rect.intersects(rect) {
                continue;
            }
            spent.push(*shot);
            events.push(GameEvent::ArmorHit);
            if segment.hit() {
                events.push(GameEvent::ArmorDestroyed);
                log::debug!("Boss armor plate destroyed");
            }
        }
    }
    boss.armor.retain(|a| a.health > 0);

    // Body hits only on a boss that started the pass bare
    if !armored {
        for (shot, rect) in &shots {
            if !spent.contains(shot) && body.intersects(rect) {
                spent.push(*shot);
                boss.health -= 1;
                events.push(GameEvent::BossHit { damage: 1 });
            }
        }
        for (shot, rect) in &inbound {
            if !spent.contains(shot) && body.intersects(rect) {
                spent.push(*shot);
                boss.health -= 2;
                events.push(GameEvent::BossHit { damage: 2 });
            }
        }
    }
    let defeated = boss.health <= 0;

    for shot in spent {
        state.registry.remove(shot);
    }
    state.events.extend(events);

    if defeated {
        state.registry.remove(boss_id);
        state.events.push(GameEvent::BossDefeated);
        log::info!("Boss defeated");
    }

    // Outbound boss specials against the rocket
    let Some(rocket) = state.registry.player().map(|p| p.rect) else {
        return;
    };
    let outbound: Vec<EntityId> = state
        .registry
        .iter(Category::SpecialShot)
        .filter(|s| s.is_outbound_special() && s.rect.intersects(&rocket))
        .map(|s| s.id)
        .collect();
    for shot in outbound {
        if state.is_terminal() {
            break;
        }
        state.registry.remove(shot);
        state.lose_life();
    }
}
