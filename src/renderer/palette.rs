//! Colors for game elements (RGBA)

use crate::sim::{Entity, EntityKind};

pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const ROCKET: [f32; 4] = [0.0, 0.5, 1.0, 1.0];
pub const PLAYER_SHOT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const SPECIAL_SHOT: [f32; 4] = [0.78, 0.0, 0.78, 1.0];
pub const BOMB: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const SHIELD: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const FLYER: [f32; 4] = [0.4, 0.4, 0.4, 1.0];
pub const BOSS: [f32; 4] = [1.0, 0.55, 0.0, 1.0];
pub const ARMOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const BOSS_BAR_EMPTY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const BOSS_BAR_FILL: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const TEXT_ALERT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const TEXT_COOLDOWN: [f32; 4] = [1.0, 0.78, 0.78, 1.0];

/// Standard enemy tiers, top row first
pub const ALIEN_TIERS: [[f32; 4]; 5] = [
    [0.0, 1.0, 0.0, 1.0],  // Green
    [0.0, 0.7, 0.0, 1.0],  // Dark green
    [1.0, 1.0, 0.0, 1.0],  // Yellow
    [1.0, 0.55, 0.0, 1.0], // Orange
    [1.0, 0.0, 0.0, 1.0],  // Red
];

/// Color tier for an enemy row (wraps for grids deeper than the palette)
#[inline]
pub fn alien_tier(row: u32) -> usize {
    row as usize % ALIEN_TIERS.len()
}

/// Base color and draw variant for an entity
pub fn entity_color(entity: &Entity) -> ([f32; 4], u32) {
    match &entity.kind {
        EntityKind::Player => (ROCKET, 0),
        EntityKind::StandardEnemy { row } => {
            let tier = alien_tier(*row);
            (ALIEN_TIERS[tier], tier as u32)
        }
        EntityKind::PlayerShot { .. } => (PLAYER_SHOT, 0),
        // Variant 1 marks a boss-fired special
        EntityKind::SpecialShot { vy, .. } => (SPECIAL_SHOT, u32::from(*vy > 0.0)),
        EntityKind::Bomb { .. } => (BOMB, 0),
        EntityKind::Shield { .. } => (SHIELD, 0),
        EntityKind::BonusFlyer { .. } => (FLYER, 0),
        EntityKind::Boss(_) => (BOSS, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alien_tier_wraps() {
        assert_eq!(alien_tier(0), 0);
        assert_eq!(alien_tier(4), 4);
        assert_eq!(alien_tier(5), 0);
        assert_eq!(alien_tier(7), 2);
    }

    #[test]
    fn test_row_colors() {
        let (top, _) = entity_color(&Entity::alien(0, 0));
        let (third, variant) = entity_color(&Entity::alien(2, 0));
        assert_eq!(top, ALIEN_TIERS[0]);
        assert_eq!(third, ALIEN_TIERS[2]);
        assert_eq!(variant, 2);
    }
}
