//! Entity types
//!
//! Every movable or destructible object shares one shape: an axis-aligned
//! rectangle plus a tagged payload. Category-specific rules are free
//! functions that match on the payload.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Entity category (one registry bucket each, armor lives inside its boss)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    StandardEnemy,
    PlayerShot,
    SpecialShot,
    Bomb,
    Shield,
    BonusFlyer,
    Boss,
    BossArmorSegment,
}

impl Category {
    pub const COUNT: usize = 9;

    /// Categories in draw order (back to front)
    pub const ALL: [Category; Category::COUNT] = [
        Category::Shield,
        Category::StandardEnemy,
        Category::BonusFlyer,
        Category::Boss,
        Category::BossArmorSegment,
        Category::Bomb,
        Category::SpecialShot,
        Category::PlayerShot,
        Category::Player,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Slot handle handed out by the registry
///
/// Ids are never reused within a session, so a stale id simply stops
/// resolving once its entity is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Placeholder carried by an entity before the registry adopts it
    pub const UNASSIGNED: EntityId = EntityId(0);
}

/// Axis-aligned bounding box (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    /// Anchor at the middle of the top edge
    pub fn from_midtop(x: f32, top: f32, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(x - size.x / 2.0, top),
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Resize in place, keeping the centre fixed
    pub fn grow(&mut self, amount: f32) {
        let center = self.center();
        self.size += Vec2::splat(amount);
        self.pos = center - self.size / 2.0;
    }

    /// Strict overlap on both axes (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True once the rectangle has fully left the playfield
    pub fn is_off_screen(&self) -> bool {
        self.bottom() < 0.0
            || self.top() > SCREEN_HEIGHT
            || self.right() < 0.0
            || self.left() > SCREEN_WIDTH
    }
}

/// Alpha for a damaged shield or armor plate
pub fn damage_alpha(health: i32, max_health: i32) -> u8 {
    if max_health <= 0 {
        return MIN_DAMAGE_ALPHA;
    }
    let alpha = 255 * health.max(0) / max_health;
    alpha.clamp(MIN_DAMAGE_ALPHA as i32, 255) as u8
}

/// A detachable plate that shields the boss body
///
/// `owner` is a back-reference used only for position-following; the boss
/// owns the plate's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmorSegment {
    pub rect: Rect,
    pub offset_x: f32,
    pub health: i32,
    pub max_health: i32,
    pub owner: EntityId,
}

impl ArmorSegment {
    /// Take one hit, returns true if the plate broke
    pub fn hit(&mut self) -> bool {
        self.health -= 1;
        self.health <= 0
    }

    /// Snap under the boss body at this plate's offset
    pub fn follow(&mut self, boss_rect: &Rect) {
        let center_x = boss_rect.center().x + self.offset_x;
        self.rect.pos = Vec2::new(
            center_x - self.rect.size.x / 2.0,
            boss_rect.bottom() + ARMOR_GAP,
        );
    }
}

/// Boss payload
#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub health: i32,
    pub max_health: i32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub speed: f32,
    /// None until the first shot
    pub last_shot_ms: Option<u64>,
    pub armor: Vec<ArmorSegment>,
}

/// Category-specific payload
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Player,
    StandardEnemy { row: u32 },
    PlayerShot { vy: f32 },
    /// Negative `vy` travels up toward the boss (player-fired)
    SpecialShot { vy: f32, growth: f32 },
    Bomb { vy: f32 },
    Shield { health: i32, max_health: i32 },
    BonusFlyer { vx: f32, points: u32 },
    Boss(Boss),
}

/// A live object in the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub rect: Rect,
    pub kind: EntityKind,
    pub(crate) alive: bool,
}

impl Entity {
    pub fn new(rect: Rect, kind: EntityKind) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            rect,
            kind,
            alive: true,
        }
    }

    pub fn category(&self) -> Category {
        match self.kind {
            EntityKind::Player => Category::Player,
            EntityKind::StandardEnemy { .. } => Category::StandardEnemy,
            EntityKind::PlayerShot { .. } => Category::PlayerShot,
            EntityKind::SpecialShot { .. } => Category::SpecialShot,
            EntityKind::Bomb { .. } => Category::Bomb,
            EntityKind::Shield { .. } => Category::Shield,
            EntityKind::BonusFlyer { .. } => Category::BonusFlyer,
            EntityKind::Boss(_) => Category::Boss,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn as_boss(&self) -> Option<&Boss> {
        match &self.kind {
            EntityKind::Boss(boss) => Some(boss),
            _ => None,
        }
    }

    pub fn as_boss_mut(&mut self) -> Option<&mut Boss> {
        match &mut self.kind {
            EntityKind::Boss(boss) => Some(boss),
            _ => None,
        }
    }

    /// Special shot travelling up toward the boss
    pub fn is_inbound_special(&self) -> bool {
        matches!(self.kind, EntityKind::SpecialShot { vy, .. } if vy < 0.0)
    }

    /// Special shot fired down by the boss
    pub fn is_outbound_special(&self) -> bool {
        matches!(self.kind, EntityKind::SpecialShot { vy, .. } if vy > 0.0)
    }

    /// Damage a shield, returns true if it crumbled
    pub fn hit_shield(&mut self) -> bool {
        match &mut self.kind {
            EntityKind::Shield { health, .. } => {
                *health -= 1;
                *health <= 0
            }
            _ => false,
        }
    }

    // --- Constructors ---

    pub fn rocket() -> Self {
        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - ROCKET_Y_FROM_BOTTOM);
        Self::new(
            Rect::from_center(center, Vec2::new(ROCKET_WIDTH, ROCKET_HEIGHT)),
            EntityKind::Player,
        )
    }

    pub fn alien(row: u32, col: u32) -> Self {
        let x = ALIEN_X_MARGIN + col as f32 * ALIEN_X_SPACING;
        let y = ALIEN_Y_MARGIN + row as f32 * ALIEN_Y_SPACING;
        Self::new(
            Rect::new(x, y, ALIEN_WIDTH, ALIEN_HEIGHT),
            EntityKind::StandardEnemy { row },
        )
    }

    /// Standard shot centred on `center`
    pub fn player_shot(center: Vec2, speed: f32) -> Self {
        Self::new(
            Rect::from_center(center, Vec2::new(SHOT_WIDTH, SHOT_HEIGHT)),
            EntityKind::PlayerShot { vy: -speed },
        )
    }

    /// Special shot centred on `center`; `vy < 0` flies up
    pub fn special_shot(center: Vec2, vy: f32, growth: f32) -> Self {
        Self::new(
            Rect::from_center(center, Vec2::new(SPECIAL_WIDTH, SPECIAL_HEIGHT)),
            EntityKind::SpecialShot { vy, growth },
        )
    }

    pub fn bomb(center: Vec2, speed: f32) -> Self {
        Self::new(
            Rect::from_center(center, Vec2::new(BOMB_WIDTH, BOMB_HEIGHT)),
            EntityKind::Bomb { vy: speed },
        )
    }

    /// Shield `index` of `count`, evenly spaced across the screen
    pub fn shield(index: u32, count: u32, health: i32) -> Self {
        let x = ((index + 1) as f32 * SCREEN_WIDTH / (count + 1) as f32).floor();
        let center = Vec2::new(x, SCREEN_HEIGHT - SHIELD_Y_FROM_BOTTOM);
        Self::new(
            Rect::from_center(center, Vec2::new(SHIELD_WIDTH, SHIELD_HEIGHT)),
            EntityKind::Shield {
                health,
                max_health: health,
            },
        )
    }

    /// Flyer entering just off the left edge
    pub fn flyer(speed: f32, points: u32) -> Self {
        Self::new(
            Rect::new(-FLYER_WIDTH, FLYER_Y, FLYER_WIDTH, FLYER_HEIGHT),
            EntityKind::BonusFlyer { vx: speed, points },
        )
    }

    /// Boss with `armor_count` plates spread under its body
    pub fn boss(armor_count: u32, tuning: &Tuning) -> Self {
        let rect = Rect::from_midtop(
            SCREEN_WIDTH / 2.0,
            BOSS_TOP,
            Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
        );
        let spacing = (BOSS_WIDTH as u32 / (armor_count + 1)) as f32;
        let armor = (0..armor_count)
            .map(|i| {
                let mut segment = ArmorSegment {
                    rect: Rect::new(0.0, 0.0, ARMOR_WIDTH, ARMOR_HEIGHT),
                    offset_x: -BOSS_WIDTH / 2.0 + spacing * (i + 1) as f32,
                    health: tuning.armor_health,
                    max_health: tuning.armor_health,
                    owner: EntityId::UNASSIGNED,
                };
                segment.follow(&rect);
                segment
            })
            .collect();

        Self::new(
            rect,
            EntityKind::Boss(Boss {
                health: tuning.boss_health,
                max_health: tuning.boss_health,
                direction: 1.0,
                speed: tuning.boss_speed,
                last_shot_ms: None,
                armor,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap_requires_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Overlaps on x only
        assert!(!a.intersects(&Rect::new(5.0, 20.0, 10.0, 10.0)));
        // Touching edges
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_grow_keeps_center() {
        let mut r = Rect::from_center(Vec2::new(100.0, 100.0), Vec2::new(16.0, 24.0));
        r.grow(2.0);
        assert_eq!(r.size, Vec2::new(18.0, 26.0));
        assert_eq!(r.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_damage_alpha_floor() {
        assert_eq!(damage_alpha(12, 12), 255);
        assert_eq!(damage_alpha(6, 12), 127);
        assert_eq!(damage_alpha(1, 12), MIN_DAMAGE_ALPHA);
        assert_eq!(damage_alpha(1, 2), 127);
    }

    #[test]
    fn test_boss_armor_layout() {
        let boss = Entity::boss(2, &Tuning::default());
        let body = boss.rect;
        let armor = &boss.as_boss().unwrap().armor;
        assert_eq!(armor.len(), 2);
        // spacing = 100 / 3 = 33 -> offsets -17 and 16
        assert_eq!(armor[0].offset_x, -17.0);
        assert_eq!(armor[1].offset_x, 16.0);
        for segment in armor {
            assert_eq!(segment.rect.top(), body.bottom() + ARMOR_GAP);
            assert_eq!(segment.health, 2);
        }
    }

    #[test]
    fn test_shield_hit_counts_down() {
        let mut shield = Entity::shield(0, 4, 2);
        assert!(!shield.hit_shield());
        assert!(shield.hit_shield());
    }

    #[test]
    fn test_special_direction() {
        let up = Entity::special_shot(Vec2::ZERO, -8.0, 2.0);
        let down = Entity::special_shot(Vec2::ZERO, 8.0, 2.0);
        assert!(up.is_inbound_special() && !up.is_outbound_special());
        assert!(down.is_outbound_special() && !down.is_inbound_special());
    }
}
