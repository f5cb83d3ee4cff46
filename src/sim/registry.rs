//! Entity registry
//!
//! Owns every live entity, one bucket per category. Removal only marks an
//! entity dead; `sweep` compacts the buckets once the tick is done with
//! them, so nothing iterating a snapshot of ids is ever skipped or visited
//! twice.

use super::entity::{Boss, Category, Entity, EntityId, EntityKind};

#[derive(Debug, Clone)]
pub struct Registry {
    buckets: [Vec<Entity>; Category::COUNT],
    capacity: [Option<usize>; Category::COUNT],
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let mut capacity = [None; Category::COUNT];
        capacity[Category::Player.index()] = Some(1);
        capacity[Category::Boss.index()] = Some(1);
        Self {
            buckets: Default::default(),
            capacity,
            next_id: 1,
        }
    }

    /// Cap the number of live entities in a category
    pub fn set_capacity(&mut self, category: Category, max: usize) {
        self.capacity[category.index()] = Some(max);
    }

    /// Insert an entity into its category bucket
    ///
    /// Returns `None` (and drops the entity) when the category is full, or
    /// when it would put a boss and the enemy grid on the field together.
    pub fn spawn(&mut self, mut entity: Entity) -> Option<EntityId> {
        let category = entity.category();
        if let Some(max) = self.capacity[category.index()] {
            if self.count(category) >= max {
                return None;
            }
        }
        match category {
            Category::Boss if self.count(Category::StandardEnemy) > 0 => return None,
            Category::StandardEnemy if self.count(Category::Boss) > 0 => return None,
            _ => {}
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        entity.alive = true;
        if let EntityKind::Boss(boss) = &mut entity.kind {
            for segment in &mut boss.armor {
                segment.owner = id;
            }
        }
        self.buckets[category.index()].push(entity);
        Some(id)
    }

    /// Mark an entity dead; removing an unknown or already-removed id is a no-op
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.alive = false;
                true
            }
            None => false,
        }
    }

    /// Drop dead entities and broken armor plates
    pub fn sweep(&mut self) {
        for bucket in &mut self.buckets {
            bucket.retain(|e| e.alive);
        }
        for boss in self.buckets[Category::Boss.index()].iter_mut() {
            if let EntityKind::Boss(b) = &mut boss.kind {
                b.armor.retain(|a| a.health > 0);
            }
        }
    }

    /// Remove everything (session reset); ids keep counting up
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Remove every entity in a category
    pub fn clear_category(&mut self, category: Category) {
        for entity in &mut self.buckets[category.index()] {
            entity.alive = false;
        }
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a live entity
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.buckets
            .iter()
            .flat_map(|b| b.iter())
            .find(|e| e.id == id && e.alive)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.buckets
            .iter_mut()
            .flat_map(|b| b.iter_mut())
            .find(|e| e.id == id && e.alive)
    }

    /// Live entities of a category, in spawn order
    pub fn iter(&self, category: Category) -> impl Iterator<Item = &Entity> {
        self.buckets[category.index()].iter().filter(|e| e.alive)
    }

    pub fn iter_mut(&mut self, category: Category) -> impl Iterator<Item = &mut Entity> {
        self.buckets[category.index()]
            .iter_mut()
            .filter(|e| e.alive)
    }

    pub fn for_each(&self, category: Category, mut f: impl FnMut(&Entity)) {
        self.iter(category).for_each(&mut f);
    }

    /// Snapshot of live ids, safe to hold while removing
    pub fn ids(&self, category: Category) -> Vec<EntityId> {
        self.iter(category).map(|e| e.id).collect()
    }

    /// Live entities in a category (armor counts plates on the live boss)
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::BossArmorSegment => self
                .boss()
                .map(|(_, boss)| boss.armor.iter().filter(|a| a.health > 0).count())
                .unwrap_or(0),
            _ => self.iter(category).count(),
        }
    }

    pub fn player(&self) -> Option<&Entity> {
        self.iter(Category::Player).next()
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.iter_mut(Category::Player).next()
    }

    /// The active boss and its payload
    pub fn boss(&self) -> Option<(&Entity, &Boss)> {
        self.iter(Category::Boss)
            .next()
            .and_then(|e| e.as_boss().map(|b| (e, b)))
    }

    pub fn boss_mut(&mut self) -> Option<&mut Entity> {
        self.iter_mut(Category::Boss).next()
    }
}
