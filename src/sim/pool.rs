//! Active entity pool
//!
//! Removal is two-phase: `remove` marks an entity and it immediately stops
//! being visible through `get`/`contains`/`iter`, while the storage itself is
//! only compacted once per frame. Strategies can therefore remove the brick
//! they are running on while other contacts for this frame are still pending.

use std::collections::HashSet;

use super::entity::{Entity, EntityId, Layer, Tag};

/// Flat entity storage, sized for hundreds of entities
#[derive(Debug, Default)]
pub struct EntityPool {
    entities: Vec<Entity>,
    /// Marked for removal, dropped at the next `compact`
    removed: HashSet<EntityId>,
    next_id: u32,
}

impl EntityPool {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(128),
            removed: HashSet::new(),
            next_id: 1,
        }
    }

    /// Allocate a fresh entity ID
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the active pool.
    ///
    /// Adding an entity whose ID is already stored (for example one removed
    /// earlier in the same frame) replaces it and makes it active again.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.removed.remove(&id);
        if let Some(slot) = self.entities.iter_mut().find(|e| e.id == id) {
            *slot = entity;
        } else {
            self.entities.push(entity);
        }
        id
    }

    /// Mark an entity for removal. Returns false if it was not active.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.removed.insert(id);
        true
    }

    /// Drop everything marked for removal
    pub fn compact(&mut self) {
        if self.removed.is_empty() {
            return;
        }
        let removed = std::mem::take(&mut self.removed);
        self.entities.retain(|e| !removed.contains(&e.id));
    }

    pub fn contains(&self, id: EntityId) -> bool {
        !self.removed.contains(&id) && self.entities.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        if self.removed.contains(&id) {
            return None;
        }
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if self.removed.contains(&id) {
            return None;
        }
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over active entities
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        let removed = &self.removed;
        self.entities.iter().filter(move |e| !removed.contains(&e.id))
    }

    /// Iterate over active entities mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        let removed = &self.removed;
        self.entities
            .iter_mut()
            .filter(move |e| !removed.contains(&e.id))
    }

    /// IDs of active entities in insertion order
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|e| e.id).collect()
    }

    pub fn find_by_tag(&self, tag: Tag) -> Option<&Entity> {
        self.iter().find(|e| e.tag == tag)
    }

    pub fn count_by_tag(&self, tag: Tag) -> usize {
        self.iter().filter(|e| e.tag == tag).count()
    }

    pub fn count_in_layer(&self, layer: Layer) -> usize {
        self.iter().filter(|e| e.layer == layer).count()
    }

    /// Number of active entities
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entity; IDs keep counting up
    pub fn clear(&mut self) {
        self.entities.clear();
        self.removed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(pool: &mut EntityPool, tag: Tag) -> EntityId {
        let id = pool.next_id();
        pool.add(Entity::new(id, tag))
    }

    #[test]
    fn test_removed_entity_is_hidden_before_compaction() {
        let mut pool = EntityPool::new();
        let brick = spawn(&mut pool, Tag::Brick);
        let wall = spawn(&mut pool, Tag::Wall);

        assert!(pool.remove(brick));
        assert!(!pool.contains(brick));
        assert!(pool.get(brick).is_none());
        assert_eq!(pool.ids(), vec![wall]);

        pool.compact();
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_double_remove_reports_false() {
        let mut pool = EntityPool::new();
        let brick = spawn(&mut pool, Tag::Brick);
        assert!(pool.remove(brick));
        assert!(!pool.remove(brick));
        pool.compact();
        assert!(!pool.remove(brick));
    }

    #[test]
    fn test_readd_after_remove_in_same_frame() {
        let mut pool = EntityPool::new();
        let id = pool.next_id();
        let icon = Entity::new(id, Tag::HeartIcon).with_layer(Layer::Background);
        pool.add(icon.clone());
        pool.remove(id);
        pool.add(icon);
        pool.compact();
        assert!(pool.contains(id));
        assert_eq!(pool.count_by_tag(Tag::HeartIcon), 1);
        assert_eq!(pool.count_in_layer(Layer::Background), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut pool = EntityPool::new();
        let a = pool.next_id();
        let b = pool.next_id();
        assert_ne!(a, b);
        pool.clear();
        assert_ne!(pool.next_id(), b);
    }
}
