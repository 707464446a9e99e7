//! Minimal collision substrate
//!
//! Integrates velocities and reports collision-enter events: a pair produces
//! one event on the first frame it overlaps and re-arms once it separates.
//! Responses are not applied here; the owner dispatches each `Contact` to
//! the entities' behaviors.

use std::collections::HashSet;

use super::collision::{Collision, aabb_collision};
use super::entity::EntityId;
use super::pool::EntityPool;

/// A new contact, seen from `a` (normal points from `b` toward `a`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
    pub collision: Collision,
}

/// Contact tracking between frames
#[derive(Debug, Default)]
pub struct Physics {
    /// Pairs overlapping at the end of the last detection pass
    touching: HashSet<(EntityId, EntityId)>,
}

impl Physics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every active entity by its velocity
    pub fn integrate(pool: &mut EntityPool, dt: f32) {
        for entity in pool.iter_mut() {
            entity.pos += entity.vel * dt;
        }
    }

    /// Find pairs that started touching since the previous pass.
    ///
    /// A pair is tested only when their layers collide and both collision
    /// filters accept each other.
    pub fn detect(&mut self, pool: &EntityPool) -> Vec<Contact> {
        let entities: Vec<_> = pool.iter().collect();
        let mut touching = HashSet::with_capacity(self.touching.len());
        let mut contacts = Vec::new();

        for (i, a) in entities.iter().enumerate() {
            for b in &entities[i + 1..] {
                if !a.layer.collides_with(b.layer) {
                    continue;
                }
                if !a.should_collide_with(b) || !b.should_collide_with(a) {
                    continue;
                }
                let Some(collision) = aabb_collision(a, b) else {
                    continue;
                };
                let key = pair_key(a.id, b.id);
                if !self.touching.contains(&key) {
                    contacts.push(Contact {
                        a: a.id,
                        b: b.id,
                        collision,
                    });
                }
                touching.insert(key);
            }
        }

        self.touching = touching;
        contacts
    }

    /// Forget all tracked contacts (level rebuild)
    pub fn reset(&mut self) {
        self.touching.clear();
    }

    /// Number of pairs currently overlapping
    pub fn touching_pairs(&self) -> usize {
        self.touching.len()
    }
}

fn pair_key(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Entity, Layer, Tag};
    use glam::Vec2;

    fn add_box(pool: &mut EntityPool, tag: Tag, layer: Layer, pos: Vec2) -> EntityId {
        let id = pool.next_id();
        pool.add(
            Entity::new(id, tag)
                .with_layer(layer)
                .with_pos(pos)
                .with_size(Vec2::new(10.0, 10.0)),
        )
    }

    #[test]
    fn test_contact_fires_once_per_touch() {
        let mut pool = EntityPool::new();
        let mut physics = Physics::new();
        let a = add_box(&mut pool, Tag::MainBall, Layer::Default, Vec2::ZERO);
        add_box(&mut pool, Tag::Wall, Layer::StaticObjects, Vec2::new(5.0, 0.0));

        assert_eq!(physics.detect(&pool).len(), 1);
        assert!(physics.detect(&pool).is_empty(), "still touching, no new event");

        // Separate, then touch again
        pool.get_mut(a).unwrap().pos = Vec2::new(-50.0, 0.0);
        assert!(physics.detect(&pool).is_empty());
        assert_eq!(physics.touching_pairs(), 0);
        pool.get_mut(a).unwrap().pos = Vec2::ZERO;
        assert_eq!(physics.detect(&pool).len(), 1);
    }

    #[test]
    fn test_background_layer_never_collides() {
        let mut pool = EntityPool::new();
        let mut physics = Physics::new();
        add_box(&mut pool, Tag::MainBall, Layer::Default, Vec2::ZERO);
        add_box(&mut pool, Tag::HeartIcon, Layer::Background, Vec2::ZERO);
        assert!(physics.detect(&pool).is_empty());
    }

    #[test]
    fn test_integrate_moves_by_velocity() {
        let mut pool = EntityPool::new();
        let id = add_box(&mut pool, Tag::MainBall, Layer::Default, Vec2::ZERO);
        pool.get_mut(id).unwrap().vel = Vec2::new(60.0, -30.0);
        Physics::integrate(&mut pool, 0.5);
        assert_eq!(pool.get(id).unwrap().pos, Vec2::new(30.0, -15.0));
    }

    #[test]
    fn test_removed_entities_are_skipped() {
        let mut pool = EntityPool::new();
        let mut physics = Physics::new();
        let a = add_box(&mut pool, Tag::MainBall, Layer::Default, Vec2::ZERO);
        add_box(&mut pool, Tag::Brick, Layer::Default, Vec2::new(5.0, 5.0));
        pool.remove(a);
        assert!(physics.detect(&pool).is_empty());
    }
}
