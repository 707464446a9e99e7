//! Collision detection and response for axis-aligned boxes
//!
//! Every entity is a box (top-left + size). Contact normals are the axis of
//! least penetration, which is all the ball reflection needs.

use glam::Vec2;

use super::entity::Entity;

/// Information about a contact between two entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Unit normal pointing from the other entity toward this one
    pub normal: Vec2,
    /// Center of the overlap region
    pub point: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

impl Collision {
    /// Same contact seen from the other entity
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            ..*self
        }
    }
}

/// Check overlap between two boxes.
///
/// Returns the contact from `a`'s point of view (normal points from `b`
/// toward `a`). Touching edges do not count as a contact.
pub fn aabb_collision(a: &Entity, b: &Entity) -> Option<Collision> {
    let (a_min, a_max) = (a.pos, a.max());
    let (b_min, b_max) = (b.pos, b.max());

    let overlap_x = a_max.x.min(b_max.x) - a_min.x.max(b_min.x);
    let overlap_y = a_max.y.min(b_max.y) - a_min.y.max(b_min.y);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    let point = Vec2::new(
        (a_min.x.max(b_min.x) + a_max.x.min(b_max.x)) * 0.5,
        (a_min.y.max(b_min.y) + a_max.y.min(b_max.y)) * 0.5,
    );
    let delta = a.center() - b.center();

    // Resolve along the shallower axis
    let (normal, penetration) = if overlap_x < overlap_y {
        (Vec2::new(signum_or_one(delta.x), 0.0), overlap_x)
    } else {
        (Vec2::new(0.0, signum_or_one(delta.y)), overlap_y)
    };

    Some(Collision {
        normal,
        point,
        penetration,
    })
}

#[inline]
fn signum_or_one(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
