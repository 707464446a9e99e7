//! Simulation module
//!
//! Entities, the active pool and the small collision substrate the game runs
//! on. Given the same seed and inputs, a frame is deterministic:
//! - Fixed timestep from the host
//! - Seeded RNG only (owned by the game manager)
//! - Stable iteration order (insertion order of the pool)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod entity;
pub mod objects;
pub mod physics;
pub mod pool;

pub use camera::Camera;
pub use collision::{Collision, aabb_collision, reflect_velocity};
pub use entity::{CoordinateSpace, Entity, EntityId, EntityKind, Layer, Tag};
pub use objects::{BallState, BrickState, FallingHeartState, PaddleState};
pub use physics::{Contact, Physics};
pub use pool::EntityPool;
