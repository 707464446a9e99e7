//! Simulation entities
//!
//! One struct for every object in the level. Position is the top-left corner
//! in window pixels (origin top-left, y down). Per-type behavior lives in
//! `EntityKind`.

use glam::Vec2;

use super::objects::{BallState, BrickState, FallingHeartState, PaddleState};
use crate::platform::Renderable;
use crate::{center_of, top_left_for_center};

/// Stable entity identifier, unique within a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Identity used by collision filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    MainBall,
    /// Small balls spawned by the extra-ball power-up
    PackBall,
    MainPaddle,
    ExtraPaddle,
    FallingHeart,
    Brick,
    Wall,
    Background,
    HeartIcon,
    LifeLabel,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::MainBall => "main ball",
            Tag::PackBall => "pack ball tag",
            Tag::MainPaddle => "main paddle",
            Tag::ExtraPaddle => "extra paddle",
            Tag::FallingHeart => "falling heart",
            Tag::Brick => "brick",
            Tag::Wall => "wall",
            Tag::Background => "background",
            Tag::HeartIcon => "heart icon",
            Tag::LifeLabel => "life label",
        }
    }

    /// Main ball or pack ball
    pub fn is_ball(&self) -> bool {
        matches!(self, Tag::MainBall | Tag::PackBall)
    }
}

/// Render/collision layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    StaticObjects,
    Default,
    Ui,
}

impl Layer {
    /// Which layer pairs are tested for contact
    pub fn collides_with(self, other: Layer) -> bool {
        matches!(
            (self, other),
            (Layer::Default, Layer::Default)
                | (Layer::Default, Layer::StaticObjects)
                | (Layer::StaticObjects, Layer::Default)
        )
    }
}

/// Coordinate space an entity is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSpace {
    /// Moves with the camera
    #[default]
    World,
    /// Fixed to the screen regardless of camera
    Camera,
}

/// Per-type state and behavior
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// Walls, background, heart icons, labels
    Static,
    Ball(BallState),
    Paddle(PaddleState),
    FallingHeart(FallingHeartState),
    Brick(BrickState),
}

/// A simulation object
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub tag: Tag,
    pub layer: Layer,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub renderable: Option<Renderable>,
    pub space: CoordinateSpace,
    pub kind: EntityKind,
}

impl Entity {
    /// Create a static entity in the default layer
    pub fn new(id: EntityId, tag: Tag) -> Self {
        Self {
            id,
            tag,
            layer: Layer::Default,
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            vel: Vec2::ZERO,
            renderable: None,
            space: CoordinateSpace::World,
            kind: EntityKind::Static,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_center(mut self, center: Vec2) -> Self {
        self.pos = top_left_for_center(center, self.size);
        self
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_renderable(mut self, renderable: Renderable) -> Self {
        self.renderable = Some(renderable);
        self
    }

    pub fn with_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    // -- Geometry --

    pub fn center(&self) -> Vec2 {
        center_of(self.pos, self.size)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.pos = top_left_for_center(center, self.size);
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Collision filter: whether this entity accepts contact with `other`.
    /// A contact is only reported when both sides accept.
    pub fn should_collide_with(&self, other: &Entity) -> bool {
        match &self.kind {
            EntityKind::FallingHeart(_) => FallingHeartState::accepts(other.tag),
            EntityKind::Paddle(_) => PaddleState::accepts(self.tag, other.tag),
            _ => true,
        }
    }

    pub fn as_ball(&self) -> Option<&BallState> {
        match &self.kind {
            EntityKind::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_paddle(&self) -> Option<&PaddleState> {
        match &self.kind {
            EntityKind::Paddle(paddle) => Some(paddle),
            _ => None,
        }
    }
}
