//! Brick collision strategies
//!
//! What a brick does when something hits it. The variant set is closed:
//! - `Basic`: the brick breaks
//! - `PowerUp`: the brick breaks and spawns a pickup (ball pack, extra
//!   paddle or falling heart)
//! - `ChangeCamera`: the brick breaks and zooms the camera onto the main ball
//! - `Double`: two power-ups frozen at construction, run in order
//!
//! A `Double` slot is either a single power-up or a pair of them, never
//! another full `Double` and never the camera, so nesting stops at one level
//! and the "both children are doubles" case is rejected by `DoubleStrategy::new`.
//!
//! Every variant consumes the struck brick. Consuming is guarded by the pool:
//! only the call that actually removes the brick decrements the brick count,
//! so a `Double` or a second contact on the same frame cannot count it twice.

pub mod factory;

pub use factory::StrategiesFactory;

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::assets::Assets;
use crate::consts::*;
use crate::counter::Counter;
use crate::platform::Renderable;
use crate::sim::{
    BallState, Camera, Entity, EntityId, EntityKind, EntityPool, FallingHeartState, PaddleState,
    Tag,
};

/// Stable identifying tag of a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyTag {
    Basic,
    ExtraBall,
    ExtraPaddle,
    ExtraHeart,
    ChangeCamera,
    Double,
}

impl StrategyTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyTag::Basic => "basic strategy",
            StrategyTag::ExtraBall => "extra ball strategy",
            StrategyTag::ExtraPaddle => "extra paddle strategy",
            StrategyTag::ExtraHeart => "extra heart strategy",
            StrategyTag::ChangeCamera => "change camera strategy",
            StrategyTag::Double => "double strategy",
        }
    }
}

/// The brick that was struck and what struck it.
///
/// Position data is captured up front because the first strategy of a
/// `Double` removes the brick before the second one runs.
#[derive(Debug, Clone)]
pub struct BrickHit {
    pub brick: EntityId,
    /// Top-left corner of the brick
    pub brick_pos: Vec2,
    pub brick_center: Vec2,
    pub other: EntityId,
    pub other_tag: Tag,
    /// Bricks left in the level
    pub bricks: Counter,
}

/// Everything a strategy may touch while it runs
pub struct StrategyContext<'a> {
    pub pool: &'a mut EntityPool,
    pub assets: &'a Assets,
    pub camera: &'a mut Option<Camera>,
    pub rng: &'a mut Pcg32,
    pub window: Vec2,
}

/// A pickup-spawning effect; the building block of `Double`
#[derive(Debug, Clone)]
pub enum PowerUp {
    /// Drop a falling heart while lives are below the cap
    ExtraHeart { lives: Counter },
    /// Add a short-lived paddle while under the paddle cap
    ExtraPaddle { paddles: Counter },
    /// Release two small balls
    ExtraBall,
}

impl PowerUp {
    pub fn tag(&self) -> StrategyTag {
        match self {
            PowerUp::ExtraHeart { .. } => StrategyTag::ExtraHeart,
            PowerUp::ExtraPaddle { .. } => StrategyTag::ExtraPaddle,
            PowerUp::ExtraBall => StrategyTag::ExtraBall,
        }
    }

    pub fn on_collision(&self, hit: &BrickHit, ctx: &mut StrategyContext<'_>) {
        consume_brick(hit, ctx.pool);
        match self {
            PowerUp::ExtraHeart { lives } => {
                if lives.value() < MAXIMAL_NUMBER_LIVES {
                    spawn_falling_heart(hit.brick_pos, lives, ctx);
                }
            }
            PowerUp::ExtraPaddle { paddles } => {
                if paddles.value() < ALLOWED_NUMBER_OF_PADDLES {
                    spawn_extra_paddle(paddles, ctx);
                } else {
                    log::debug!("extra paddle rejected, {} already active", paddles.value());
                }
            }
            PowerUp::ExtraBall => {
                for _ in 0..2 {
                    spawn_pack_ball(hit.brick_center, ctx);
                }
            }
        }
    }
}

/// One slot of a `Double`
#[derive(Debug, Clone)]
pub enum DoubleSlot {
    Single(PowerUp),
    /// A nested double built only from plain power-ups
    Pair(PowerUp, PowerUp),
}

impl DoubleSlot {
    pub fn tag(&self) -> StrategyTag {
        match self {
            DoubleSlot::Single(power_up) => power_up.tag(),
            DoubleSlot::Pair(..) => StrategyTag::Double,
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, DoubleSlot::Pair(..))
    }

    /// Leaf strategies in execution order
    pub fn power_ups(&self) -> Vec<&PowerUp> {
        match self {
            DoubleSlot::Single(power_up) => vec![power_up],
            DoubleSlot::Pair(first, second) => vec![first, second],
        }
    }

    fn on_collision(&self, hit: &BrickHit, ctx: &mut StrategyContext<'_>) {
        for power_up in self.power_ups() {
            power_up.on_collision(hit, ctx);
        }
    }
}

/// Two slots chosen once and run in order on every hit
#[derive(Debug, Clone)]
pub struct DoubleStrategy {
    first: DoubleSlot,
    second: DoubleSlot,
}

impl DoubleStrategy {
    /// `None` when both slots are nested doubles
    pub fn new(first: DoubleSlot, second: DoubleSlot) -> Option<Self> {
        if first.is_pair() && second.is_pair() {
            return None;
        }
        Some(Self { first, second })
    }

    pub fn first(&self) -> &DoubleSlot {
        &self.first
    }

    pub fn second(&self) -> &DoubleSlot {
        &self.second
    }

    pub fn on_collision(&self, hit: &BrickHit, ctx: &mut StrategyContext<'_>) {
        self.first.on_collision(hit, ctx);
        self.second.on_collision(hit, ctx);
    }
}

/// Behavior of a brick when struck
#[derive(Debug, Clone)]
pub enum CollisionStrategy {
    Basic,
    PowerUp(PowerUp),
    ChangeCamera,
    Double(DoubleStrategy),
}

impl CollisionStrategy {
    pub fn tag(&self) -> StrategyTag {
        match self {
            CollisionStrategy::Basic => StrategyTag::Basic,
            CollisionStrategy::PowerUp(power_up) => power_up.tag(),
            CollisionStrategy::ChangeCamera => StrategyTag::ChangeCamera,
            CollisionStrategy::Double(_) => StrategyTag::Double,
        }
    }

    pub fn on_collision(&self, hit: &BrickHit, ctx: &mut StrategyContext<'_>) {
        log::debug!(
            "brick {:?} hit by {}: {}",
            hit.brick,
            hit.other_tag.as_str(),
            self.tag().as_str()
        );
        match self {
            CollisionStrategy::Basic => consume_brick(hit, ctx.pool),
            CollisionStrategy::PowerUp(power_up) => power_up.on_collision(hit, ctx),
            CollisionStrategy::ChangeCamera => change_camera(hit, ctx),
            CollisionStrategy::Double(double) => double.on_collision(hit, ctx),
        }
    }
}

/// Remove the brick; count it only if this call removed it
fn consume_brick(hit: &BrickHit, pool: &mut EntityPool) {
    if pool.remove(hit.brick) {
        hit.bricks.decrement();
    }
}

/// Zoom onto the main ball unless a zoom is already active
fn change_camera(hit: &BrickHit, ctx: &mut StrategyContext<'_>) {
    consume_brick(hit, ctx.pool);
    if hit.other_tag != Tag::MainBall || ctx.camera.is_some() {
        return;
    }
    let Some(ball) = ctx.pool.get(hit.other) else {
        return;
    };
    *ctx.camera = Some(Camera::new(
        hit.other,
        ball.center(),
        ctx.window * CAMERA_ZOOM_FACTOR,
        ctx.window,
    ));
    if let Some(state) = ball.as_ball() {
        state.collisions.reset();
    }
    log::debug!("camera zoomed onto main ball");
}

fn spawn_falling_heart(brick_pos: Vec2, lives: &Counter, ctx: &mut StrategyContext<'_>) {
    let id = ctx.pool.next_id();
    ctx.pool.add(
        Entity::new(id, Tag::FallingHeart)
            .with_pos(brick_pos)
            .with_size(Vec2::splat(HEART_SIZE))
            .with_vel(Vec2::new(0.0, HEART_FALL_SPEED))
            .with_renderable(Renderable::Image(ctx.assets.heart_image))
            .with_kind(EntityKind::FallingHeart(FallingHeartState::new(lives.clone()))),
    );
}

fn spawn_extra_paddle(paddles: &Counter, ctx: &mut StrategyContext<'_>) {
    let id = ctx.pool.next_id();
    let state = PaddleState::new(Some(EXTRA_PADDLE_COLLISION_LIMIT), paddles.clone());
    ctx.pool.add(
        Entity::new(id, Tag::ExtraPaddle)
            .with_pos(ctx.window * 0.5)
            .with_size(Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT))
            .with_renderable(Renderable::Image(ctx.assets.paddle_image))
            .with_kind(EntityKind::Paddle(state)),
    );
    log::debug!("extra paddle spawned, {} active", paddles.value());
}

/// Launch direction is drawn from the upper half-circle (screen y grows down)
fn spawn_pack_ball(center: Vec2, ctx: &mut StrategyContext<'_>) {
    let angle = ctx.rng.random::<f32>() * PI;
    let id = ctx.pool.next_id();
    ctx.pool.add(
        Entity::new(id, Tag::PackBall)
            .with_size(Vec2::splat(PACK_TO_BALL_SIZE_RATIO * BALL_SIZE))
            .with_center(center)
            .with_vel(Vec2::new(angle.cos(), -angle.sin()) * BALL_SPEED)
            .with_renderable(Renderable::Image(ctx.assets.pack_ball_image))
            .with_kind(EntityKind::Ball(BallState::new(ctx.assets.ball_sound.clone()))),
    );
}
