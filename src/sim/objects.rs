//! Per-object behaviors
//!
//! Ball, paddle, falling heart and brick state plus the reactions they run
//! when a collision-enter event reaches them. Counters held here are either
//! shared handles (lives, paddles, bricks) or private tallies created by the
//! constructor.

use glam::Vec2;

use super::collision::{Collision, reflect_velocity};
use super::entity::{Entity, EntityId, Tag};
use super::pool::EntityPool;
use crate::audio::{AudioQueue, Sound};
use crate::consts::*;
use crate::counter::Counter;
use crate::strategies::CollisionStrategy;

/// A ball (main or pack)
#[derive(Debug, Clone)]
pub struct BallState {
    /// Private tally of every collision this ball took part in
    pub collisions: Counter,
    pub sound: Sound,
}

impl BallState {
    pub fn new(sound: Sound) -> Self {
        Self {
            collisions: Counter::new(0),
            sound,
        }
    }

    /// Bounce, play the cue, count the hit
    pub fn on_collision_enter(
        &self,
        ball: &mut Entity,
        collision: &Collision,
        audio: &mut AudioQueue,
    ) {
        ball.vel = reflect_velocity(ball.vel, collision.normal);
        self.sound.play(audio);
        self.collisions.increment();
    }
}

/// A keyboard-driven paddle
#[derive(Debug, Clone)]
pub struct PaddleState {
    pub collisions: Counter,
    /// Hits before the paddle removes itself; `None` never expires
    pub limit: Option<u32>,
    /// Paddles alive, shared with every paddle and the extra-paddle power-up
    pub paddles: Counter,
}

impl PaddleState {
    /// Registers the new paddle in the shared paddle count
    pub fn new(limit: Option<u32>, paddles: Counter) -> Self {
        paddles.increment();
        Self {
            collisions: Counter::new(0),
            limit,
            paddles,
        }
    }

    /// The main paddle also catches falling hearts; other paddles only balls
    pub fn accepts(own: Tag, other: Tag) -> bool {
        match own {
            Tag::MainPaddle => other.is_ball() || other == Tag::FallingHeart,
            _ => other.is_ball(),
        }
    }

    /// Horizontal velocity from the held keys; both or neither means stop
    pub fn steer(paddle: &mut Entity, left: bool, right: bool) {
        let mut dir = 0.0;
        if left {
            dir -= 1.0;
        }
        if right {
            dir += 1.0;
        }
        paddle.vel = Vec2::new(dir * PADDLE_MOVEMENT_SPEED, 0.0);
    }

    /// Keep the paddle fully inside `[0, window_width]`
    pub fn clamp_to_window(paddle: &mut Entity, window_width: f32) {
        let max_x = window_width - paddle.size.x;
        if paddle.pos.x >= max_x {
            paddle.pos.x = max_x;
        } else if paddle.pos.x <= 0.0 {
            paddle.pos.x = 0.0;
        }
    }

    /// Count the hit; at the limit the paddle leaves the pool
    pub fn on_collision_enter(&self, paddle: EntityId, pool: &mut EntityPool) {
        self.collisions.increment();
        let Some(limit) = self.limit else {
            return;
        };
        if self.collisions.value() == limit as i32 && pool.remove(paddle) {
            self.paddles.decrement();
            log::debug!("paddle {paddle:?} worn out after {limit} hits");
        }
    }
}

/// A heart dropped by the extra-heart power-up
#[derive(Debug, Clone)]
pub struct FallingHeartState {
    pub lives: Counter,
}

impl FallingHeartState {
    pub fn new(lives: Counter) -> Self {
        Self { lives }
    }

    /// Caught only by the main paddle
    pub fn accepts(other: Tag) -> bool {
        other == Tag::MainPaddle
    }

    /// Always consumed; grants a life only below the cap
    pub fn on_collision_enter(&self, heart: EntityId, pool: &mut EntityPool) {
        if !pool.remove(heart) {
            return;
        }
        if self.lives.value() < MAXIMAL_NUMBER_LIVES {
            self.lives.increment();
            log::debug!("heart caught, lives now {}", self.lives.value());
        } else {
            log::debug!("heart caught at full lives, wasted");
        }
    }
}

/// A destructible brick
#[derive(Debug, Clone)]
pub struct BrickState {
    pub strategy: CollisionStrategy,
    /// Bricks left in the level
    pub bricks: Counter,
}

impl BrickState {
    pub fn new(strategy: CollisionStrategy, bricks: Counter) -> Self {
        Self { strategy, bricks }
    }
}
