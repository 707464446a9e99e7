//! Game orchestration
//!
//! `GameManager` owns the shared counters, builds levels and runs the
//! per-frame update. A frame is:
//! 1. Substrate pass: paddle input, integration, contact dispatch
//! 2. Ball drop: lose a life and re-serve the main ball
//! 3. Win / lose prompt
//! 4. Life label and heart row sync
//! 5. Debug win key
//! 6. Camera calibration
//! 7. Off-screen pickup cleanup and pool compaction

pub mod hud;

pub use hud::{HeartDisplay, LifeLabel, life_color};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::assets::Assets;
use crate::audio::AudioQueue;
use crate::config::GameConfig;
use crate::consts::*;
use crate::counter::Counter;
use crate::error::Result;
use crate::platform::{Key, Platform, Renderable};
use crate::sim::{
    BallState, BrickState, Camera, Collision, CoordinateSpace, Entity, EntityId, EntityKind,
    EntityPool, Layer, PaddleState, Physics, Tag,
};
use crate::strategies::{BrickHit, StrategiesFactory, StrategyContext};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameOutcome {
    /// Keep running
    Continue,
    /// A prompt was answered "yes" and the level was rebuilt
    Restarted,
    /// A prompt was answered "no"; the host should exit
    Quit,
}

/// Everything that is rebuilt from scratch on restart
#[derive(Debug)]
struct Level {
    pool: EntityPool,
    physics: Physics,
    camera: Option<Camera>,
    lives: Counter,
    bricks: Counter,
    paddles: Counter,
    main_ball: EntityId,
    main_paddle: EntityId,
    hearts: HeartDisplay,
    label: LifeLabel,
}

impl Level {
    fn build(config: &GameConfig, window: Vec2, assets: &Assets, rng: &mut Pcg32) -> Self {
        let mut pool = EntityPool::new();
        let lives = Counter::new(config.starting_lives);
        let bricks = Counter::new(config.total_bricks());
        let paddles = Counter::new(0);

        let main_ball = pool.next_id();
        pool.add(
            Entity::new(main_ball, Tag::MainBall)
                .with_size(Vec2::splat(BALL_SIZE))
                .with_center(window * 0.5)
                .with_vel(random_serve(rng))
                .with_renderable(Renderable::Image(assets.ball_image))
                .with_kind(EntityKind::Ball(BallState::new(assets.ball_sound.clone()))),
        );

        let main_paddle = pool.next_id();
        pool.add(
            Entity::new(main_paddle, Tag::MainPaddle)
                .with_size(Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT))
                .with_center(Vec2::new(window.x / 2.0, window.y - PADDLE_DISTANCE_FROM_END))
                .with_renderable(Renderable::Image(assets.paddle_image))
                .with_kind(EntityKind::Paddle(PaddleState::new(None, paddles.clone()))),
        );

        add_walls(&mut pool, window);

        let background = pool.next_id();
        pool.add(
            Entity::new(background, Tag::Background)
                .with_layer(Layer::Background)
                .with_size(window)
                .with_space(CoordinateSpace::Camera)
                .with_renderable(Renderable::Image(assets.background_image)),
        );

        let factory =
            StrategiesFactory::new(lives.clone(), paddles.clone(), config.special_brick_chance);
        add_bricks(&mut pool, config, window, assets, &factory, &bricks, rng);

        let hearts = HeartDisplay::new(&mut pool, window, assets.heart_image, lives.value());
        let mut label = LifeLabel::new(window);
        label.sync(&mut pool, lives.value());

        log::info!(
            "Level built: {}x{} bricks, {} lives",
            config.brick_rows,
            config.bricks_per_row,
            lives.value()
        );

        Self {
            pool,
            physics: Physics::new(),
            camera: None,
            lives,
            bricks,
            paddles,
            main_ball,
            main_paddle,
            hearts,
            label,
        }
    }
}

/// Top, left and right walls; the bottom is open
fn add_walls(pool: &mut EntityPool, window: Vec2) {
    let walls = [
        (Vec2::new(-1.0, 0.0), Vec2::new(window.x, WALL_THICKNESS)),
        (Vec2::ZERO, Vec2::new(WALL_THICKNESS, window.y)),
        (Vec2::new(window.x - WALL_THICKNESS, 0.0), Vec2::new(WALL_THICKNESS, window.y)),
    ];
    for (pos, size) in walls {
        let id = pool.next_id();
        pool.add(
            Entity::new(id, Tag::Wall)
                .with_layer(Layer::StaticObjects)
                .with_pos(pos)
                .with_size(size),
        );
    }
}

fn add_bricks(
    pool: &mut EntityPool,
    config: &GameConfig,
    window: Vec2,
    assets: &Assets,
    factory: &StrategiesFactory,
    bricks: &Counter,
    rng: &mut Pcg32,
) {
    let per_row = config.bricks_per_row as f32;
    let usable = window.x - 2.0 * (WALL_THICKNESS + BUFFER_BETWEEN_BRICKS);
    let brick_width = (usable / (per_row + BRICK_SPACER)).floor();
    let margin_x = (window.x - brick_width * per_row) / (per_row + WALL_SPACER);
    let margin_y = BUFFER_BETWEEN_BRICKS;

    for row in 0..config.brick_rows {
        for col in 0..config.bricks_per_row {
            let pos = Vec2::new(
                margin_x + col as f32 * (brick_width + margin_x),
                WALL_THICKNESS + (margin_y + row as f32 * (BRICK_HEIGHT + margin_y)),
            );
            let strategy = factory.build(rng);
            let id = pool.next_id();
            pool.add(
                Entity::new(id, Tag::Brick)
                    .with_pos(pos)
                    .with_size(Vec2::new(brick_width, BRICK_HEIGHT))
                    .with_renderable(Renderable::Image(assets.brick_image))
                    .with_kind(EntityKind::Brick(BrickState::new(strategy, bricks.clone()))),
            );
        }
    }
}

/// Diagonal serve, each axis sign chosen independently
fn random_serve(rng: &mut Pcg32) -> Vec2 {
    let x = if rng.random_bool(0.5) { -BALL_SPEED } else { BALL_SPEED };
    let y = if rng.random_bool(0.5) { -BALL_SPEED } else { BALL_SPEED };
    Vec2::new(x, y)
}

/// State summary for logging and the host's end-of-run report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub frame: u64,
    pub levels_played: u32,
    pub lives: i32,
    pub bricks_left: i32,
    pub paddles: i32,
    pub camera_zoomed: bool,
    pub sounds_played: u64,
    pub entities: usize,
}

/// The game orchestrator
pub struct GameManager {
    config: GameConfig,
    window: Vec2,
    rng: Pcg32,
    assets: Assets,
    audio: AudioQueue,
    level: Level,
    frame: u64,
    levels_played: u32,
}

impl GameManager {
    /// Load assets and build the first level
    pub fn new(config: GameConfig, platform: &mut dyn Platform) -> Result<Self> {
        let window = platform.window_dimensions();
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let assets = Assets::load(platform)?;
        let level = Level::build(&config, window, &assets, &mut rng);
        Ok(Self {
            audio: AudioQueue::new(config.muted),
            config,
            window,
            rng,
            assets,
            level,
            frame: 0,
            levels_played: 1,
        })
    }

    /// Rebuild the level from scratch: counters, entities, camera and HUD.
    /// The RNG keeps running so the new layout differs.
    pub fn reset(&mut self, platform: &mut dyn Platform) -> Result<()> {
        self.window = platform.window_dimensions();
        self.assets = Assets::load(platform)?;
        self.level = Level::build(&self.config, self.window, &self.assets, &mut self.rng);
        self.levels_played += 1;
        log::info!("Level restarted ({} played)", self.levels_played);
        Ok(())
    }

    /// Advance one frame
    pub fn update(&mut self, platform: &mut dyn Platform, dt: f32) -> Result<FrameOutcome> {
        self.frame += 1;
        self.step_physics(platform, dt);

        self.check_ball_dropped();

        let lives = self.level.lives.value();
        if lives <= 0 {
            return self.show_prompt(platform, GAME_OVER_PROMPT);
        }
        if self.level.bricks.value() == 0 {
            return self.show_prompt(platform, WON_PROMPT);
        }

        self.level.label.sync(&mut self.level.pool, lives);
        self.level.hearts.sync(&mut self.level.pool, lives);

        if platform.is_key_pressed(Key::W) {
            return self.show_prompt(platform, WON_PROMPT);
        }

        self.calibrate_camera();
        self.remove_lost_pickups();
        if let Some(camera) = self.level.camera.as_mut() {
            if let Some(target) = self.level.pool.get(camera.target) {
                camera.follow(target.center());
            }
        }
        self.level.pool.compact();
        Ok(FrameOutcome::Continue)
    }

    /// Deliver a collision-enter event to both participants: `a` with
    /// `collision` as given, then `b` with the normal flipped.
    pub fn on_collision(&mut self, a: EntityId, b: EntityId, collision: Collision) {
        let (Some(tag_a), Some(tag_b)) = (
            self.level.pool.get(a).map(|e| e.tag),
            self.level.pool.get(b).map(|e| e.tag),
        ) else {
            return;
        };
        self.dispatch(a, b, tag_b, &collision);
        self.dispatch(b, a, tag_a, &collision.flipped());
    }

    /// Substrate pass: steer paddles, integrate, clamp, then dispatch new
    /// contacts in detection order
    fn step_physics(&mut self, platform: &dyn Platform, dt: f32) {
        let left = platform.is_key_pressed(Key::Left);
        let right = platform.is_key_pressed(Key::Right);
        let pool = &mut self.level.pool;

        for entity in pool.iter_mut() {
            if matches!(entity.kind, EntityKind::Paddle(_)) {
                PaddleState::steer(entity, left, right);
            }
        }
        Physics::integrate(pool, dt);
        for entity in pool.iter_mut() {
            if matches!(entity.kind, EntityKind::Paddle(_)) {
                PaddleState::clamp_to_window(entity, self.window.x);
            }
        }

        let contacts = self.level.physics.detect(&self.level.pool);
        for contact in contacts {
            self.on_collision(contact.a, contact.b, contact.collision);
        }
    }

    fn dispatch(&mut self, me: EntityId, other: EntityId, other_tag: Tag, collision: &Collision) {
        let Some(entity) = self.level.pool.get(me) else {
            return;
        };
        let (brick_pos, brick_center) = (entity.pos, entity.center());

        match entity.kind.clone() {
            EntityKind::Static => {}
            EntityKind::Ball(state) => {
                if let Some(ball) = self.level.pool.get_mut(me) {
                    state.on_collision_enter(ball, collision, &mut self.audio);
                }
            }
            EntityKind::Paddle(state) => state.on_collision_enter(me, &mut self.level.pool),
            EntityKind::FallingHeart(state) => state.on_collision_enter(me, &mut self.level.pool),
            EntityKind::Brick(state) => {
                let hit = BrickHit {
                    brick: me,
                    brick_pos,
                    brick_center,
                    other,
                    other_tag,
                    bricks: state.bricks.clone(),
                };
                let mut ctx = StrategyContext {
                    pool: &mut self.level.pool,
                    assets: &self.assets,
                    camera: &mut self.level.camera,
                    rng: &mut self.rng,
                    window: self.window,
                };
                state.strategy.on_collision(&hit, &mut ctx);
            }
        }
    }

    /// Main ball below the bottom edge: lose a life, re-serve from the center
    fn check_ball_dropped(&mut self) {
        let window = self.window;
        let Some(ball) = self.level.pool.get_mut(self.level.main_ball) else {
            return;
        };
        if ball.center().y <= window.y {
            return;
        }
        if self.level.lives.value() > 0 {
            self.level.lives.decrement();
        }
        ball.set_center(window * 0.5);
        ball.vel = random_serve(&mut self.rng);
        log::info!("Ball dropped, {} lives left", self.level.lives.value());
    }

    /// Blocking yes/no: yes rebuilds the level, no ends the game
    fn show_prompt(&mut self, platform: &mut dyn Platform, prompt: &str) -> Result<FrameOutcome> {
        log::info!("{prompt}");
        if platform.open_yes_no_dialog(prompt) {
            self.reset(platform)?;
            Ok(FrameOutcome::Restarted)
        } else {
            Ok(FrameOutcome::Quit)
        }
    }

    /// Drop the zoom once the main ball has collided enough times
    fn calibrate_camera(&mut self) {
        let collisions = self
            .level
            .pool
            .get(self.level.main_ball)
            .and_then(|ball| ball.as_ball())
            .map_or(0, |state| state.collisions.value());
        if collisions >= NUMBER_OF_COLLISIONS_TO_CALIBRATE_CAMERA
            && self.level.camera.take().is_some()
        {
            log::debug!("camera reset after {collisions} ball collisions");
        }
    }

    /// Pack balls and hearts that fell past the bottom edge
    fn remove_lost_pickups(&mut self) {
        let bottom = self.window.y;
        let lost: Vec<EntityId> = self
            .level
            .pool
            .iter()
            .filter(|e| matches!(e.tag, Tag::PackBall | Tag::FallingHeart) && e.pos.y > bottom)
            .map(|e| e.id)
            .collect();
        for id in lost {
            self.level.pool.remove(id);
        }
    }

    // -- Accessors --

    pub fn window(&self) -> Vec2 {
        self.window
    }

    pub fn lives(&self) -> &Counter {
        &self.level.lives
    }

    pub fn bricks(&self) -> &Counter {
        &self.level.bricks
    }

    pub fn paddles(&self) -> &Counter {
        &self.level.paddles
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.level.camera.as_ref()
    }

    pub fn pool(&self) -> &EntityPool {
        &self.level.pool
    }

    pub fn pool_mut(&mut self) -> &mut EntityPool {
        &mut self.level.pool
    }

    pub fn main_ball(&self) -> EntityId {
        self.level.main_ball
    }

    pub fn main_paddle(&self) -> EntityId {
        self.level.main_paddle
    }

    pub fn hearts(&self) -> &HeartDisplay {
        &self.level.hearts
    }

    pub fn label(&self) -> &LifeLabel {
        &self.level.label
    }

    pub fn audio_mut(&mut self) -> &mut AudioQueue {
        &mut self.audio
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            frame: self.frame,
            levels_played: self.levels_played,
            lives: self.level.lives.value(),
            bricks_left: self.level.bricks.value(),
            paddles: self.level.paddles.value(),
            camera_zoomed: self.level.camera.is_some(),
            sounds_played: self.audio.total_played(),
            entities: self.level.pool.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;

    fn setup(rows: usize, per_row: usize) -> (GameManager, HeadlessPlatform) {
        let config = GameConfig {
            brick_rows: rows,
            bricks_per_row: per_row,
            special_brick_chance: 0.0,
            ..GameConfig::default()
        };
        let mut platform = HeadlessPlatform::new(config.window());
        let game = GameManager::new(config, &mut platform).unwrap();
        (game, platform)
    }

    #[test]
    fn test_level_layout() {
        let (game, _) = setup(7, 8);
        let pool = game.pool();
        assert_eq!(pool.count_by_tag(Tag::Brick), 56);
        assert_eq!(pool.count_by_tag(Tag::Wall), 3);
        assert_eq!(pool.count_by_tag(Tag::HeartIcon), 3);
        assert_eq!(pool.count_by_tag(Tag::LifeLabel), 1);
        assert_eq!(game.bricks().value(), 56);
        assert_eq!(game.paddles().value(), 1);
        assert_eq!(game.lives().value(), DEFAULT_NUMBER_OF_LIVES);

        let paddle = pool.get(game.main_paddle()).unwrap();
        assert_eq!(paddle.center(), Vec2::new(450.0, 570.0));
        let ball = pool.get(game.main_ball()).unwrap();
        assert_eq!(ball.center(), Vec2::new(450.0, 300.0));
        assert_eq!(ball.vel.abs(), Vec2::splat(BALL_SPEED));

        // First brick: width floor(850 / 9.5) = 89, margin (900 - 712) / 9
        let first = pool.find_by_tag(Tag::Brick).unwrap();
        assert_eq!(first.size, Vec2::new(89.0, BRICK_HEIGHT));
        assert!((first.pos.x - 188.0 / 9.0).abs() < 1e-3);
        assert_eq!(first.pos.y, 25.0);
    }

    #[test]
    fn test_ball_drop_costs_a_life_and_reserves() {
        let (mut game, mut platform) = setup(1, 1);
        let ball = game.main_ball();
        game.pool_mut().get_mut(ball).unwrap().set_center(Vec2::new(450.0, 700.0));

        let outcome = game.update(&mut platform, 0.0).unwrap();
        assert_eq!(outcome, FrameOutcome::Continue);
        assert_eq!(game.lives().value(), 2);
        let ball = game.pool().get(ball).unwrap();
        assert_eq!(ball.center(), Vec2::new(450.0, 300.0));
        assert_eq!(ball.vel.abs(), Vec2::splat(BALL_SPEED));
        assert_eq!(game.hearts().shown(), 2);
    }

    #[test]
    fn test_camera_calibrates_after_four_ball_hits() {
        let (mut game, mut platform) = setup(1, 1);
        let ball = game.main_ball();
        game.level.camera = Some(Camera::new(ball, Vec2::ZERO, game.window() * 1.2, game.window()));

        let counter = game.pool().get(ball).unwrap().as_ball().unwrap().collisions.clone();
        counter.set(3);
        game.update(&mut platform, 0.0).unwrap();
        assert!(game.camera().is_some());
        assert_eq!(game.camera().unwrap().center, game.pool().get(ball).unwrap().center());

        counter.set(4);
        game.update(&mut platform, 0.0).unwrap();
        assert!(game.camera().is_none());
    }

    #[test]
    fn test_lost_pickups_are_culled() {
        let (mut game, mut platform) = setup(1, 1);
        let id = game.pool_mut().next_id();
        game.pool_mut().add(
            Entity::new(id, Tag::PackBall)
                .with_pos(Vec2::new(400.0, 610.0))
                .with_size(Vec2::splat(15.0)),
        );
        game.update(&mut platform, 0.0).unwrap();
        assert!(!game.pool().contains(id));
        assert_eq!(game.lives().value(), DEFAULT_NUMBER_OF_LIVES);
    }

    #[test]
    fn test_paddle_follows_keys_and_stays_inside() {
        let (mut game, mut platform) = setup(1, 1);
        let paddle = game.main_paddle();
        platform.press(Key::Right);
        for _ in 0..120 {
            game.update(&mut platform, SIM_DT).unwrap();
        }
        let pos = game.pool().get(paddle).unwrap().pos;
        assert_eq!(pos.x, 900.0 - PADDLE_WIDTH);
    }
}
