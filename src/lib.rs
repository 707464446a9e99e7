//! Bricker - A brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Entities, entity pool, collision substrate and per-object behaviors
//! - `strategies`: What a brick does when it is struck (power-ups)
//! - `game`: The orchestrator (level build, lives, win/lose, camera)
//! - `platform`: Host services (images, sounds, keys, dialogs)
//! - `config`: Level size and tuning knobs

pub mod assets;
pub mod audio;
pub mod config;
pub mod counter;
pub mod error;
pub mod game;
pub mod platform;
pub mod sim;
pub mod strategies;

pub use assets::Assets;
pub use config::GameConfig;
pub use counter::Counter;
pub use error::{Error, Result};
pub use game::{FrameOutcome, GameManager};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for the native host (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 900.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;
    pub const WALL_THICKNESS: f32 = 15.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    /// Per-axis speed of a freshly served ball, and speed of pack balls
    pub const BALL_SPEED: f32 = 300.0;
    /// Pack balls are smaller than the main ball
    pub const PACK_TO_BALL_SIZE_RATIO: f32 = 0.75;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_DISTANCE_FROM_END: f32 = 30.0;
    pub const PADDLE_MOVEMENT_SPEED: f32 = 550.0;
    /// Maximum number of paddles alive at once (main + extras)
    pub const ALLOWED_NUMBER_OF_PADDLES: i32 = 2;
    /// Hits an extra paddle takes before it disappears
    pub const EXTRA_PADDLE_COLLISION_LIMIT: u32 = 4;

    /// Brick grid
    pub const BRICK_HEIGHT: f32 = 15.0;
    pub const BRICK_SPACER: f32 = 1.5;
    pub const WALL_SPACER: f32 = 1.0;
    pub const BUFFER_BETWEEN_BRICKS: f32 = 10.0;
    pub const DEFAULT_BRICK_ROWS: usize = 7;
    pub const DEFAULT_BRICKS_PER_ROW: usize = 8;

    /// Lives
    pub const DEFAULT_NUMBER_OF_LIVES: i32 = 3;
    pub const MAXIMAL_NUMBER_LIVES: i32 = 4;
    pub const HEART_SIZE: f32 = 35.0;
    pub const HEART_BUFFER_SIZE: f32 = 15.0;
    pub const HEART_FALL_SPEED: f32 = 100.0;
    pub const NUMERIC_LIFE_SIZE: f32 = 50.0;

    /// Camera zoom factor applied to the window size while zoomed
    pub const CAMERA_ZOOM_FACTOR: f32 = 1.2;
    /// Main-ball collisions after which the zoom camera resets
    pub const NUMBER_OF_COLLISIONS_TO_CALIBRATE_CAMERA: i32 = 4;

    /// Dialog prompts
    pub const GAME_OVER_PROMPT: &str = "You lose! Play Again?";
    pub const WON_PROMPT: &str = "You win! Play again?";

    /// Asset paths
    pub const BALL_SOUND_PATH: &str = "assets/blop_cut_silenced.wav";
    pub const BALL_IMAGE_PATH: &str = "assets/ball.png";
    pub const PADDLE_IMAGE_PATH: &str = "assets/paddle.png";
    pub const BACKGROUND_IMAGE_PATH: &str = "assets/DARK_BG2_small.jpeg";
    pub const BRICK_IMAGE_PATH: &str = "assets/brick.png";
    pub const LIFE_IMAGE_PATH: &str = "assets/heart.png";
    pub const MOCK_BALL_IMAGE_PATH: &str = "assets/mockBall.png";
}

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn center_of(top_left: Vec2, size: Vec2) -> Vec2 {
    top_left + size * 0.5
}

/// Top-left corner of a box of `size` centered on `center`
#[inline]
pub fn top_left_for_center(center: Vec2, size: Vec2) -> Vec2 {
    center - size * 0.5
}
