//! Level assets
//!
//! Everything is loaded once per level build so the collision-time code never
//! touches the host and never fails.

use crate::audio::Sound;
use crate::consts::*;
use crate::error::Result;
use crate::platform::{ImageId, Platform};

#[derive(Debug, Clone)]
pub struct Assets {
    pub ball_image: ImageId,
    /// Image of the small balls from the extra-ball power-up
    pub pack_ball_image: ImageId,
    pub paddle_image: ImageId,
    pub brick_image: ImageId,
    pub heart_image: ImageId,
    pub background_image: ImageId,
    pub ball_sound: Sound,
}

impl Assets {
    pub fn load(platform: &mut dyn Platform) -> Result<Self> {
        Ok(Self {
            ball_image: platform.load_image(BALL_IMAGE_PATH)?,
            pack_ball_image: platform.load_image(MOCK_BALL_IMAGE_PATH)?,
            paddle_image: platform.load_image(PADDLE_IMAGE_PATH)?,
            brick_image: platform.load_image(BRICK_IMAGE_PATH)?,
            heart_image: platform.load_image(LIFE_IMAGE_PATH)?,
            background_image: platform.load_image(BACKGROUND_IMAGE_PATH)?,
            ball_sound: platform.load_sound(BALL_SOUND_PATH)?,
        })
    }
}
