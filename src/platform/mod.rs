//! Platform abstraction layer
//!
//! Everything the game consumes from its host, kept behind one trait:
//! - Image and sound loading
//! - Keyboard state
//! - Window dimensions
//! - Modal yes/no prompts
//!
//! Restart and quit are not host calls; `GameManager::update` reports them
//! through `FrameOutcome` and the host loop acts on it.

pub mod headless;

pub use headless::HeadlessPlatform;

use glam::Vec2;

use crate::audio::Sound;
use crate::error::Result;

/// Keys the game polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Debug shortcut: win immediately
    W,
}

/// Opaque handle to an image loaded by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Color of the numeric life label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Green,
    Yellow,
    Red,
}

/// What the host draws for an entity
#[derive(Debug, Clone, PartialEq)]
pub enum Renderable {
    Image(ImageId),
    Text { text: String, color: TextColor },
}

/// Services provided by the host
pub trait Platform {
    /// Load an image by path
    fn load_image(&mut self, path: &str) -> Result<ImageId>;

    /// Load a sound by path
    fn load_sound(&mut self, path: &str) -> Result<Sound>;

    /// Whether `key` is currently held down
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Window size in pixels
    fn window_dimensions(&self) -> Vec2;

    /// Show a blocking yes/no prompt; `true` means yes
    fn open_yes_no_dialog(&mut self, prompt: &str) -> bool;
}
