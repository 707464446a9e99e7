//! Windowless platform
//!
//! Assets are path registrations, keys are a held-key set and dialog answers
//! come from a script. Used by the native binary (wrapped with console
//! prompts) and by tests.

use std::collections::{HashMap, HashSet, VecDeque};

use glam::Vec2;

use super::{ImageId, Key, Platform};
use crate::audio::{Sound, SoundId};
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct HeadlessPlatform {
    window: Vec2,
    images: HashMap<String, ImageId>,
    sounds: HashMap<String, SoundId>,
    /// Paths that refuse to load
    missing: HashSet<String>,
    pressed: HashSet<Key>,
    /// Scripted dialog answers; an empty script answers no
    answers: VecDeque<bool>,
    prompts: Vec<String>,
}

impl HeadlessPlatform {
    pub fn new(window: Vec2) -> Self {
        Self {
            window,
            images: HashMap::new(),
            sounds: HashMap::new(),
            missing: HashSet::new(),
            pressed: HashSet::new(),
            answers: VecDeque::new(),
            prompts: Vec::new(),
        }
    }

    /// Hold a key down until released
    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    /// Queue the answer for the next prompt
    pub fn queue_answer(&mut self, yes: bool) {
        self.answers.push_back(yes);
    }

    /// Make a path fail to load
    pub fn mark_missing(&mut self, path: &str) {
        self.missing.insert(path.to_string());
    }

    /// Every prompt shown so far, oldest first
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Path an image handle was loaded from
    pub fn image_path(&self, id: ImageId) -> Option<&str> {
        self.images
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.as_str())
    }
}

impl Platform for HeadlessPlatform {
    fn load_image(&mut self, path: &str) -> Result<ImageId> {
        if self.missing.contains(path) {
            return Err(Error::ImageLoad {
                path: path.to_string(),
                reason: "not found".to_string(),
            });
        }
        let next = ImageId(self.images.len() as u32);
        Ok(*self.images.entry(path.to_string()).or_insert(next))
    }

    fn load_sound(&mut self, path: &str) -> Result<Sound> {
        if self.missing.contains(path) {
            return Err(Error::SoundLoad {
                path: path.to_string(),
                reason: "not found".to_string(),
            });
        }
        let next = SoundId(self.sounds.len() as u32);
        Ok(Sound::new(*self.sounds.entry(path.to_string()).or_insert(next)))
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn window_dimensions(&self) -> Vec2 {
        self.window
    }

    fn open_yes_no_dialog(&mut self, prompt: &str) -> bool {
        log::info!("Prompt: {}", prompt);
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_path_same_handle() {
        let mut platform = HeadlessPlatform::new(Vec2::new(100.0, 100.0));
        let a = platform.load_image("assets/ball.png").unwrap();
        let b = platform.load_image("assets/brick.png").unwrap();
        let c = platform.load_image("assets/ball.png").unwrap();
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(platform.image_path(b), Some("assets/brick.png"));
    }

    #[test]
    fn test_missing_asset_errors() {
        let mut platform = HeadlessPlatform::new(Vec2::ZERO);
        platform.mark_missing("assets/heart.png");
        let err = platform.load_image("assets/heart.png").unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
        assert!(err.to_string().contains("assets/heart.png"));
    }

    #[test]
    fn test_held_keys() {
        let mut platform = HeadlessPlatform::new(Vec2::ZERO);
        platform.press(Key::Left);
        platform.press(Key::Right);
        platform.release(Key::Left);
        assert!(!platform.is_key_pressed(Key::Left));
        assert!(platform.is_key_pressed(Key::Right));
        platform.release_all();
        assert!(!platform.is_key_pressed(Key::Right));
    }

    #[test]
    fn test_scripted_answers_then_default() {
        let mut platform = HeadlessPlatform::new(Vec2::ZERO);
        platform.queue_answer(true);
        assert!(platform.open_yes_no_dialog("again?"));
        assert!(!platform.open_yes_no_dialog("again?"));
        assert_eq!(platform.prompts().len(), 2);
    }
}
