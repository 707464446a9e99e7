//! Zoom camera
//!
//! While attached, the view is `window * CAMERA_ZOOM_FACTOR` wide and
//! centered on a followed entity. Detaching restores the default full-window
//! view. The camera is owned by the game manager; only strategies attach it
//! and only calibration detaches it.

use glam::Vec2;

use super::entity::EntityId;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Entity the view tracks
    pub target: EntityId,
    /// Offset from the target's center
    pub offset: Vec2,
    /// View size in world units
    pub view: Vec2,
    /// Window size in pixels
    pub window: Vec2,
    /// Current view center in world space
    pub center: Vec2,
}

impl Camera {
    pub fn new(target: EntityId, target_center: Vec2, view: Vec2, window: Vec2) -> Self {
        Self {
            target,
            offset: Vec2::ZERO,
            view,
            window,
            center: target_center,
        }
    }

    /// Snap the view onto the target's current center
    pub fn follow(&mut self, target_center: Vec2) {
        self.center = target_center + self.offset;
    }

    /// World units per window pixel (>1 means zoomed out)
    pub fn scale(&self) -> Vec2 {
        self.view / self.window
    }

    /// Top-left corner of the visible world region
    pub fn view_min(&self) -> Vec2 {
        self.center - self.view * 0.5
    }
}
