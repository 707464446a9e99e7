//! Life display: heart icons and the numeric label
//!
//! Both are driven by the lives counter once per frame. The heart row is a
//! fixed set of pre-built icons whose pool membership is toggled; the label
//! is a text entity rebuilt whenever the value it shows goes stale.

use glam::Vec2;

use crate::consts::*;
use crate::platform::{ImageId, Renderable, TextColor};
use crate::sim::{Entity, EntityId, EntityPool, Layer, Tag};

/// Right-aligned row of heart icons along the bottom edge
#[derive(Debug)]
pub struct HeartDisplay {
    /// Icon `i` stands for life `i + 1`
    icons: Vec<Entity>,
    /// Lives the row currently shows
    shown: i32,
}

impl HeartDisplay {
    /// Build all `MAXIMAL_NUMBER_LIVES` icons and show the first `lives`
    pub fn new(pool: &mut EntityPool, window: Vec2, image: ImageId, lives: i32) -> Self {
        let icons = (0..MAXIMAL_NUMBER_LIVES)
            .map(|i| {
                let step = (HEART_BUFFER_SIZE + HEART_SIZE) * i as f32;
                Entity::new(pool.next_id(), Tag::HeartIcon)
                    .with_layer(Layer::Ui)
                    .with_pos(Vec2::new(window.x - HEART_SIZE - step, window.y - HEART_SIZE))
                    .with_size(Vec2::splat(HEART_SIZE))
                    .with_renderable(Renderable::Image(image))
            })
            .collect();
        let mut display = Self { icons, shown: 0 };
        display.sync(pool, lives);
        display
    }

    /// Catch the row up with `lives`.
    ///
    /// A drop hides one icon per call (the one for the highest shown life);
    /// a gain shows every missing icon at once. Lives beyond the icon count
    /// are not shown.
    pub fn sync(&mut self, pool: &mut EntityPool, lives: i32) {
        let icons = i32::try_from(self.icons.len()).unwrap_or(i32::MAX);
        let target = lives.clamp(0, icons);
        if self.shown > target {
            if let Some(icon) = self.icon_at(self.shown - 1) {
                pool.remove(icon.id);
            }
            self.shown -= 1;
        } else if self.shown < target {
            for i in self.shown..target {
                if let Some(icon) = self.icon_at(i) {
                    pool.add(icon.clone());
                }
            }
            self.shown = target;
        }
    }

    pub fn shown(&self) -> i32 {
        self.shown
    }

    pub fn icon_id(&self, index: i32) -> Option<EntityId> {
        self.icon_at(index).map(|icon| icon.id)
    }

    fn icon_at(&self, index: i32) -> Option<&Entity> {
        usize::try_from(index).ok().and_then(|i| self.icons.get(i))
    }
}

/// Label color for a life count
pub fn life_color(lives: i32) -> TextColor {
    match lives {
        l if l >= 3 => TextColor::Green,
        2 => TextColor::Yellow,
        _ => TextColor::Red,
    }
}

/// Numeric lives label left of the heart row
#[derive(Debug)]
pub struct LifeLabel {
    pos: Vec2,
    current: Option<(EntityId, i32)>,
}

impl LifeLabel {
    pub fn new(window: Vec2) -> Self {
        let row_width = MAXIMAL_NUMBER_LIVES as f32 * (HEART_SIZE + HEART_BUFFER_SIZE);
        Self {
            pos: Vec2::new(
                window.x - (row_width + HEART_BUFFER_SIZE),
                window.y - NUMERIC_LIFE_SIZE,
            ),
            current: None,
        }
    }

    /// Replace the label entity when `lives` differs from what it shows.
    /// Returns true when a new label was added.
    pub fn sync(&mut self, pool: &mut EntityPool, lives: i32) -> bool {
        if let Some((id, shown)) = self.current {
            if shown == lives {
                return false;
            }
            pool.remove(id);
        }
        let id = pool.next_id();
        pool.add(
            Entity::new(id, Tag::LifeLabel)
                .with_layer(Layer::Ui)
                .with_pos(self.pos)
                .with_size(Vec2::splat(NUMERIC_LIFE_SIZE))
                .with_renderable(Renderable::Text {
                    text: lives.to_string(),
                    color: life_color(lives),
                }),
        );
        self.current = Some((id, lives));
        true
    }

    pub fn id(&self) -> Option<EntityId> {
        self.current.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Vec2 = Vec2::new(900.0, 600.0);

    fn active_icons(pool: &EntityPool) -> usize {
        pool.count_by_tag(Tag::HeartIcon)
    }

    #[test]
    fn test_icons_are_laid_out_right_to_left() {
        let mut pool = EntityPool::new();
        let hearts = HeartDisplay::new(&mut pool, WINDOW, ImageId(0), 3);
        let first = pool.get(hearts.icon_id(0).unwrap()).unwrap();
        let third = pool.get(hearts.icon_id(2).unwrap()).unwrap();
        assert_eq!(first.pos, Vec2::new(865.0, 565.0));
        assert_eq!(third.pos, Vec2::new(765.0, 565.0));
        assert!(hearts.icon_id(3).is_some());
        assert!(!pool.contains(hearts.icon_id(3).unwrap()));
    }

    #[test]
    fn test_gain_of_two_adds_two_icons() {
        let mut pool = EntityPool::new();
        let mut hearts = HeartDisplay::new(&mut pool, WINDOW, ImageId(0), 1);
        assert_eq!(active_icons(&pool), 1);

        hearts.sync(&mut pool, 3);
        assert_eq!(active_icons(&pool), 3);
        assert_eq!(hearts.shown(), 3);
    }

    #[test]
    fn test_loss_removes_icon_at_new_count() {
        let mut pool = EntityPool::new();
        let mut hearts = HeartDisplay::new(&mut pool, WINDOW, ImageId(0), 3);
        let third = hearts.icon_id(2).unwrap();

        hearts.sync(&mut pool, 2);
        assert!(!pool.contains(third));
        assert!(pool.contains(hearts.icon_id(1).unwrap()));
        assert_eq!(active_icons(&pool), 2);
    }

    #[test]
    fn test_multi_step_loss_walks_down_one_per_sync() {
        let mut pool = EntityPool::new();
        let mut hearts = HeartDisplay::new(&mut pool, WINDOW, ImageId(0), 4);
        hearts.sync(&mut pool, 1);
        assert_eq!(hearts.shown(), 3);
        hearts.sync(&mut pool, 1);
        hearts.sync(&mut pool, 1);
        assert_eq!(hearts.shown(), 1);
        assert_eq!(active_icons(&pool), 1);
        hearts.sync(&mut pool, 1);
        assert_eq!(active_icons(&pool), 1);
    }

    #[test]
    fn test_lives_above_icon_count_are_capped() {
        let mut pool = EntityPool::new();
        let hearts = HeartDisplay::new(&mut pool, WINDOW, ImageId(0), 6);
        assert_eq!(active_icons(&pool), MAXIMAL_NUMBER_LIVES as usize);
        assert_eq!(hearts.shown(), MAXIMAL_NUMBER_LIVES);
    }

    #[test]
    fn test_loss_from_above_cap_hides_an_icon() {
        let mut pool = EntityPool::new();
        let mut hearts = HeartDisplay::new(&mut pool, WINDOW, ImageId(0), 6);
        let last = hearts.icon_id(MAXIMAL_NUMBER_LIVES - 1).unwrap();

        hearts.sync(&mut pool, 3);
        assert_eq!(hearts.shown(), 3);
        assert!(!pool.contains(last));
        assert_eq!(active_icons(&pool), 3);
    }

    #[test]
    fn test_label_color_bands() {
        assert_eq!(life_color(4), TextColor::Green);
        assert_eq!(life_color(3), TextColor::Green);
        assert_eq!(life_color(2), TextColor::Yellow);
        assert_eq!(life_color(1), TextColor::Red);
        assert_eq!(life_color(0), TextColor::Red);
    }

    #[test]
    fn test_label_rebuilt_only_on_change() {
        let mut pool = EntityPool::new();
        let mut label = LifeLabel::new(WINDOW);
        assert!(label.sync(&mut pool, 3));
        let first = label.id().unwrap();
        assert!(!label.sync(&mut pool, 3));
        assert!(label.sync(&mut pool, 2));
        assert!(!pool.contains(first));
        assert_eq!(pool.count_by_tag(Tag::LifeLabel), 1);

        let entity = pool.get(label.id().unwrap()).unwrap();
        assert_eq!(entity.pos, Vec2::new(685.0, 550.0));
        assert_eq!(
            entity.renderable,
            Some(Renderable::Text {
                text: "2".to_string(),
                color: TextColor::Yellow
            })
        );
    }
}
