//! Game configuration
//!
//! Built from defaults plus the optional `rows bricks_per_row` command line
//! pair. Nothing is read from the environment or persisted between runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Level size and tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of brick rows
    pub brick_rows: usize,
    /// Bricks in each row
    pub bricks_per_row: usize,
    /// RNG seed for the run
    pub seed: u64,
    /// Probability that a brick gets a special (non-basic) strategy
    pub special_brick_chance: f64,
    /// Lives at the start of a level
    pub starting_lives: i32,
    pub window_width: f32,
    pub window_height: f32,
    /// Drop sound cues instead of queueing them
    #[serde(default)]
    pub muted: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            brick_rows: DEFAULT_BRICK_ROWS,
            bricks_per_row: DEFAULT_BRICKS_PER_ROW,
            seed: 0,
            special_brick_chance: 0.5,
            starting_lives: DEFAULT_NUMBER_OF_LIVES,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            muted: false,
        }
    }
}

impl GameConfig {
    /// Apply positional arguments (program name already stripped).
    ///
    /// Exactly two arguments override rows and bricks-per-row. Any other
    /// count keeps the defaults. Two arguments that are not both
    /// non-negative integers, or whose product does not fit the brick
    /// counter, also keep the defaults.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let mut config = Self::default();
        if let [rows, per_row] = args {
            let rows_n = parse_count(rows.as_ref());
            let per_row_n = parse_count(per_row.as_ref());
            match (rows_n, per_row_n) {
                (Some(rows), Some(per_row)) if grid_size(rows, per_row).is_some() => {
                    config.brick_rows = rows;
                    config.bricks_per_row = per_row;
                }
                _ => log::warn!(
                    "Ignoring brick layout arguments {:?} {:?}, using {}x{}",
                    rows.as_ref(),
                    per_row.as_ref(),
                    config.brick_rows,
                    config.bricks_per_row
                ),
            }
        }
        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Window size in pixels
    pub fn window(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }

    /// Total bricks in the grid, saturating at `i32::MAX`
    pub fn total_bricks(&self) -> i32 {
        grid_size(self.brick_rows, self.bricks_per_row).unwrap_or(i32::MAX)
    }
}

fn parse_count(s: &str) -> Option<usize> {
    s.trim().parse().ok()
}

fn grid_size(rows: usize, per_row: usize) -> Option<i32> {
    rows.checked_mul(per_row).and_then(|n| i32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_args_override_layout() {
        let config = GameConfig::from_args(&["3", "5"]);
        assert_eq!(config.brick_rows, 3);
        assert_eq!(config.bricks_per_row, 5);
        assert_eq!(config.total_bricks(), 15);
    }

    #[test]
    fn test_other_arg_counts_use_defaults() {
        let none: [&str; 0] = [];
        assert_eq!(GameConfig::from_args(&none), GameConfig::default());
        assert_eq!(GameConfig::from_args(&["4"]), GameConfig::default());
        assert_eq!(GameConfig::from_args(&["4", "4", "4"]), GameConfig::default());
    }

    #[test]
    fn test_unparsable_args_use_defaults() {
        let config = GameConfig::from_args(&["many", "-2"]);
        assert_eq!(config.brick_rows, DEFAULT_BRICK_ROWS);
        assert_eq!(config.bricks_per_row, DEFAULT_BRICKS_PER_ROW);
    }

    #[test]
    fn test_oversized_grid_uses_defaults() {
        let huge = usize::MAX.to_string();
        assert_eq!(GameConfig::from_args(&[huge.as_str(), "2"]), GameConfig::default());
        assert_eq!(GameConfig::from_args(&["65536", "65536"]), GameConfig::default());

        let config = GameConfig::from_args(&["46340", "46340"]);
        assert_eq!(config.total_bricks(), 46340 * 46340);
    }

    #[test]
    fn test_total_bricks_saturates() {
        let config = GameConfig {
            brick_rows: usize::MAX,
            bricks_per_row: 3,
            ..GameConfig::default()
        };
        assert_eq!(config.total_bricks(), i32::MAX);
    }

    #[test]
    fn test_muted_defaults_when_missing() {
        let json = r#"{"brick_rows":1,"bricks_per_row":2,"seed":9,
            "special_brick_chance":0.0,"starting_lives":3,
            "window_width":900.0,"window_height":600.0}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert!(!config.muted);
        assert_eq!(config.total_bricks(), 2);
    }
}
