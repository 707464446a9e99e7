//! Bricker entry point
//!
//! Runs the game headlessly: an autopilot drives the paddle keys, prompts are
//! asked on the terminal and a JSON summary is printed when the game ends.
//!
//! Usage: `bricker [rows bricks_per_row]`

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use serde::Serialize;

use bricker::audio::Sound;
use bricker::consts::*;
use bricker::game::GameSnapshot;
use bricker::platform::{HeadlessPlatform, ImageId, Key, Platform};
use bricker::sim::Tag;
use bricker::{FrameOutcome, GameConfig, GameManager};

/// Frames per level before the host gives up on the autopilot (5 minutes)
const MAX_FRAMES_PER_LEVEL: u64 = 60 * 60 * 5;

/// Headless platform with terminal prompts
struct NativeHost {
    inner: HeadlessPlatform,
}

impl Platform for NativeHost {
    fn load_image(&mut self, path: &str) -> bricker::Result<ImageId> {
        self.inner.load_image(path)
    }

    fn load_sound(&mut self, path: &str) -> bricker::Result<Sound> {
        self.inner.load_sound(path)
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.inner.is_key_pressed(key)
    }

    fn window_dimensions(&self) -> Vec2 {
        self.inner.window_dimensions()
    }

    fn open_yes_no_dialog(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }
}

/// Steer the main paddle under whatever needs catching.
///
/// Chases a falling heart while the ball is moving up, otherwise tracks the
/// ball with a slow wobble so rallies don't loop forever.
fn autopilot(game: &GameManager, host: &mut NativeHost) {
    host.inner.release_all();
    let pool = game.pool();
    let paddle = pool.get(game.main_paddle());
    let ball = pool.get(game.main_ball());
    let (Some(paddle), Some(ball)) = (paddle, ball) else {
        return;
    };

    let heart = pool.find_by_tag(Tag::FallingHeart);
    let target_x = match heart {
        Some(heart) if ball.vel.y < 0.0 => heart.center().x,
        _ => {
            let t = game.frame() as f32 * 0.01;
            let wobble = (t.sin() * 0.3 + (t * 0.7).sin() * 0.15) * PADDLE_WIDTH;
            ball.center().x + wobble
        }
    };

    let dx = target_x - paddle.center().x;
    if dx < -PADDLE_WIDTH * 0.1 {
        host.inner.press(Key::Left);
    } else if dx > PADDLE_WIDTH * 0.1 {
        host.inner.press(Key::Right);
    }
}

#[derive(Serialize)]
struct RunSummary {
    outcome: FrameOutcome,
    seed: u64,
    #[serde(flatten)]
    game: GameSnapshot,
}

fn run() -> bricker::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let config = GameConfig::from_args(&args).with_seed(seed);
    log::info!(
        "Bricker starting: {}x{} bricks, seed {}",
        config.brick_rows,
        config.bricks_per_row,
        seed
    );

    let mut host = NativeHost {
        inner: HeadlessPlatform::new(config.window()),
    };
    let mut game = GameManager::new(config, &mut host)?;
    let mut level_frames = 0u64;

    let outcome = loop {
        autopilot(&game, &mut host);
        let outcome = game.update(&mut host, SIM_DT)?;
        for cue in game.audio_mut().drain() {
            log::trace!("play {cue:?}");
        }

        match outcome {
            FrameOutcome::Continue => {
                level_frames += 1;
                if level_frames >= MAX_FRAMES_PER_LEVEL {
                    log::warn!("Level still running after {level_frames} frames, stopping");
                    break outcome;
                }
            }
            FrameOutcome::Restarted => level_frames = 0,
            FrameOutcome::Quit => break outcome,
        }
    };

    let summary = RunSummary {
        outcome,
        seed,
        game: game.snapshot(),
    };
    match serde_json::to_string(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {e}"),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("bricker: {e}");
        std::process::exit(1);
    }
}
