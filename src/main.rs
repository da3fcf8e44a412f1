//! Breakout entry point
//!
//! Native builds run a headless autopilot session: the paddle chases the
//! ball, draw calls go to the log at trace level, and the result of the
//! first round is printed.
//!
//! Usage: `breakout [settings.json]`

use std::process::ExitCode;

use breakout::Settings;
use breakout::driver::Session;
use breakout::input::{Key, KeyEvent};
use breakout::render::{Color, Surface};
use breakout::sim::{Game, GameEvent};

/// Frame length handed to the driver (60 Hz display)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this many frames (ten minutes of play)
const MAX_FRAMES: u32 = 60 * 60 * 10;

/// Surface that writes every draw call to the log
#[derive(Default)]
struct LogSurface {
    frames: u64,
}

impl Surface for LogSurface {
    fn clear(&mut self) {
        self.frames += 1;
        log::trace!("frame {}", self.frames);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        log::trace!("rect {x:.1},{y:.1} {width}x{height} {color}");
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        log::trace!("circle {x:.1},{y:.1} r{radius} {color}");
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        log::trace!("text {x:.1},{y:.1} {text:?}");
    }
}

/// Keys the autopilot holds, as (left, right)
fn autopilot(game: &Game) -> (bool, bool) {
    let round = game.round();
    let center = round.paddle.rect.center().x;
    let target = round.ball.pos.x;
    // Dead zone keeps the paddle still near the ball so rebounds use the cone
    let dead_zone = round.paddle.rect.width / 4.0;
    (target < center - dead_zone, target > center + dead_zone)
}

fn run(settings: Settings) -> Result<(), breakout::ConfigError> {
    let mut session = Session::new(settings, LogSurface::default())?;
    let mut held = (false, false);

    for frame in 0..MAX_FRAMES {
        let want = autopilot(session.game());
        if want.0 != held.0 {
            session.key_event(KeyEvent {
                key: Key::Left,
                pressed: want.0,
            });
        }
        if want.1 != held.1 {
            session.key_event(KeyEvent {
                key: Key::Right,
                pressed: want.1,
            });
        }
        held = want;

        for event in session.frame(FRAME_MS) {
            match event {
                GameEvent::LifeLost { remaining } => {
                    println!("Life lost at frame {frame}, {remaining} left");
                }
                GameEvent::RoundOver { outcome, score } => {
                    println!("Round over after {frame} frames: {outcome:?}, score {score}");
                }
                _ => {}
            }
        }

        if session.pending().is_some() {
            if let Ok(snapshot) = serde_json::to_string(session.game().round()) {
                log::debug!("Final round: {}", snapshot);
            }
            return Ok(());
        }
    }

    println!(
        "Stopped after {} frames, score {}",
        MAX_FRAMES,
        session.game().round().score.value
    );
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Breakout (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("breakout: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    match run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("breakout: {e}");
            ExitCode::FAILURE
        }
    }
}
