//! Tick driver and session
//!
//! The host calls [`Session::frame`] once per display frame with the elapsed
//! time. A [`FixedStepDriver`] turns that into whole ticks at the configured
//! interval, so exactly one tick runs at a time. The session stops the driver
//! when a round ends and restarts it only after [`Session::acknowledge`].

use std::ops::ControlFlow;

use crate::consts::MAX_SUBSTEPS;
use crate::error::ConfigError;
use crate::input::{self, KeyEvent};
use crate::render::Surface;
use crate::settings::Settings;
use crate::sim::{Game, GameEvent, Outcome};

/// Longest frame the driver will catch up on (ms)
const MAX_FRAME_MS: f64 = 100.0;

/// A scheduler that can be started and stopped
pub trait TickDriver {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Accumulator-based fixed-interval driver
#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    step_ms: f64,
    accumulator: f64,
    running: bool,
}

impl FixedStepDriver {
    /// Driver ticking every `step_ms`, initially running
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_ms: step_ms.max(1) as f64,
            accumulator: 0.0,
            running: true,
        }
    }

    /// Accumulate `frame_ms` and run every tick that is due.
    ///
    /// Stops itself if `tick` breaks. Returns the number of ticks run.
    pub fn advance<F>(&mut self, frame_ms: f64, mut tick: F) -> u32
    where
        F: FnMut() -> ControlFlow<()>,
    {
        if !self.running {
            return 0;
        }
        self.accumulator += frame_ms.clamp(0.0, MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= self.step_ms && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.step_ms;
            substeps += 1;
            if tick().is_break() {
                self.stop();
                break;
            }
        }
        // Drop the backlog a capped frame could not drain
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step_ms);
        }
        substeps
    }
}

impl TickDriver for FixedStepDriver {
    fn start(&mut self) {
        self.accumulator = 0.0;
        self.running = true;
    }

    fn stop(&mut self) {
        self.accumulator = 0.0;
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// A round-over notice waiting for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOver {
    pub outcome: Outcome,
    pub score: u32,
}

/// Owns the game, its driver and the surface it draws to
pub struct Session<S: Surface> {
    game: Game,
    driver: FixedStepDriver,
    surface: S,
    pending: Option<RoundOver>,
}

impl<S: Surface> Session<S> {
    pub fn new(settings: Settings, surface: S) -> Result<Self, ConfigError> {
        let driver = FixedStepDriver::new(settings.tick_ms);
        let game = Game::new(settings)?;
        Ok(Self {
            game,
            driver,
            surface,
            pending: None,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn driver(&self) -> &FixedStepDriver {
        &self.driver
    }

    /// Round-over notice, if the player still has to acknowledge one
    pub fn pending(&self) -> Option<RoundOver> {
        self.pending
    }

    /// Run the ticks due for a frame of `frame_ms` and return their events
    pub fn frame(&mut self, frame_ms: f64) -> Vec<GameEvent> {
        let game = &mut self.game;
        let surface = &mut self.surface;
        self.driver.advance(frame_ms, || {
            game.tick(&mut *surface);
            if game.is_halted() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        let events = self.game.drain_events();
        for event in &events {
            if let GameEvent::RoundOver { outcome, score } = *event {
                log::info!("Waiting for acknowledgment ({:?}, score {})", outcome, score);
                self.pending = Some(RoundOver { outcome, score });
            }
        }
        events
    }

    pub fn key_event(&mut self, event: KeyEvent) {
        input::dispatch(&mut self.game, event);
    }

    /// Returns false if the code is not bound
    pub fn key_code(&mut self, code: u32, pressed: bool) -> bool {
        input::dispatch_code(&mut self.game, code, pressed)
    }

    /// Dismiss the round-over notice and resume with a fresh game
    pub fn acknowledge(&mut self) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.game.acknowledge();
        self.driver.start();
        true
    }
}
