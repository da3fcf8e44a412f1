//! Fixed-interval game loop
//!
//! [`Game`] owns the current round and advances it one tick at a time:
//! clear, walls, paddle, bricks, paddle motion, draw, terminal checks,
//! integrate.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{Floor, Rebound, bounce_off_paddle, break_brick, reflect_off_walls};
use super::geometry::Bounds;
use super::state::{Ball, Direction, GameEvent, GamePhase, Outcome, Round};
use crate::error::ConfigError;
use crate::render::{Color, Surface, render_round};
use crate::settings::Settings;

/// Orchestrates a game: one round at a time, lives carried across life losses
#[derive(Debug, Clone)]
pub struct Game {
    settings: Settings,
    rebound: Rebound,
    round: Round,
    phase: GamePhase,
    rng: Pcg32,
    /// Simulated clock, advanced by `settings.tick_ms` per tick
    elapsed_ms: u64,
    events: Vec<GameEvent>,
}

impl Game {
    /// Validate settings and start a fresh game
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let round = Round::new(&settings, settings.lives);
        log::info!(
            "New game: {}x{} bricks, {} lives",
            settings.bricks.rows,
            settings.bricks.columns,
            settings.lives
        );
        Ok(Self {
            rebound: Rebound::from_settings(&settings),
            rng: Pcg32::seed_from_u64(settings.color_seed),
            round,
            phase: GamePhase::Playing,
            elapsed_ms: 0,
            events: Vec::new(),
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Mutable access for scripted setups (tests, demos)
    pub fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// True while a round-over acknowledgment is pending
    pub fn is_halted(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.settings.field.width, self.settings.field.height)
    }

    /// Advance one tick and draw the result. No-op once the round is over.
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.elapsed_ms += self.settings.tick_ms;
        let now = self.elapsed_ms;
        let bounds = self.bounds();

        surface.clear();

        let round = &mut self.round;
        reflect_off_walls(&mut round.ball, &bounds, Floor::Open);

        if let Some(hit) = bounce_off_paddle(&mut round.ball, &round.paddle, &self.rebound, now) {
            log::debug!(
                "Paddle hit at {:.2}, angle {:.1}°, speed {:.1}",
                hit.relative,
                hit.angle.to_degrees(),
                hit.speed
            );
            self.events.push(GameEvent::PaddleHit { speed: hit.speed });
        }

        if let Some(hit) = break_brick(&mut round.ball, &mut round.bricks) {
            round.score.increment();
            round.brick_color = Color::random(&mut self.rng);
            log::debug!(
                "Brick ({}, {}) destroyed, score {}",
                hit.row,
                hit.col,
                round.score.value
            );
            self.events.push(GameEvent::BrickDestroyed {
                row: hit.row,
                col: hit.col,
                color: round.brick_color,
            });
        }

        round.paddle.update(bounds.width, now);

        render_round(surface, &self.round, bounds.width);

        if self.round.is_cleared() {
            self.end_round(Outcome::Won);
            return;
        }

        let ball = &self.round.ball;
        if ball.next_pos().y > bounds.height - ball.radius {
            self.lose_life();
            return;
        }

        self.round.ball.integrate();
    }

    fn lose_life(&mut self) {
        self.round.lives.decrement();
        let remaining = self.round.lives.value;
        self.events.push(GameEvent::LifeLost { remaining });

        if remaining == 0 {
            self.end_round(Outcome::Lost);
            return;
        }

        log::info!("Life lost, {} remaining", remaining);
        let field = &self.settings.field;
        self.round.ball = Ball::spawn(field, &self.settings.ball);
        self.round
            .paddle
            .reset(field, self.elapsed_ms, self.settings.paddle.lock_ms);
    }

    fn end_round(&mut self, outcome: Outcome) {
        self.phase = match outcome {
            Outcome::Won => GamePhase::Won,
            Outcome::Lost => GamePhase::GameOver,
        };
        let score = self.round.score.value;
        log::info!("Round over: {:?} with score {}", outcome, score);
        self.events.push(GameEvent::RoundOver { outcome, score });
    }

    /// Player acknowledged the round-over notice; start a fresh game.
    ///
    /// Returns false (and does nothing) while the round is still in play.
    pub fn acknowledge(&mut self) -> bool {
        if !self.is_halted() {
            return false;
        }
        self.new_game();
        true
    }

    /// Rebuild ball, paddle and bricks with score 0, keeping the current lives.
    ///
    /// With no lives left there is nothing to carry over, so a fresh game
    /// starts instead.
    pub fn new_round(&mut self) {
        let lives = self.round.lives.value;
        if lives == 0 {
            self.new_game();
            return;
        }
        self.rebuild(lives);
    }

    /// Rebuild everything with full lives
    pub fn new_game(&mut self) {
        self.rebuild(self.settings.lives);
        log::info!("New game started");
    }

    fn rebuild(&mut self, lives: u32) {
        let held = (
            self.round.paddle.moving_left,
            self.round.paddle.moving_right,
            self.round.paddle.boosted,
        );
        self.round = Round::new(&self.settings, lives);
        // Keys still held across the reset keep driving the new paddle
        (
            self.round.paddle.moving_left,
            self.round.paddle.moving_right,
            self.round.paddle.boosted,
        ) = held;
        self.phase = GamePhase::Playing;
    }

    /// Arrow key pressed or released
    pub fn on_direction_change(&mut self, direction: Direction, pressed: bool) {
        let paddle = &mut self.round.paddle;
        match direction {
            Direction::Left => paddle.moving_left = pressed,
            Direction::Right => paddle.moving_right = pressed,
        }
    }

    /// Boost modifier pressed or released
    pub fn on_boost_change(&mut self, active: bool) {
        self.round.paddle.boosted = active;
    }
}
