//! Round state and entity types
//!
//! A [`Round`] owns everything that is rebuilt when a new game starts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rect};
use crate::angle_to_direction;
use crate::render::Color;
use crate::settings::{BallSettings, BrickSettings, FieldSettings, PaddleSettings, Settings};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every brick destroyed, waiting for acknowledgment
    Won,
    /// Out of lives, waiting for acknowledgment
    GameOver,
}

impl GamePhase {
    /// Won and GameOver halt the tick driver
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Things that happened during a tick, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit { speed: f32 },
    BrickDestroyed { row: usize, col: usize, color: Color },
    LifeLost { remaining: u32 },
    RoundOver { outcome: Outcome, score: u32 },
}

/// Horizontal paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// The ball. Travels `dir * speed` pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    pub radius: f32,
    /// Speed multiplier, ramps on paddle hits
    pub speed: f32,
}

impl Ball {
    /// Spawn centered horizontally, just above the bottom edge
    pub fn spawn(field: &FieldSettings, settings: &BallSettings) -> Self {
        Self {
            pos: Vec2::new(field.width / 2.0, field.height - settings.start_offset),
            dir: angle_to_direction(settings.launch_angle),
            radius: settings.radius,
            speed: settings.base_speed,
        }
    }

    /// Displacement applied by the next integration step
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.dir * self.speed
    }

    /// Where the ball will be after the next integration step
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.velocity()
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// The ball's circle at its next position
    pub fn next_circle(&self) -> Circle {
        Circle::new(self.next_pos(), self.radius)
    }

    #[inline]
    pub fn flip_x(&mut self) {
        self.dir.x = -self.dir.x;
    }

    #[inline]
    pub fn flip_y(&mut self) {
        self.dir.y = -self.dir.y;
    }

    /// Point the ball along `angle` (radians, counter-clockwise from +x)
    pub fn set_angle(&mut self, angle: f32) {
        self.dir = angle_to_direction(angle);
    }

    /// Bump the speed multiplier, never past `max`
    pub fn ramp_speed(&mut self, step: f32, max: f32) {
        self.speed = (self.speed + step).min(max).max(self.speed);
    }

    pub fn integrate(&mut self) {
        self.pos += self.velocity();
    }
}

/// The player's paddle, resting on the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub moving_left: bool,
    pub moving_right: bool,
    pub boosted: bool,
    pub speed: f32,
    pub boost_speed: f32,
    /// Input is ignored until the game clock reaches this time (ms)
    pub locked_until: Option<u64>,
}

impl Paddle {
    pub fn spawn(field: &FieldSettings, settings: &PaddleSettings) -> Self {
        Self {
            rect: Self::home(field, settings.width, settings.height),
            moving_left: false,
            moving_right: false,
            boosted: false,
            speed: settings.speed,
            boost_speed: settings.boost_speed,
            locked_until: None,
        }
    }

    fn home(field: &FieldSettings, width: f32, height: f32) -> Rect {
        Rect::new((field.width - width) / 2.0, field.height - height, width, height)
    }

    /// Recenter and ignore input for `lock_ms` starting at `now_ms`.
    ///
    /// Held keys stay held, so motion resumes once the lock expires.
    pub fn reset(&mut self, field: &FieldSettings, now_ms: u64, lock_ms: u64) {
        self.rect = Self::home(field, self.rect.width, self.rect.height);
        self.locked_until = Some(now_ms + lock_ms);
    }

    pub fn is_locked(&self, now_ms: u64) -> bool {
        self.locked_until.is_some_and(|deadline| now_ms < deadline)
    }

    /// Direction the player is asking for; right wins if both are held
    pub fn intent(&self) -> Option<Direction> {
        if self.moving_right {
            Some(Direction::Right)
        } else if self.moving_left {
            Some(Direction::Left)
        } else {
            None
        }
    }

    /// Direction the paddle is actually moving at `now_ms`
    pub fn motion(&self, now_ms: u64) -> Option<Direction> {
        if self.is_locked(now_ms) {
            None
        } else {
            self.intent()
        }
    }

    pub fn current_speed(&self) -> f32 {
        if self.boosted {
            self.boost_speed
        } else {
            self.speed
        }
    }

    /// Apply one tick of motion, clamped to `[0, field_width - width]`
    pub fn update(&mut self, field_width: f32, now_ms: u64) {
        if self.locked_until.is_some_and(|deadline| now_ms >= deadline) {
            self.locked_until = None;
        }

        let max_x = (field_width - self.rect.width).max(0.0);
        let speed = self.current_speed();
        match self.motion(now_ms) {
            Some(Direction::Right) => self.rect.pos.x = (self.rect.pos.x + speed).min(max_x),
            Some(Direction::Left) => self.rect.pos.x = (self.rect.pos.x - speed).max(0.0),
            None => {}
        }
    }
}

/// A single brick cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub alive: bool,
}

/// Fixed-size grid of bricks, stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Brick>,
}

impl BrickGrid {
    /// Lay out `rows x columns` bricks with uniform spacing
    pub fn build(layout: &BrickSettings) -> Self {
        let mut cells = Vec::with_capacity(layout.total());
        for r in 0..layout.rows {
            for c in 0..layout.columns {
                let x = c as f32 * (layout.width + layout.padding) + layout.offset_left;
                let y = r as f32 * (layout.height + layout.padding) + layout.offset_top;
                cells.push(Brick {
                    rect: Rect::new(x, y, layout.width, layout.height),
                    alive: true,
                });
            }
        }

        Self {
            rows: layout.rows,
            columns: layout.columns,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total cells, alive or not
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row < self.rows && col < self.columns {
            self.cells.get(row * self.columns + col)
        } else {
            None
        }
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|b| b.alive).count()
    }

    /// Alive bricks with their (row, col), in scan order
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize, &Brick)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, b)| b.alive)
            .map(move |(i, b)| (i / columns, i % columns, b))
    }

    /// Destroy a brick. Returns false if it was already gone or out of range.
    pub fn destroy(&mut self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.columns {
            return false;
        }
        let brick = &mut self.cells[row * self.columns + col];
        let was_alive = brick.alive;
        brick.alive = false;
        was_alive
    }
}

/// Non-negative score or life counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counter {
    pub value: u32,
}

impl Counter {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn increment(&mut self) {
        self.value += 1;
    }

    /// Saturates at zero
    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// Everything that makes up one playthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    pub score: Counter,
    pub lives: Counter,
    /// Color every alive brick is drawn in; changes on each destruction
    pub brick_color: Color,
}

impl Round {
    /// Build a fresh round with `lives` remaining. Settings must already be validated.
    pub fn new(settings: &Settings, lives: u32) -> Self {
        Self {
            ball: Ball::spawn(&settings.field, &settings.ball),
            paddle: Paddle::spawn(&settings.field, &settings.paddle),
            bricks: BrickGrid::build(&settings.bricks),
            score: Counter::new(0),
            lives: Counter::new(lives),
            brick_color: Color::DEFAULT,
        }
    }

    /// Destroying every brick wins the round
    pub fn is_cleared(&self) -> bool {
        self.score.value as usize >= self.bricks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldSettings {
        FieldSettings::default()
    }

    #[test]
    fn test_ball_spawn() {
        let ball = Ball::spawn(&field(), &BallSettings::default());
        assert_eq!(ball.pos, Vec2::new(240.0, 290.0));
        assert!((ball.dir.length() - 1.0).abs() < 1e-6);
        assert!(ball.dir.x > 0.0 && ball.dir.y < 0.0, "launches up and right");
        assert_eq!(ball.speed, 3.0);
    }

    #[test]
    fn test_ball_integrate_uses_speed() {
        let mut ball = Ball::spawn(&field(), &BallSettings::default());
        ball.dir = Vec2::new(1.0, 0.0);
        ball.speed = 4.0;
        assert_eq!(ball.next_pos(), Vec2::new(244.0, 290.0));
        ball.integrate();
        assert_eq!(ball.pos, Vec2::new(244.0, 290.0));
    }

    #[test]
    fn test_ramp_speed_caps() {
        let mut ball = Ball::spawn(&field(), &BallSettings::default());
        ball.speed = 11.8;
        ball.ramp_speed(0.5, 12.0);
        assert_eq!(ball.speed, 12.0);
        ball.ramp_speed(0.5, 12.0);
        assert_eq!(ball.speed, 12.0);
    }

    #[test]
    fn test_paddle_spawn_centered_on_floor() {
        let paddle = Paddle::spawn(&field(), &PaddleSettings::default());
        assert_eq!(paddle.rect, Rect::new(202.5, 310.0, 75.0, 10.0));
        assert!(!paddle.is_locked(0));
    }

    #[test]
    fn test_paddle_moves_and_clamps() {
        let mut paddle = Paddle::spawn(&field(), &PaddleSettings::default());
        paddle.moving_right = true;
        paddle.update(480.0, 0);
        assert_eq!(paddle.rect.pos.x, 209.5);

        paddle.boosted = true;
        for _ in 0..100 {
            paddle.update(480.0, 0);
        }
        assert_eq!(paddle.rect.right(), 480.0);

        paddle.moving_right = false;
        paddle.moving_left = true;
        for _ in 0..100 {
            paddle.update(480.0, 0);
        }
        assert_eq!(paddle.rect.left(), 0.0);
    }

    #[test]
    fn test_paddle_lock_suppresses_motion_until_deadline() {
        let mut paddle = Paddle::spawn(&field(), &PaddleSettings::default());
        paddle.rect.pos.x = 0.0;
        paddle.moving_right = true;
        paddle.reset(&field(), 1000, 500);
        let home = paddle.rect.pos.x;
        assert_eq!(home, 202.5);

        paddle.update(480.0, 1490);
        assert_eq!(paddle.rect.pos.x, home);
        assert_eq!(paddle.motion(1490), None);

        paddle.update(480.0, 1500);
        assert_eq!(paddle.rect.pos.x, home + 7.0);
        assert_eq!(paddle.locked_until, None);
    }

    #[test]
    fn test_paddle_intent_prefers_right() {
        let mut paddle = Paddle::spawn(&field(), &PaddleSettings::default());
        paddle.moving_left = true;
        assert_eq!(paddle.intent(), Some(Direction::Left));
        paddle.moving_right = true;
        assert_eq!(paddle.intent(), Some(Direction::Right));
    }

    #[test]
    fn test_grid_layout() {
        let grid = BrickGrid::build(&BrickSettings::default());
        assert_eq!(grid.len(), 15);
        assert_eq!(grid.get(0, 0).unwrap().rect, Rect::new(30.0, 30.0, 75.0, 20.0));
        assert_eq!(grid.get(2, 4).unwrap().rect, Rect::new(370.0, 90.0, 75.0, 20.0));
        assert!(grid.get(3, 0).is_none());
    }

    #[test]
    fn test_grid_cells_are_disjoint() {
        let grid = BrickGrid::build(&BrickSettings::default());
        let cells: Vec<_> = grid.iter_alive().map(|(_, _, b)| b.rect).collect();
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn test_grid_destroy_once() {
        let mut grid = BrickGrid::build(&BrickSettings::default());
        assert!(grid.destroy(1, 2));
        assert!(!grid.destroy(1, 2));
        assert!(!grid.destroy(9, 9));
        assert_eq!(grid.alive_count(), 14);
        assert!(grid.iter_alive().all(|(r, c, _)| (r, c) != (1, 2)));
    }

    #[test]
    fn test_counter_saturates() {
        let mut lives = Counter::new(1);
        lives.decrement();
        lives.decrement();
        assert_eq!(lives.value, 0);
    }
}
