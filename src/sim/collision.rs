//! Collision detection and response
//!
//! Every test is evaluated against the ball's *next* position (one-step
//! lookahead) before it is integrated. There is no swept test, so a fast ball
//! can tunnel through something thinner than its per-tick travel.

use std::f32::consts::PI;

use super::geometry::Bounds;
use super::state::{Ball, BrickGrid, Direction, Paddle};
use crate::settings::Settings;

/// Whether the bottom edge reflects the ball or lets it through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Floor {
    #[default]
    Solid,
    /// Bottom edge is a loss line; only left, right and top reflect
    Open,
}

/// Which velocity components a wall check flipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallHit {
    pub x: bool,
    pub y: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Reflect the ball off the playfield edges.
///
/// Each axis is checked independently, so a corner flips both. Speed is
/// unchanged.
pub fn reflect_off_walls(ball: &mut Ball, bounds: &Bounds, floor: Floor) -> WallHit {
    let next = ball.next_pos();
    let r = ball.radius;
    let left = bounds.origin.x;
    let top = bounds.origin.y;
    let right = left + bounds.width;
    let bottom = top + bounds.height;

    let mut hit = WallHit::default();

    if next.x > right - r || next.x - r < left {
        ball.flip_x();
        hit.x = true;
    }

    let past_floor = floor == Floor::Solid && next.y > bottom - r;
    if past_floor || next.y - r < top {
        ball.flip_y();
        hit.y = true;
    }

    hit
}

/// Paddle rebound tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rebound {
    /// Angle spanned across the paddle face
    pub cone_width: f32,
    /// Rebound angle at the right edge
    pub cone_offset: f32,
    /// Rebound angle (from horizontal) while the paddle moves
    pub moving_angle: f32,
    pub speed_step: f32,
    pub max_speed: f32,
}

impl Rebound {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            cone_width: settings.paddle.cone_width,
            cone_offset: settings.paddle.cone_offset,
            moving_angle: settings.paddle.moving_angle,
            speed_step: settings.ball.speed_step,
            max_speed: settings.ball.max_speed,
        }
    }

    /// Rebound angle for a contact at `relative` across the paddle (0 = left edge, 1 = right edge)
    pub fn cone_angle(&self, relative: f32) -> f32 {
        (1.0 - relative) * self.cone_width + self.cone_offset
    }

    /// Fixed rebound angle when the paddle moves into the ball
    pub fn moving_rebound(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Right => self.moving_angle,
            Direction::Left => PI - self.moving_angle,
        }
    }
}

/// Result of a paddle contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    /// Contact point across the paddle, 0 at the left edge and 1 at the right.
    /// Near-misses on the edge fall slightly outside [0, 1].
    pub relative: f32,
    /// Rebound angle in radians
    pub angle: f32,
    /// Speed multiplier after the ramp
    pub speed: f32,
}

/// Remap the ball's direction off the paddle and ramp its speed.
///
/// Fires when the ball's next bottom edge is below the paddle's top edge and
/// the ball's horizontal extent overlaps the paddle. The new direction depends
/// only on where the ball meets the paddle (or on paddle motion), never on the
/// incoming angle.
pub fn bounce_off_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    rebound: &Rebound,
    now_ms: u64,
) -> Option<PaddleHit> {
    let rect = &paddle.rect;
    if ball.next_pos().y + ball.radius <= rect.top() {
        return None;
    }
    if ball.pos.x + ball.radius <= rect.left() || ball.pos.x - ball.radius >= rect.right() {
        return None;
    }

    let relative = (ball.pos.x - rect.left()) / rect.width;
    let angle = match paddle.motion(now_ms) {
        Some(direction) => rebound.moving_rebound(direction),
        None => rebound.cone_angle(relative),
    };

    ball.set_angle(angle);
    ball.ramp_speed(rebound.speed_step, rebound.max_speed);

    Some(PaddleHit {
        relative,
        angle,
        speed: ball.speed,
    })
}

/// A destroyed brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    pub row: usize,
    pub col: usize,
    /// True for a top/bottom hit (y flipped), false for a side hit (x flipped)
    pub vertical: bool,
}

/// Destroy the first brick the ball's next position overlaps.
///
/// Scans row-major, so at most one brick goes per tick. If the ball's center
/// lies strictly within the brick's horizontal span the hit is on the top or
/// bottom face and y is flipped; otherwise x is flipped.
pub fn break_brick(ball: &mut Ball, bricks: &mut BrickGrid) -> Option<BrickHit> {
    let next = ball.next_circle();
    let (row, col, rect) = bricks
        .iter_alive()
        .find(|(_, _, brick)| brick.rect.overlaps(&next))
        .map(|(row, col, brick)| (row, col, brick.rect))?;

    bricks.destroy(row, col);

    let vertical = rect.spans_x(ball.pos.x);
    if vertical {
        ball.flip_y();
    } else {
        ball.flip_x();
    }

    Some(BrickHit { row, col, vertical })
}
