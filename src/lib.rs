//! Breakout - A brick-breaking arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, round state, game loop)
//! - `render`: Render adapter trait and drawing of a round
//! - `input`: Keyboard adapter translating key events into paddle intent
//! - `driver`: Fixed-interval tick driver and the session that owns it
//! - `settings`: Data-driven game configuration

pub mod driver;
pub mod error;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation tick interval in milliseconds
    pub const TICK_MS: u64 = 10;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 320.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 3;
    pub const BRICK_COLUMNS: usize = 5;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Ball spawns this far above the bottom edge
    pub const BALL_START_OFFSET: f32 = 30.0;
    pub const BALL_LAUNCH_ANGLE: f32 = PI / 4.0;
    pub const BALL_BASE_SPEED: f32 = 3.0;
    /// Added to the speed multiplier on every paddle contact
    pub const BALL_SPEED_STEP: f32 = 0.5;
    pub const BALL_MAX_SPEED: f32 = 12.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 7.0;
    pub const PADDLE_BOOST_SPEED: f32 = 14.0;
    /// Paddle ignores input for this long after a life is lost
    pub const PADDLE_LOCK_MS: u64 = 500;

    /// Reflection cone: 150° at the left edge down to 30° at the right edge
    pub const CONE_WIDTH: f32 = 2.0 * PI / 3.0;
    pub const CONE_OFFSET: f32 = PI / 6.0;
    /// Rebound angle (from horizontal) when the paddle is moving at contact
    pub const MOVING_REBOUND_ANGLE: f32 = PI / 6.0;

    pub const STARTING_LIVES: u32 = 3;
    pub const COLOR_SEED: u64 = 0x0095_DD00;
}

/// Unit direction for an angle measured counter-clockwise from +x.
///
/// Screen y grows downward, so "up" is negative y.
#[inline]
pub fn angle_to_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_angle_to_direction_points_up() {
        let dir = angle_to_direction(PI / 2.0);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_to_direction_is_unit() {
        let dir = angle_to_direction(5.0 * PI / 6.0);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x < 0.0 && dir.y < 0.0, "up and to the left");
    }
}
