//! Game settings and tuning
//!
//! Loaded from JSON; any field left out falls back to the classic defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Brick grid layout.
///
/// Brick (r, c) sits at `(c * (width + padding) + offset_left,
/// r * (height + padding) + offset_top)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickSettings {
    pub rows: usize,
    pub columns: usize,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_top: f32,
    pub offset_left: f32,
}

impl Default for BrickSettings {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            columns: BRICK_COLUMNS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            offset_top: BRICK_OFFSET_TOP,
            offset_left: BRICK_OFFSET_LEFT,
        }
    }
}

impl BrickSettings {
    /// Number of bricks that must be destroyed to win
    pub fn total(&self) -> usize {
        self.rows * self.columns
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    /// Distance of the spawn point above the bottom edge
    pub start_offset: f32,
    /// Launch angle in radians, counter-clockwise from +x
    pub launch_angle: f32,
    pub base_speed: f32,
    pub speed_step: f32,
    pub max_speed: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            start_offset: BALL_START_OFFSET,
            launch_angle: BALL_LAUNCH_ANGLE,
            base_speed: BALL_BASE_SPEED,
            speed_step: BALL_SPEED_STEP,
            max_speed: BALL_MAX_SPEED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub boost_speed: f32,
    pub lock_ms: u64,
    /// Angle spanned by rebounds across the paddle face
    pub cone_width: f32,
    /// Smallest rebound angle (right edge); the left edge gets `cone_offset + cone_width`
    pub cone_offset: f32,
    /// Rebound angle used instead when the paddle moves at contact
    pub moving_angle: f32,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            boost_speed: PADDLE_BOOST_SPEED,
            lock_ms: PADDLE_LOCK_MS,
            cone_width: CONE_WIDTH,
            cone_offset: CONE_OFFSET,
            moving_angle: MOVING_REBOUND_ANGLE,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field: FieldSettings,
    pub bricks: BrickSettings,
    pub ball: BallSettings,
    pub paddle: PaddleSettings,
    pub lives: u32,
    /// Simulated time per tick, used for the paddle motion-lock deadline
    pub tick_ms: u64,
    /// Seed for the brick color cue
    pub color_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: FieldSettings::default(),
            bricks: BrickSettings::default(),
            ball: BallSettings::default(),
            paddle: PaddleSettings::default(),
            lives: STARTING_LIVES,
            tick_ms: TICK_MS,
            color_seed: COLOR_SEED,
        }
    }
}

impl Settings {
    /// Default settings with a custom brick grid size
    pub fn with_grid(rows: usize, columns: usize) -> Self {
        let mut settings = Self::default();
        settings.bricks.rows = rows;
        settings.bricks.columns = columns;
        settings
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject configurations that would produce undefined geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        let FieldSettings { width, height } = self.field;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::EmptyPlayfield { width, height });
        }

        let bricks = &self.bricks;
        if bricks.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if bricks.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if !(bricks.width > 0.0 && bricks.height > 0.0) {
            return Err(ConfigError::DegenerateRect {
                what: "brick",
                width: bricks.width,
                height: bricks.height,
            });
        }
        if !(bricks.padding > 0.0) {
            return Err(ConfigError::BrickSpacing(bricks.padding));
        }

        let paddle = &self.paddle;
        if !(paddle.width > 0.0 && paddle.height > 0.0) {
            return Err(ConfigError::DegenerateRect {
                what: "paddle",
                width: paddle.width,
                height: paddle.height,
            });
        }

        let ball = &self.ball;
        if !(ball.radius > 0.0) {
            return Err(ConfigError::BallRadius(ball.radius));
        }
        if !(ball.base_speed >= 0.0) {
            return Err(ConfigError::NegativeSpeed {
                what: "base speed",
                value: ball.base_speed,
            });
        }
        if !(ball.speed_step >= 0.0) {
            return Err(ConfigError::NegativeSpeed {
                what: "speed step",
                value: ball.speed_step,
            });
        }
        if ball.max_speed < ball.base_speed {
            return Err(ConfigError::SpeedCap {
                base: ball.base_speed,
                max: ball.max_speed,
            });
        }

        if self.tick_ms == 0 {
            return Err(ConfigError::TickInterval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
        assert_eq!(Settings::default().bricks.total(), 15);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "bricks": { "rows": 5, "columns": 5 }, "lives": 5 }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.bricks.rows, 5);
        assert_eq!(settings.bricks.columns, 5);
        assert_eq!(settings.bricks.width, BRICK_WIDTH);
        assert_eq!(settings.lives, 5);
        assert_eq!(settings.field, FieldSettings::default());
    }

    #[test]
    fn test_zero_rows_rejected() {
        let err = Settings::with_grid(0, 5).validate().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroRows));
    }

    #[test]
    fn test_zero_columns_rejected() {
        let err = Settings::with_grid(3, 0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroColumns));
    }

    #[test]
    fn test_empty_playfield_rejected() {
        let mut settings = Settings::default();
        settings.field.height = 0.0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPlayfield { .. }));
    }

    #[test]
    fn test_zero_padding_rejected() {
        let mut settings = Settings::default();
        settings.bricks.padding = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::BrickSpacing(_))
        ));
    }

    #[test]
    fn test_paddle_width_must_be_positive() {
        let mut settings = Settings::default();
        settings.paddle.width = -1.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::DegenerateRect { what: "paddle", .. })
        ));
    }

    #[test]
    fn test_speed_cap_below_base_rejected() {
        let mut settings = Settings::default();
        settings.ball.max_speed = 1.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::SpeedCap { .. })
        ));
    }

    #[test]
    fn test_negative_speeds_rejected() {
        let mut settings = Settings::default();
        settings.ball.base_speed = -1.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NegativeSpeed { what: "base speed", .. })
        ));

        let mut settings = Settings::default();
        settings.ball.speed_step = -0.5;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NegativeSpeed { what: "speed step", .. })
        ));

        // A standing ball is allowed
        let mut settings = Settings::default();
        settings.ball.speed_step = 0.0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ lives: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_validates() {
        assert!(matches!(
            Settings::from_json(r#"{ "bricks": { "rows": 0 } }"#),
            Err(ConfigError::ZeroRows)
        ));
    }
}
