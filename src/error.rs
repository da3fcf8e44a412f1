//! Configuration errors
//!
//! Play itself has no recoverable errors; malformed settings are rejected
//! before a round is built.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("brick grid needs at least one row")]
    ZeroRows,

    #[error("brick grid needs at least one column")]
    ZeroColumns,

    #[error("playfield must have positive size, got {width}x{height}")]
    EmptyPlayfield { width: f32, height: f32 },

    #[error("{what} must have positive size, got {width}x{height}")]
    DegenerateRect {
        what: &'static str,
        width: f32,
        height: f32,
    },

    #[error("brick padding must be positive, got {0}")]
    BrickSpacing(f32),

    #[error("ball radius must be positive, got {0}")]
    BallRadius(f32),

    #[error("ball {what} must not be negative, got {value}")]
    NegativeSpeed { what: &'static str, value: f32 },

    #[error("ball speed cap {max} is below base speed {base}")]
    SpeedCap { base: f32, max: f32 },

    #[error("tick interval must be at least 1ms")]
    TickInterval,

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
