//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed tick interval only, no wall-clock reads
//! - Seeded RNG only
//! - Stable row-major brick scan order
//! - Rendering only through the `Surface` trait

pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use collision::{
    BrickHit, Floor, PaddleHit, Rebound, WallHit, bounce_off_paddle, break_brick,
    reflect_off_walls,
};
pub use geometry::{Bounds, Circle, Rect};
pub use state::{
    Ball, Brick, BrickGrid, Counter, Direction, GameEvent, GamePhase, Outcome, Paddle, Round,
};
pub use tick::Game;
