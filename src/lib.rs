//! Boing - a two-bat arcade ball game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, AI, scoring)
//! - `audio`: Sound cue kinds and the playback boundary
//! - `render`: Sprite-name derivation and the drawing boundary
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod render;
pub mod sim;
pub mod tuning;

pub use sim::Match;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions in pixels
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 480.0;
    pub const HALF_WIDTH: f32 = WIDTH / 2.0;
    pub const HALF_HEIGHT: f32 = HEIGHT / 2.0;

    /// Vertical speed of a human-controlled bat, pixels per frame
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Fastest the computer player may move, pixels per frame
    pub const MAX_AI_SPEED: f32 = 6.0;

    /// Horizontal distance from the arena centre at which the ball can meet
    /// a bat. Bat centres sit 360px out; half the bat width (9) plus half
    /// the ball width (7) puts first contact at 344.
    pub const BAT_HIT_X: f32 = 344.0;
    /// Vertical half-window around the bat centre that counts as a hit
    /// (exclusive at both ends)
    pub const BAT_HIT_RANGE_Y: f32 = 64.0;

    /// The top and bottom walls are this far from the vertical centre
    pub const WALL_Y: f32 = 220.0;

    /// Bat y travel limits
    pub const BAT_MIN_Y: f32 = 80.0;
    pub const BAT_MAX_Y: f32 = 400.0;
    /// Fixed bat x position per side, left then right
    pub const BAT_X: [f32; 2] = [40.0, 760.0];
}

/// Normalize to a unit vector.
///
/// A zero-length vector has no defined direction, so it is returned
/// unchanged rather than dividing by zero.
#[inline]
pub fn normalized(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(v)
}

/// Sign of `x`: -1.0 for negative values, 1.0 otherwise
#[inline]
pub fn sign(x: f32) -> f32 {
    if x < 0.0 { -1.0 } else { 1.0 }
}
