//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only: one `tick` per rendered frame
//! - Seeded RNG only
//! - Fixed update order (bats, ball, impacts, scoring)
//! - No rendering or platform dependencies

pub mod control;
pub mod state;
pub mod tick;

pub use control::{AiControl, BatControl, ControlCtx, HumanControl, ai_movement};
pub use state::{Ball, Bat, GameEvent, Impact, Match, Side};
pub use tick::tick;
