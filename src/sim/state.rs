//! Match state and core simulation types
//!
//! Everything the per-frame tick reads or writes lives here. Update order is
//! fixed (bats, ball, impacts) and the only randomness comes from the
//! match-owned seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::control::{AiControl, BatControl};
use crate::audio::CueKind;
use crate::consts::*;
use crate::tuning::Tuning;

/// Which side of the arena a bat defends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// 0 for the left bat, 1 for the right - also the sprite-name digit
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Position in arena coordinates (origin top-left)
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    /// Sub-steps advanced per frame; grows by one with every bat hit and is
    /// never reduced within a rally
    pub speed: u32,
}

impl Ball {
    /// New ball at the arena centre heading horizontally (`dx` is -1 or 1)
    pub fn new(dx: f32, start_speed: u32) -> Self {
        Self {
            pos: Vec2::new(HALF_WIDTH, HALF_HEIGHT),
            dir: Vec2::new(dx, 0.0),
            speed: start_speed,
        }
    }

    /// Has the ball gone off the left or right edge of the arena?
    pub fn out(&self) -> bool {
        self.pos.x < 0.0 || self.pos.x > WIDTH
    }
}

/// A bat
#[derive(Debug, Clone, PartialEq)]
pub struct Bat {
    pub side: Side,
    /// Fixed horizontal position
    pub x: f32,
    /// Vertical position, clamped to [BAT_MIN_Y, BAT_MAX_Y] every frame
    pub y: f32,
    pub score: u32,
    /// Glow timer: set to 10 after a hit and 20 after conceding, decremented
    /// every frame and allowed to go negative. The exact frame it reaches 0
    /// is when the next ball is served.
    pub timer: i32,
}

impl Bat {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            x: BAT_X[side.index()],
            y: HALF_HEIGHT,
            score: 0,
            timer: 0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Display frame: 0 idle, 1 just deflected the ball, 2 just conceded.
    /// Render-only - physics never reads this.
    pub fn frame(&self, ball_out: bool) -> u8 {
        if self.timer > 0 {
            if ball_out { 2 } else { 1 }
        } else {
            0
        }
    }
}

/// Short-lived marker spawned wherever the ball bounces
#[derive(Debug, Clone, PartialEq)]
pub struct Impact {
    /// Fixed at creation
    pub pos: Vec2,
    /// Frames since creation; the marker is removed when this reaches the
    /// tuned lifetime (10)
    pub time: u32,
}

impl Impact {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, time: 0 }
    }

    /// Sprite frame index - five frames shown for two frames each
    pub fn frame(&self) -> u32 {
        self.time / 2
    }
}

/// Things that happened during a tick, for the embedder to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Play one variant of a sound cue
    Sound { cue: CueKind, variant: u8 },
    /// A bat deflected the ball
    BatHit { side: Side },
    /// The ball bounced off the top or bottom wall
    WallBounce,
    /// A point was scored
    Goal { scorer: Side },
    /// A fresh ball entered play heading toward the side that conceded
    Served { toward: Side },
}

/// A running match: both bats and their movement strategies, the ball, the
/// live impact markers, and the seeded RNG behind every random decision
pub struct Match {
    /// Left bat first
    pub bats: [Bat; 2],
    pub ball: Ball,
    /// Insertion-ordered; pruned order-stably each frame
    pub impacts: Vec<Impact>,
    /// Aiming error added to the AI target, re-rolled on every bat hit
    pub ai_offset: f32,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
    pub tuning: Tuning,
    pub(crate) controls: [Box<dyn BatControl>; 2],
    pub(crate) rng: Pcg32,
}

impl Match {
    /// AI vs AI match with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_controls(seed, [Box::new(AiControl), Box::new(AiControl)])
    }

    /// Match with explicit movement strategies, left bat first.
    /// The opening serve heads left.
    pub fn with_controls(seed: u64, controls: [Box<dyn BatControl>; 2]) -> Self {
        let tuning = Tuning::default();
        Self {
            bats: [Bat::new(Side::Left), Bat::new(Side::Right)],
            ball: Ball::new(-1.0, tuning.ball_start_speed),
            impacts: Vec::new(),
            ai_offset: 0.0,
            events: Vec::new(),
            tuning,
            controls,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Replace the balance values; the current ball picks up the new start
    /// speed so a freshly built match stays consistent
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.ball.speed = tuning.ball_start_speed;
        self.tuning = tuning;
        self
    }

    /// Score line, left bat first
    pub fn scores(&self) -> (u32, u32) {
        (self.bats[0].score, self.bats[1].score)
    }
}
