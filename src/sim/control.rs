//! Bat movement strategies
//!
//! Each bat is driven by a strategy chosen when the match is created: a
//! human strategy polling an external input source, or the built-in
//! computer player.

use crate::consts::*;

/// What a strategy may look at when deciding how far to move this frame
#[derive(Debug, Clone, Copy)]
pub struct ControlCtx {
    /// The controlled bat's position
    pub bat_x: f32,
    pub bat_y: f32,
    /// Current ball position
    pub ball_x: f32,
    pub ball_y: f32,
    /// Aiming error applied to the AI target, re-rolled on every bat hit
    pub ai_offset: f32,
}

/// A bat movement strategy: one call per frame, returning the vertical
/// movement in pixels
pub trait BatControl {
    fn movement(&mut self, ctx: &ControlCtx) -> f32;
}

/// Strategy polling an external input source (keyboard, gamepad, script)
pub struct HumanControl {
    source: Box<dyn FnMut() -> f32>,
}

impl HumanControl {
    /// `source` is polled once per frame and should return `-PLAYER_SPEED`,
    /// 0 or `PLAYER_SPEED`
    pub fn new(source: impl FnMut() -> f32 + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

impl BatControl for HumanControl {
    fn movement(&mut self, _ctx: &ControlCtx) -> f32 {
        (self.source)()
    }
}

/// The built-in computer player
#[derive(Debug, Clone, Copy, Default)]
pub struct AiControl;

impl BatControl for AiControl {
    fn movement(&mut self, ctx: &ControlCtx) -> f32 {
        ai_movement(ctx)
    }
}

/// Distance-weighted chase. With the ball far away the bat holds the arena
/// centre; as it approaches, the target shifts to the ball's y plus the
/// current aiming error. The result never exceeds `MAX_AI_SPEED` either way.
pub fn ai_movement(ctx: &ControlCtx) -> f32 {
    let x_distance = (ctx.ball_x - ctx.bat_x).abs();

    let centre_target = HALF_HEIGHT;
    let ball_target = ctx.ball_y + ctx.ai_offset;

    let weight = (x_distance / HALF_WIDTH).min(1.0);
    let target_y = weight * centre_target + (1.0 - weight) * ball_target;

    (target_y - ctx.bat_y).clamp(-MAX_AI_SPEED, MAX_AI_SPEED)
}
