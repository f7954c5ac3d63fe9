//! Sprite-name derivation and the drawing boundary
//!
//! The sim owns logical positions; turning them into pixels is the
//! embedder's job. Sprite names are derived deterministically from entity
//! state, so a renderer needs no game logic of its own.

use glam::Vec2;

use crate::sim::{Bat, Impact, Match};

/// Drawing boundary implemented by the embedder
pub trait Renderer {
    /// Draw the named sprite at `pos` (arena coordinates)
    fn draw(&mut self, sprite: &str, pos: Vec2);
}

/// Sprite name for a bat: side digit then display frame, e.g. `bat02` for
/// the left bat that just conceded
pub fn bat_sprite(bat: &Bat, ball_out: bool) -> String {
    format!("bat{}{}", bat.side.index(), bat.frame(ball_out))
}

/// Sprite name for an impact marker
pub fn impact_sprite(impact: &Impact) -> String {
    format!("impact{}", impact.frame())
}

/// Draw one frame: background, bats, ball, impact markers - in that order
pub fn draw_frame(game: &Match, out: &mut dyn Renderer) {
    out.draw("table", Vec2::ZERO);

    let ball_out = game.ball.out();
    for bat in &game.bats {
        out.draw(&bat_sprite(bat, ball_out), bat.pos());
    }

    out.draw("ball", game.ball.pos);

    for impact in &game.impacts {
        out.draw(&impact_sprite(impact), impact.pos);
    }
}
