//! Headless demo: an AI-vs-AI match driven one tick per frame
//!
//! Rendering and audio are stubbed with logging sinks; a real embedder
//! implements `Renderer` and `AudioSink` against its own platform and
//! drives `tick` from its frame loop.

use glam::Vec2;

use boing::Tuning;
use boing::audio::{LogAudio, dispatch_sounds};
use boing::render::{Renderer, draw_frame};
use boing::sim::{Match, tick};

/// Renderer that traces sprite draws instead of blitting them
struct TraceRenderer;

impl Renderer for TraceRenderer {
    fn draw(&mut self, sprite: &str, pos: Vec2) {
        log::trace!("draw {sprite} at ({:.1}, {:.1})", pos.x, pos.y);
    }
}

fn main() {
    env_logger::init();

    let seed: u64 = std::env::var("BOING_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB01);
    let frames: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3600);

    log::info!("Boing starting: seed={seed}, frames={frames}");

    let mut game = Match::new(seed);
    if let Ok(path) = std::env::var("BOING_TUNING") {
        match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("tuning loaded from {path}");
                    game = game.with_tuning(tuning);
                }
                Err(e) => log::warn!("ignoring bad tuning file {path}: {e}"),
            },
            Err(e) => log::warn!("cannot read tuning file {path}: {e}"),
        }
    }

    let mut audio = LogAudio;
    let mut renderer = TraceRenderer;

    for _ in 0..frames {
        tick(&mut game);
        dispatch_sounds(&game.events, &mut audio);
        draw_frame(&game, &mut renderer);
    }

    let (left, right) = game.scores();
    println!("final score after {frames} frames: {left} - {right}");
}
