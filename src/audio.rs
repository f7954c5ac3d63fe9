//! Sound cues and the playback boundary
//!
//! The sim decides what to play and which variant; producing actual audio
//! is the embedder's job. A sink that cannot play a cue (missing asset,
//! dead backend) must swallow the failure - sound never interrupts the
//! simulation.

use crate::sim::GameEvent;

/// Sound cue kinds emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    /// Ball met a bat, played on every hit
    Hit,
    /// Speed-tier layer played alongside `Hit`
    HitSlow,
    HitMedium,
    HitFast,
    HitVeryFast,
    /// Ball bounced off the top or bottom wall
    Bounce,
    /// Synth layer played with every wall bounce
    BounceSynth,
    /// A point was scored
    ScoreGoal,
}

impl CueKind {
    /// Number of recorded variants for this cue
    pub fn variants(self) -> u8 {
        match self {
            CueKind::Hit | CueKind::Bounce => 5,
            _ => 1,
        }
    }

    /// Base asset name; the variant index is appended to form the file stem
    /// (e.g. `hit3`, `bounce0`)
    pub fn name(self) -> &'static str {
        match self {
            CueKind::Hit => "hit",
            CueKind::HitSlow => "hit_slow",
            CueKind::HitMedium => "hit_medium",
            CueKind::HitFast => "hit_fast",
            CueKind::HitVeryFast => "hit_veryfast",
            CueKind::Bounce => "bounce",
            CueKind::BounceSynth => "bounce_synth",
            CueKind::ScoreGoal => "score_goal",
        }
    }
}

/// Playback boundary implemented by the embedder.
///
/// Implementations must not panic or propagate missing-asset errors; log
/// and carry on instead.
pub trait AudioSink {
    /// Play one variant of a cue
    fn play(&mut self, cue: CueKind, variant: u8);
}

/// Sink that discards every cue
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: CueKind, _variant: u8) {}
}

/// Sink that logs cues instead of playing them
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: CueKind, variant: u8) {
        log::debug!("cue {}{}", cue.name(), variant);
    }
}

/// Forward this tick's sound events to a sink
pub fn dispatch_sounds(events: &[GameEvent], sink: &mut dyn AudioSink) {
    for event in events {
        if let GameEvent::Sound { cue, variant } = *event {
            sink.play(cue, variant);
        }
    }
}
