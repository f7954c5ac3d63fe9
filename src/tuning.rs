//! Data-driven game balance
//!
//! Defaults reproduce the classic arcade feel; a driver may deserialize
//! overrides from JSON. Arena geometry is fixed and lives in
//! [`crate::consts`], not here.

use serde::{Deserialize, Serialize};

/// Balance values read by the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Sub-steps a freshly served ball advances per frame
    pub ball_start_speed: u32,
    /// Frames a bat glows after deflecting the ball
    pub hit_glow_frames: i32,
    /// Frames between conceding a point and the next serve
    pub concede_frames: i32,
    /// Frames an impact marker stays alive
    pub impact_frames: u32,
    /// Largest aiming error (either way) rolled for the AI on each hit
    pub ai_offset_range: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_start_speed: 5,
            hit_glow_frames: 10,
            concede_frames: 20,
            impact_frames: 10,
            ai_offset_range: 10,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let tuning = Tuning::default();
        assert_eq!(tuning.ball_start_speed, 5);
        assert_eq!(tuning.hit_glow_frames, 10);
        assert_eq!(tuning.concede_frames, 20);
        assert_eq!(tuning.impact_frames, 10);
        assert_eq!(tuning.ai_offset_range, 10);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            ball_start_speed: 7,
            ..Tuning::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"concede_frames": 30}"#).unwrap();
        assert_eq!(tuning.concede_frames, 30);
        assert_eq!(tuning.ball_start_speed, 5);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("not json").is_err());
    }
}
