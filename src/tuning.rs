//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a host can load overrides
//! from JSON. Defaults match [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(serde_json::Error),
    /// A field was NaN or infinite
    NonFinite(&'static str),
    /// A field that must be strictly positive was not
    NotPositive { field: &'static str, value: f32 },
    /// Jump must point upward (negative)
    JumpNotUpward(f32),
    /// Playfield cannot fit a gap plus both minimum segments
    PlayfieldTooSmall { height: f32, required: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "Invalid tuning JSON: {}", e),
            TuningError::NonFinite(field) => write!(f, "Tuning field `{}` is not finite", field),
            TuningError::NotPositive { field, value } => {
                write!(f, "Tuning field `{}` must be positive (got {})", field, value)
            }
            TuningError::JumpNotUpward(jump) => {
                write!(f, "Jump impulse must be negative (got {})", jump)
            }
            TuningError::PlayfieldTooSmall { height, required } => write!(
                f,
                "Playfield height {} is below the minimum viable height {}",
                height, required
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump: f32,
    /// Per-tick hook movement (not scaled by frame time)
    pub speed: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub min_pipe_height: f32,
    /// Wall-clock spawn cadence in milliseconds
    pub spawn_interval_ms: f32,
    pub bird_x: f32,
    pub bird_radius: f32,
    pub bird_start_y: f32,
    pub playfield_width: f32,
    pub playfield_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump: JUMP,
            speed: SPEED,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            min_pipe_height: MIN_PIPE_HEIGHT,
            spawn_interval_ms: PIPE_SPAWN_INTERVAL_MS,
            bird_x: BIRD_X,
            bird_radius: BIRD_RADIUS,
            bird_start_y: BIRD_START_Y,
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Smallest playfield height that still leaves a traversable gap
    pub fn min_viable_height(&self) -> f32 {
        self.pipe_gap + 2.0 * self.min_pipe_height
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("gravity", self.gravity),
            ("jump", self.jump),
            ("speed", self.speed),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("min_pipe_height", self.min_pipe_height),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("bird_x", self.bird_x),
            ("bird_radius", self.bird_radius),
            ("bird_start_y", self.bird_start_y),
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::NonFinite(field));
            }
        }

        let positive = [
            ("gravity", self.gravity),
            ("speed", self.speed),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("bird_radius", self.bird_radius),
            ("playfield_width", self.playfield_width),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if self.jump >= 0.0 {
            return Err(TuningError::JumpNotUpward(self.jump));
        }

        let required = self.min_viable_height();
        if self.playfield_height < required {
            return Err(TuningError::PlayfieldTooSmall {
                height: self.playfield_height,
                required,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.gravity, 0.6);
        assert_eq!(tuning.jump, -8.0);
        assert_eq!(tuning.min_viable_height(), 260.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "speed": 5.0, "playfield_height": 720.0 }"#).unwrap();
        assert_eq!(tuning.speed, 5.0);
        assert_eq!(tuning.playfield_height, 720.0);
        assert_eq!(tuning.pipe_gap, PIPE_GAP);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let err = Tuning::from_json(r#"{ "jump": 8.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::JumpNotUpward(_)));
    }

    #[test]
    fn test_rejects_tiny_playfield() {
        let err = Tuning::from_json(r#"{ "playfield_height": 200.0 }"#).unwrap_err();
        match err {
            TuningError::PlayfieldTooSmall { height, required } => {
                assert_eq!(height, 200.0);
                assert_eq!(required, 260.0);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rejects_zero_speed() {
        let tuning = Tuning {
            speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotPositive { field: "speed", .. })
        ));
    }
}
