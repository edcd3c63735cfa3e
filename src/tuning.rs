//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from a JSON file. Missing fields
//! fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Frame duration the scroll speed is normalized against (seconds)
    pub expected_frame_time: f64,
    pub starting_scroll_speed: f32,
    pub scroll_speed_increment: f32,

    /// Gravity in meters/s² (negative = down)
    pub gravity: f32,
    pub jump_impulse: f32,
    pub skater_mass: f32,
    pub grounded_velocity_threshold: f32,
    pub tip_over_degrees: f32,
    pub reset_offset_y: f32,

    pub gap_roll_range: u32,
    pub gap_roll_threshold: u32,
    pub gap_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            expected_frame_time: EXPECTED_FRAME_TIME,
            starting_scroll_speed: STARTING_SCROLL_SPEED,
            scroll_speed_increment: SCROLL_SPEED_INCREMENT,

            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            skater_mass: SKATER_MASS,
            grounded_velocity_threshold: GROUNDED_VELOCITY_THRESHOLD,
            tip_over_degrees: TIP_OVER_DEGREES,
            reset_offset_y: SKATER_RESET_OFFSET_Y,

            gap_roll_range: GAP_ROLL_RANGE,
            gap_roll_threshold: GAP_ROLL_THRESHOLD,
            gap_scale: GAP_SCALE,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Tip-over limit in radians
    pub fn tip_over_radians(&self) -> f32 {
        self.tip_over_degrees.to_radians()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.expected_frame_time.is_nan() || self.expected_frame_time <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "expected_frame_time must be positive, got {}",
                self.expected_frame_time
            )));
        }
        if self.gap_roll_range == 0 {
            return Err(TuningError::Invalid("gap_roll_range must be non-zero".into()));
        }
        if self.gap_roll_threshold > self.gap_roll_range {
            return Err(TuningError::Invalid(format!(
                "gap_roll_threshold {} exceeds gap_roll_range {}",
                self.gap_roll_threshold, self.gap_roll_range
            )));
        }
        if self.skater_mass <= 0.0 {
            return Err(TuningError::Invalid("skater_mass must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.starting_scroll_speed, 5.0);
        assert_eq!(tuning.scroll_speed_increment, 0.01);
        assert_eq!(tuning.gravity, -6.0);
        assert_eq!(tuning.jump_impulse, 260.0);
        assert_eq!(tuning.grounded_velocity_threshold, 100.0);
        assert_eq!(tuning.tip_over_degrees, 85.0);
        assert_eq!(tuning.gap_roll_range, 99);
        assert_eq!(tuning.gap_roll_threshold, 5);
        assert_eq!(tuning.gap_scale, 20.0);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_scroll_speed": 7.5 }"#).unwrap();
        assert_eq!(tuning.starting_scroll_speed, 7.5);
        assert_eq!(tuning.jump_impulse, JUMP_IMPULSE);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = Tuning::from_json(r#"{ "gap_roll_threshold": 120 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_zero_values_rejected() {
        let zero_range = Tuning {
            gap_roll_range: 0,
            gap_roll_threshold: 0,
            ..Tuning::default()
        };
        assert!(matches!(zero_range.validate(), Err(TuningError::Invalid(_))));

        let zero_frame = Tuning {
            expected_frame_time: 0.0,
            ..Tuning::default()
        };
        assert!(matches!(zero_frame.validate(), Err(TuningError::Invalid(_))));
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/nonexistent/skateboarder-tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
