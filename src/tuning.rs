//! Data-driven physics and geometry tuning
//!
//! Every field defaults to the matching value in [`crate::consts`], so a
//! tuning file only needs to list the values it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Body ===
    pub body_x: f32,
    pub body_radius: f32,

    // === Physics (per tick, not time-scaled) ===
    pub gravity: f32,
    pub lift: f32,
    pub fall_damp: f32,
    pub max_vertical_speed: f32,

    // === Obstacle generation ===
    pub min_gap: f32,
    pub spawn_margin: f32,
    pub amp_min: f32,
    pub amp_span: f32,
    pub freq_min: f32,
    pub freq_span: f32,
    pub drift_span: f32,
    pub spawn_offset_x: f32,

    // === Obstacle animation and geometry ===
    pub drift_margin: f32,
    pub obstacle_width: f32,
    pub score_edge: f32,
    pub cull_x: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            body_x: BODY_X,
            body_radius: BODY_RADIUS,

            gravity: GRAVITY,
            lift: LIFT,
            fall_damp: FALL_DAMP,
            max_vertical_speed: MAX_VERTICAL_SPEED,

            min_gap: MIN_GAP,
            spawn_margin: SPAWN_MARGIN,
            amp_min: AMP_MIN,
            amp_span: AMP_SPAN,
            freq_min: FREQ_MIN,
            freq_span: FREQ_SPAN,
            drift_span: DRIFT_SPAN,
            spawn_offset_x: SPAWN_OFFSET_X,

            drift_margin: DRIFT_MARGIN,
            obstacle_width: OBSTACLE_WIDTH,
            score_edge: SCORE_EDGE,
            cull_x: CULL_X,
        }
    }
}

impl Tuning {
    /// Parse a tuning override from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Parse a tuning override, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// True when every constant is finite, sizes and limits are positive,
    /// and margins, amplitudes and frequencies are non-negative
    pub fn is_valid(&self) -> bool {
        let all_finite = [
            self.body_x,
            self.body_radius,
            self.gravity,
            self.lift,
            self.fall_damp,
            self.max_vertical_speed,
            self.min_gap,
            self.spawn_margin,
            self.amp_min,
            self.amp_span,
            self.freq_min,
            self.freq_span,
            self.drift_span,
            self.spawn_offset_x,
            self.drift_margin,
            self.obstacle_width,
            self.score_edge,
            self.cull_x,
        ]
        .iter()
        .all(|v| v.is_finite());

        all_finite
            && self.body_radius > 0.0
            && self.max_vertical_speed > 0.0
            && self.min_gap > 0.0
            && self.obstacle_width > 0.0
            && self.spawn_margin >= 0.0
            && self.drift_margin >= 0.0
            && self.amp_min >= 0.0
            && self.amp_span >= 0.0
            && self.freq_min >= 0.0
            && self.freq_span >= 0.0
            && (0.0..=1.0).contains(&self.fall_damp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.lift, tuning.gravity);
        assert_eq!(tuning.max_vertical_speed, 6.0);
        assert_eq!(tuning.cull_x, -60.0);
        assert!(tuning.is_valid());
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.12, "min_gap": 120.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.12);
        assert_eq!(tuning.min_gap, 120.0);
        // Untouched fields keep their defaults
        assert_eq!(tuning.lift, LIFT);
        assert_eq!(tuning.obstacle_width, OBSTACLE_WIDTH);
    }

    #[test]
    fn test_malformed_falls_back() {
        let tuning = Tuning::from_json_or_default("{ not json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_invalid_values_detected() {
        let tuning = Tuning {
            body_radius: -1.0,
            ..Default::default()
        };
        assert!(!tuning.is_valid());

        let tuning = Tuning {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(!tuning.is_valid());
    }

    #[test]
    fn test_negative_margins_and_amplitudes_rejected() {
        for tuning in [
            Tuning::from_json(r#"{ "amp_min": -4.0 }"#).unwrap(),
            Tuning::from_json(r#"{ "amp_span": -1.0 }"#).unwrap(),
            Tuning::from_json(r#"{ "freq_min": -0.2 }"#).unwrap(),
            Tuning::from_json(r#"{ "spawn_margin": -30.0 }"#).unwrap(),
            Tuning::from_json(r#"{ "drift_margin": -8.0 }"#).unwrap(),
        ] {
            assert!(!tuning.is_valid(), "accepted {tuning:?}");
        }

        // Zero keeps obstacles still but is allowed
        let still = Tuning {
            amp_min: 0.0,
            amp_span: 0.0,
            ..Default::default()
        };
        assert!(still.is_valid());
    }
}
