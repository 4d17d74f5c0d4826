//! Tunable thresholds for the landmark-ratio strategy.

use serde::{Deserialize, Serialize};

use crate::domain::{Direction, DEFAULT_IMAGE_WIDTH};

/// Vertical decision bands for one feature combination.
///
/// A ratio below `up_below` is up, above `down_above` is down, strictly
/// inside `(center_low, center_high)` is center. Anything else matches no
/// band and falls through to the chain's default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalBands {
    pub up_below: f64,
    pub center_low: f64,
    pub center_high: f64,
    pub down_above: f64,
}

impl VerticalBands {
    /// Classifies a ratio, `None` when it lands in a gap.
    #[must_use]
    pub fn classify(&self, ratio: f64) -> Option<Direction> {
        if ratio < self.up_below {
            Some(Direction::LookingUp)
        } else if ratio > self.down_above {
            Some(Direction::LookingDown)
        } else if ratio > self.center_low && ratio < self.center_high {
            Some(Direction::Center)
        } else {
            None
        }
    }

    /// Checks `up_below <= center_low <= center_high <= down_above`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.up_below <= self.center_low
            && self.center_low <= self.center_high
            && self.center_high <= self.down_above
    }
}

/// All knobs of the landmark classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkThresholds {
    /// Boxes below this confidence are discarded.
    pub min_confidence: f64,
    /// Eye width ratio beyond which the head counts as turned.
    pub eye_ratio_threshold: f64,
    /// Image width used when the batch has no metadata.
    pub default_image_width: f64,
    /// Bands for `eye_to_nose / nose_to_mouth`.
    pub nose_mouth: VerticalBands,
    /// Bands for the nose offset in eye-distance units.
    pub nose_only: VerticalBands,
    /// Bands for the mouth offset in eye-distance units.
    pub mouth_only: VerticalBands,
}

impl Default for LandmarkThresholds {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            eye_ratio_threshold: 1.3,
            default_image_width: DEFAULT_IMAGE_WIDTH,
            nose_mouth: VerticalBands {
                up_below: 0.25,
                center_low: 0.3,
                center_high: 0.4,
                down_above: 0.4,
            },
            nose_only: VerticalBands {
                up_below: 0.25,
                center_low: 0.3,
                center_high: 0.4,
                down_above: 0.45,
            },
            mouth_only: VerticalBands {
                up_below: 0.7,
                center_low: 0.7,
                center_high: 0.9,
                down_above: 1.0,
            },
        }
    }
}

impl LandmarkThresholds {
    /// Validates ranges, naming the first offending field.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "min_confidence must be 0.0-1.0, got {}",
                self.min_confidence
            ));
        }
        if self.eye_ratio_threshold.is_nan() || self.eye_ratio_threshold <= 1.0 {
            return Err(format!(
                "eye_ratio_threshold must be greater than 1.0, got {}",
                self.eye_ratio_threshold
            ));
        }
        if self.default_image_width.is_nan() || self.default_image_width <= 0.0 {
            return Err(format!(
                "default_image_width must be positive, got {}",
                self.default_image_width
            ));
        }
        for (name, bands) in [
            ("nose_mouth", &self.nose_mouth),
            ("nose_only", &self.nose_only),
            ("mouth_only", &self.mouth_only),
        ] {
            if !bands.is_ordered() {
                return Err(format!(
                    "{name} bands must satisfy up_below <= center_low <= center_high <= down_above"
                ));
            }
        }
        Ok(())
    }
}
