//! Head-pose angle strategy.
//!
//! Scores yaw/pitch against per-direction thresholds. Only the first
//! exceeded threshold in the order right, left, up, down is ever scored;
//! the other three scores stay zero.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Direction;

/// Pitch correction for people habitually looking down at their phones.
pub const DEFAULT_PITCH_OFFSET: f64 = 10.0;

/// Per-direction thresholds in degrees, supplied with each call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleThresholds {
    pub right: f64,
    pub left: f64,
    pub up: f64,
    pub down: f64,
}

impl AngleThresholds {
    /// Same threshold for all four directions.
    #[must_use]
    pub const fn uniform(degrees: f64) -> Self {
        Self {
            right: degrees,
            left: degrees,
            up: degrees,
            down: degrees,
        }
    }
}

/// Excess scores for the four candidate directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleScores {
    pub right: f64,
    pub left: f64,
    pub up: f64,
    pub down: f64,
}

impl AngleScores {
    /// Picks the strictly highest score, `Center` on ties or all zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn direction(&self) -> Direction {
        let Self {
            right,
            left,
            up,
            down,
        } = *self;

        if right == left && left == up && up == down {
            return Direction::Center;
        }

        if right > left && right > up && right > down {
            Direction::LookingRight
        } else if left > right && left > up && left > down {
            Direction::LookingLeft
        } else if up > right && up > left && up > down {
            Direction::LookingUp
        } else if down > right && down > left && down > up {
            Direction::LookingDown
        } else {
            Direction::Center
        }
    }
}

/// Head-pose gaze classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleClassifier {
    pitch_offset: f64,
}

impl Default for AngleClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PITCH_OFFSET)
    }
}

impl AngleClassifier {
    /// Creates a classifier adding `pitch_offset` degrees to every pitch.
    #[must_use]
    pub const fn new(pitch_offset: f64) -> Self {
        Self { pitch_offset }
    }

    /// Returns the configured pitch offset.
    #[must_use]
    pub const fn pitch_offset(&self) -> f64 {
        self.pitch_offset
    }

    /// Scores yaw and raw pitch against the thresholds.
    #[must_use]
    pub fn score(&self, yaw: f64, pitch: f64, thresholds: &AngleThresholds) -> AngleScores {
        let pitch = pitch + self.pitch_offset;
        let mut scores = AngleScores::default();

        if yaw > 0.0 && yaw > thresholds.right {
            scores.right = yaw - thresholds.right;
        } else if yaw < 0.0 && yaw < -thresholds.left {
            scores.left = (thresholds.left + yaw).abs();
        } else if pitch > 0.0 && pitch > thresholds.up {
            scores.up = pitch - thresholds.up;
        } else if pitch < 0.0 && pitch < -thresholds.down {
            scores.down = (thresholds.down - pitch).abs();
        }

        scores
    }

    /// Classifies yaw and raw pitch (degrees).
    #[must_use]
    pub fn classify(&self, yaw: f64, pitch: f64, thresholds: &AngleThresholds) -> Direction {
        let scores = self.score(yaw, pitch, thresholds);
        let direction = scores.direction();
        debug!("yaw={yaw:.1} pitch={pitch:.1} scores={scores:?} -> {direction}");
        direction
    }
}
