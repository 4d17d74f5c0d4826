//! Head-pose strategy.

mod angle;

pub use angle::{AngleClassifier, AngleScores, AngleThresholds, DEFAULT_PITCH_OFFSET};
