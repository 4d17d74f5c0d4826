//! Landmark-ratio strategy.
//!
//! Classifies gaze from sparse eye/mouth/nose boxes:
//! - confidence filtering and geometry ([`extract_features`])
//! - eye pairing with single-eye fallbacks ([`resolve_eyes`])
//! - a priority-ordered ratio chain ([`classify_pair`])

mod classifier;
mod extractor;
mod resolver;
mod thresholds;

pub use classifier::classify_pair;
pub use extractor::extract_features;
pub use resolver::{resolve_eyes, EyeResolution};
pub use thresholds::{LandmarkThresholds, VerticalBands};

use tracing::debug;

use crate::domain::{Action, BlockResult, DetectionBatch, Diagnostics, Direction, Verdict};
use crate::error::Result;

/// Landmark-ratio gaze classifier.
#[derive(Debug, Clone, Default)]
pub struct LandmarkClassifier {
    thresholds: LandmarkThresholds,
}

impl LandmarkClassifier {
    /// Creates a classifier with the given thresholds.
    #[must_use]
    pub const fn new(thresholds: LandmarkThresholds) -> Self {
        Self { thresholds }
    }

    /// Returns the active thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> &LandmarkThresholds {
        &self.thresholds
    }

    /// Classifies one detection batch.
    ///
    /// # Errors
    ///
    /// Returns the [`crate::ClassifyError`] that made the batch unclassifiable.
    pub fn classify(&self, batch: &DetectionBatch) -> Result<Verdict> {
        let (direction, diagnostics) = self.evaluate(batch);
        direction.map(|direction| Verdict {
            direction,
            diagnostics,
        })
    }

    /// Classifies one batch into the runner's `{action, debug_info}` shape.
    ///
    /// Never fails: errors become `unknown-<n>` actions with the failure
    /// recorded in the diagnostics.
    #[must_use]
    pub fn run(&self, batch: &DetectionBatch) -> BlockResult {
        let (direction, mut diagnostics) = self.evaluate(batch);
        let action = match direction {
            Ok(direction) => Action::Direction(direction),
            Err(err) => {
                debug!("Landmark classification failed: {err}");
                diagnostics.error = Some(err.describe());
                Action::Unknown(err)
            }
        };
        BlockResult {
            action,
            debug_info: Some(diagnostics),
        }
    }

    /// Runs the full pipeline, keeping diagnostics on the error path too.
    fn evaluate(&self, batch: &DetectionBatch) -> (Result<Direction>, Diagnostics) {
        let features = match extract_features(batch, self.thresholds.min_confidence) {
            Ok(features) => features,
            Err(err) => return (Err(err), Diagnostics::default()),
        };

        let mut diag = Diagnostics::with_presence(
            features.eyes.len(),
            features.nose.is_some(),
            features.mouth.is_some(),
        );

        let image_width = batch.image_width_or(self.thresholds.default_image_width);
        let direction = match resolve_eyes(&features, image_width, &mut diag) {
            EyeResolution::Settled(direction) => Ok(direction),
            EyeResolution::Pair(pair) => classify_pair(
                &pair,
                features.mouth,
                features.nose,
                &self.thresholds,
                &mut diag,
            ),
        };

        (direction, diag)
    }
}

/// Shorthand for a one-off classification with default thresholds.
///
/// # Errors
///
/// See [`LandmarkClassifier::classify`].
pub fn classify_landmarks(batch: &DetectionBatch) -> Result<Verdict> {
    LandmarkClassifier::default().classify(batch)
}
