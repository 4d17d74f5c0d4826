//! Turns a raw detection batch into typed landmark features.

use tracing::{debug, trace};

use crate::domain::{DetectionBatch, Feature, FeatureSet, LandmarkClass};
use crate::error::{ClassifyError, Result};

/// Validates the batch and keeps boxes at or above `min_confidence`.
///
/// Eyes accumulate in first-seen order; for mouth and nose the last
/// retained box wins. Unknown class ids are ignored.
///
/// # Errors
///
/// - [`ClassifyError::NoDetections`] when the batch has no boxes.
/// - [`ClassifyError::MissingAttributes`] when confidences or class ids are absent.
/// - [`ClassifyError::Unexpected`] when the parallel sequences differ in length.
pub fn extract_features(batch: &DetectionBatch, min_confidence: f64) -> Result<FeatureSet> {
    let boxes = match batch.xyxy.as_deref() {
        Some(boxes) if !boxes.is_empty() => boxes,
        _ => return Err(ClassifyError::NoDetections),
    };
    let confidences = batch
        .confidence
        .as_deref()
        .ok_or(ClassifyError::MissingAttributes {
            attribute: "confidence",
        })?;
    let class_ids = batch
        .class_id
        .as_deref()
        .ok_or(ClassifyError::MissingAttributes {
            attribute: "class_id",
        })?;

    if confidences.len() != boxes.len() || class_ids.len() != boxes.len() {
        return Err(ClassifyError::unexpected(format!(
            "mismatched detection lengths: {} boxes, {} confidences, {} class ids",
            boxes.len(),
            confidences.len(),
            class_ids.len()
        )));
    }

    let mut features = FeatureSet::default();

    for ((&bbox, &confidence), &class_id) in boxes.iter().zip(confidences).zip(class_ids) {
        if confidence.is_nan() || confidence < min_confidence {
            trace!("Dropping class {class_id} box at confidence {confidence:.2}");
            continue;
        }

        let feature = Feature::from_xyxy(bbox, confidence);
        match LandmarkClass::from_id(class_id) {
            Some(LandmarkClass::Eye) => features.eyes.push(feature),
            Some(LandmarkClass::Mouth) => features.mouth = Some(feature),
            Some(LandmarkClass::Nose) => features.nose = Some(feature),
            None => trace!("Ignoring unknown class id {class_id}"),
        }
    }

    debug!(
        "Retained {} eyes, mouth={}, nose={} from {} boxes",
        features.eyes.len(),
        features.mouth.is_some(),
        features.nose.is_some(),
        boxes.len()
    );

    Ok(features)
}
