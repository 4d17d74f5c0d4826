//! Typed facial features derived from retained detection boxes.

use serde::{Deserialize, Serialize};

/// A single landmark reduced to its center and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Horizontal center in pixels.
    pub x: f64,
    /// Vertical center in pixels.
    pub y: f64,
    /// Box width in pixels.
    pub width: f64,
    /// Box height in pixels.
    pub height: f64,
    /// Detector confidence.
    pub confidence: f64,
}

impl Feature {
    /// Builds a feature from an `[x1, y1, x2, y2]` box.
    #[must_use]
    pub fn from_xyxy(bbox: [f64; 4], confidence: f64) -> Self {
        let [x1, y1, x2, y2] = bbox;
        Self {
            x: (x1 + x2) / 2.0,
            y: (y1 + y2) / 2.0,
            width: x2 - x1,
            height: y2 - y1,
            confidence,
        }
    }
}

/// Landmarks retained from one detection batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    /// Eyes in first-seen order.
    pub eyes: Vec<Feature>,
    /// Last retained mouth, if any.
    pub mouth: Option<Feature>,
    /// Last retained nose, if any.
    pub nose: Option<Feature>,
}

impl FeatureSet {
    /// Returns true when neither mouth nor nose was retained.
    #[must_use]
    pub const fn lacks_reference(&self) -> bool {
        self.mouth.is_none() && self.nose.is_none()
    }

    /// Horizontal reference for single-eye resolution, mouth preferred.
    #[must_use]
    pub fn reference_x(&self) -> Option<f64> {
        self.mouth.or(self.nose).map(|f| f.x)
    }
}

/// The two eyes used as the face's reference frame, ordered by x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePair {
    /// Eye with the smaller x (viewer's left).
    pub left: Feature,
    /// Eye with the larger x (viewer's right).
    pub right: Feature,
}

impl EyePair {
    /// Mean horizontal position of the two eyes.
    #[must_use]
    pub fn midpoint_x(&self) -> f64 {
        (self.left.x + self.right.x) / 2.0
    }

    /// Mean vertical position of the two eyes.
    #[must_use]
    pub fn midpoint_y(&self) -> f64 {
        (self.left.y + self.right.y) / 2.0
    }

    /// Horizontal distance between the eye centers.
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.right.x - self.left.x).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_feature_geometry() {
        let f = Feature::from_xyxy([10.0, 20.0, 30.0, 60.0], 0.8);
        assert!(approx(f.x, 20.0));
        assert!(approx(f.y, 40.0));
        assert!(approx(f.width, 20.0));
        assert!(approx(f.height, 40.0));
        assert!(approx(f.confidence, 0.8));
    }

    #[test]
    fn test_reference_prefers_mouth() {
        let set = FeatureSet {
            eyes: vec![],
            mouth: Some(Feature::from_xyxy([100.0, 0.0, 120.0, 10.0], 0.9)),
            nose: Some(Feature::from_xyxy([0.0, 0.0, 20.0, 10.0], 0.9)),
        };
        assert_eq!(set.reference_x(), Some(110.0));
        assert!(!set.lacks_reference());
    }

    #[test]
    fn test_reference_falls_back_to_nose() {
        let set = FeatureSet {
            nose: Some(Feature::from_xyxy([0.0, 0.0, 20.0, 10.0], 0.9)),
            ..FeatureSet::default()
        };
        assert_eq!(set.reference_x(), Some(10.0));
    }

    #[test]
    fn test_eye_pair_metrics() {
        let pair = EyePair {
            left: Feature::from_xyxy([0.0, 0.0, 20.0, 20.0], 0.9),
            right: Feature::from_xyxy([100.0, 10.0, 120.0, 30.0], 0.9),
        };
        assert!(approx(pair.midpoint_y(), 15.0));
        assert!(approx(pair.distance(), 100.0));
    }
}
