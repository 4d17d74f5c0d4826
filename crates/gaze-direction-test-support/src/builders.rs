//! Detection batch builders and request helpers for testing.

use gaze_direction_core::domain::{DetectionBatch, DetectionMetadata, LandmarkClass};
use gaze_direction_core::{AngleInput, AngleRequest, LandmarkRequest, Request};

/// Confidence given to boxes added without an explicit one.
const DEFAULT_CONFIDENCE: f64 = 0.9;

/// Builder for detection batches.
///
/// Boxes are described by center, width and height; the builder keeps the
/// three parallel sequences aligned.
#[derive(Debug, Clone, Default)]
pub struct DetectionBatchBuilder {
    xyxy: Vec<[f64; 4]>,
    confidence: Vec<f64>,
    class_id: Vec<i64>,
    width: Option<f64>,
    drop_confidence: bool,
    drop_class_id: bool,
}

impl DetectionBatchBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a raw box with an explicit class id and confidence.
    #[must_use]
    pub fn detection(mut self, class_id: i64, xyxy: [f64; 4], confidence: f64) -> Self {
        self.xyxy.push(xyxy);
        self.confidence.push(confidence);
        self.class_id.push(class_id);
        self
    }

    /// Adds a landmark box centered at `(x, y)`.
    #[must_use]
    pub fn landmark(
        self,
        class: LandmarkClass,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        confidence: f64,
    ) -> Self {
        let id = match class {
            LandmarkClass::Eye => 0,
            LandmarkClass::Mouth => 1,
            LandmarkClass::Nose => 2,
        };
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        self.detection(
            id,
            [x - half_w, y - half_h, x + half_w, y + half_h],
            confidence,
        )
    }

    /// Adds an eye of the given width.
    #[must_use]
    pub fn eye(self, x: f64, y: f64, width: f64) -> Self {
        self.landmark(LandmarkClass::Eye, x, y, width, 10.0, DEFAULT_CONFIDENCE)
    }

    /// Adds a mouth.
    #[must_use]
    pub fn mouth(self, x: f64, y: f64) -> Self {
        self.landmark(LandmarkClass::Mouth, x, y, 40.0, 15.0, DEFAULT_CONFIDENCE)
    }

    /// Adds a nose.
    #[must_use]
    pub fn nose(self, x: f64, y: f64) -> Self {
        self.landmark(LandmarkClass::Nose, x, y, 10.0, 10.0, DEFAULT_CONFIDENCE)
    }

    /// Sets `metadata.width`.
    #[must_use]
    pub fn image_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Omits the confidence sequence from the built batch.
    #[must_use]
    pub fn without_confidence(mut self) -> Self {
        self.drop_confidence = true;
        self
    }

    /// Omits the class id sequence from the built batch.
    #[must_use]
    pub fn without_class_ids(mut self) -> Self {
        self.drop_class_id = true;
        self
    }

    /// Builds the batch.
    #[must_use]
    pub fn build(self) -> DetectionBatch {
        DetectionBatch {
            xyxy: Some(self.xyxy),
            confidence: (!self.drop_confidence).then_some(self.confidence),
            class_id: (!self.drop_class_id).then_some(self.class_id),
            metadata: DetectionMetadata { width: self.width },
        }
    }

    // === Face Presets ===

    /// Two level eyes of equal width, centered nose and mouth.
    #[must_use]
    pub fn frontal() -> DetectionBatch {
        Self::new()
            .eye(100.0, 100.0, 20.0)
            .eye(200.0, 100.0, 20.0)
            .nose(150.0, 135.0)
            .mouth(150.0, 235.0)
            .build()
    }

    /// Right eye 1.5x wider than the left.
    #[must_use]
    pub fn turned_right() -> DetectionBatch {
        Self::new()
            .eye(100.0, 100.0, 20.0)
            .eye(200.0, 100.0, 30.0)
            .nose(150.0, 135.0)
            .mouth(150.0, 235.0)
            .build()
    }

    /// Left eye 1.5x wider than the right.
    #[must_use]
    pub fn turned_left() -> DetectionBatch {
        Self::new()
            .eye(100.0, 100.0, 30.0)
            .eye(200.0, 100.0, 20.0)
            .nose(150.0, 135.0)
            .mouth(150.0, 235.0)
            .build()
    }

    /// Nose close to the eye line relative to the mouth.
    #[must_use]
    pub fn tilted_up() -> DetectionBatch {
        Self::new()
            .eye(100.0, 100.0, 20.0)
            .eye(200.0, 100.0, 20.0)
            .nose(150.0, 110.0)
            .mouth(150.0, 160.0)
            .build()
    }

    /// Nose as far from the eyes as from the mouth.
    #[must_use]
    pub fn tilted_down() -> DetectionBatch {
        Self::new()
            .eye(100.0, 100.0, 20.0)
            .eye(200.0, 100.0, 20.0)
            .nose(150.0, 150.0)
            .mouth(150.0, 200.0)
            .build()
    }

    /// One eye with the mouth to its right.
    #[must_use]
    pub fn single_eye() -> DetectionBatch {
        Self::new().eye(100.0, 100.0, 20.0).mouth(150.0, 200.0).build()
    }
}

/// Wraps a batch as a landmark request.
#[must_use]
pub fn landmark_request(detections: DetectionBatch) -> Request {
    Request::Landmarks(LandmarkRequest { detections })
}

/// Builds an angle request with one threshold for all directions.
#[must_use]
pub fn angle_request(yaw: f64, pitch: f64, threshold: f64) -> Request {
    Request::Angles(AngleRequest {
        yaw_degrees: Some(AngleInput::Sequence(vec![yaw])),
        pitch_degrees: Some(AngleInput::Sequence(vec![pitch])),
        right_threshold: threshold,
        left_threshold: threshold,
        up_threshold: threshold,
        down_threshold: threshold,
    })
}

/// Serializes a request as one JSON Lines record.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_line(request: &Request) -> anyhow::Result<String> {
    Ok(serde_json::to_string(request)? + "\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gaze_direction_core::{Classifier, Direction, LandmarkClassifier};

    fn classify(batch: &DetectionBatch) -> Direction {
        LandmarkClassifier::default()
            .classify(batch)
            .unwrap()
            .direction
    }

    #[test]
    fn test_presets_classify_as_named() {
        assert_eq!(classify(&DetectionBatchBuilder::frontal()), Direction::Center);
        assert_eq!(
            classify(&DetectionBatchBuilder::turned_right()),
            Direction::LookingRight
        );
        assert_eq!(
            classify(&DetectionBatchBuilder::turned_left()),
            Direction::LookingLeft
        );
        assert_eq!(
            classify(&DetectionBatchBuilder::tilted_up()),
            Direction::LookingUp
        );
        assert_eq!(
            classify(&DetectionBatchBuilder::tilted_down()),
            Direction::LookingDown
        );
        assert_eq!(
            classify(&DetectionBatchBuilder::single_eye()),
            Direction::LookingRight
        );
    }

    #[test]
    fn test_builder_keeps_sequences_aligned() {
        let batch = DetectionBatchBuilder::new()
            .eye(10.0, 10.0, 4.0)
            .detection(7, [0.0, 0.0, 1.0, 1.0], 0.5)
            .image_width(320.0)
            .build();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.confidence.as_ref().unwrap().len(), 2);
        assert_eq!(batch.class_id.as_deref(), Some(&[0, 7][..]));
        assert_eq!(batch.xyxy.as_ref().unwrap()[0], [8.0, 5.0, 12.0, 15.0]);
        assert_eq!(batch.metadata.width, Some(320.0));
    }

    #[test]
    fn test_dropped_attributes() {
        let batch = DetectionBatchBuilder::new()
            .eye(10.0, 10.0, 4.0)
            .without_confidence()
            .build();
        assert!(batch.confidence.is_none());
        assert!(batch.class_id.is_some());

        let result = LandmarkClassifier::default().run(&batch);
        assert_eq!(result.action.to_string(), "unknown-2");
    }

    #[test]
    fn test_angle_request_round_trips_through_json_line() {
        let request = angle_request(20.0, -10.0, 5.0);
        let line = to_json_line(&request).unwrap();
        assert!(line.ends_with('\n'));
        assert!(line.contains(r#""strategy":"angles""#));

        let parsed: Request = serde_json::from_str(line.trim_end()).unwrap();
        let result = Classifier::default().run(&parsed);
        assert_eq!(result.action.direction(), Direction::LookingRight);
    }
}
