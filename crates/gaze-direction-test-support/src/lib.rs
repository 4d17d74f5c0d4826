//! Test support utilities for gaze-direction.
//!
//! Provides mocks, detection batch builders, and request helpers for
//! testing the classification pipeline.
//!
//! # Example
//!
//! ```
//! use gaze_direction_core::{Direction, LandmarkClassifier};
//! use gaze_direction_test_support::{DetectionBatchBuilder, MockRequestSource};
//!
//! // A face whose right eye appears much wider than its left
//! let batch = DetectionBatchBuilder::turned_right();
//! let verdict = LandmarkClassifier::default().classify(&batch).unwrap();
//! assert_eq!(verdict.direction, Direction::LookingRight);
//!
//! // Feed requests through the port without touching the filesystem
//! let source = MockRequestSource::from_batches(vec![batch]);
//! ```

mod builders;
mod mocks;

pub use builders::{angle_request, landmark_request, to_json_line, DetectionBatchBuilder};
pub use mocks::{MockProgressSink, MockRequestSource, MockResultOutput};
