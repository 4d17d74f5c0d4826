//! Gaze Direction Core - Domain logic and classifiers
//!
//! This crate contains the domain types, the two gaze classifiers
//! (landmark-ratio and head-pose angle), the runner-facing invocation
//! wrapper, and the ports adapters implement.

pub mod domain;
pub mod error;
pub mod invocation;
pub mod landmarks;
pub mod pose;
pub mod ports;

pub use domain::{
    Action, BlockResult, ClassifiedRecord, DetectionBatch, DetectionMetadata, Diagnostics,
    Direction, Rule, SourcedRequest, Verdict,
};
pub use error::ClassifyError;
pub use invocation::{AngleInput, AngleRequest, Classifier, LandmarkRequest, Request};
pub use landmarks::{classify_landmarks, LandmarkClassifier, LandmarkThresholds, VerticalBands};
pub use pose::{AngleClassifier, AngleScores, AngleThresholds, DEFAULT_PITCH_OFFSET};
pub use ports::{InputError, ProgressEvent, ProgressSink, RequestSource, ResultOutput};
