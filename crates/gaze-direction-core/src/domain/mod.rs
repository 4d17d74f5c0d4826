//! Core domain types for gaze direction classification.

mod detection;
mod diagnostics;
mod direction;
mod feature;
mod record;
mod result;

pub use detection::{DetectionBatch, DetectionMetadata, LandmarkClass, DEFAULT_IMAGE_WIDTH};
pub use diagnostics::{Diagnostics, Rule};
pub use direction::Direction;
pub use feature::{EyePair, Feature, FeatureSet};
pub use record::{ClassifiedRecord, SourcedRequest};
pub use result::{Action, BlockResult, Verdict};
