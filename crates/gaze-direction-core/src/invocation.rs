//! Runner-facing invocation wrapper.
//!
//! Unpacks requests in the shape the workflow runner sends them and packs
//! the answer into `{action, debug_info}`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{BlockResult, DetectionBatch};
use crate::landmarks::{LandmarkClassifier, LandmarkThresholds};
use crate::pose::{AngleClassifier, AngleThresholds};

/// A yaw or pitch value as the runner delivers it.
///
/// Pose models emit one value per detected face, so angles usually arrive
/// as a sequence of which only the first is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AngleInput {
    /// A bare number.
    Scalar(f64),
    /// Per-face values.
    Sequence(Vec<f64>),
}

impl AngleInput {
    /// The scalar itself, or the first element (`default` when empty).
    #[must_use]
    pub fn first_or(&self, default: f64) -> f64 {
        match self {
            Self::Scalar(v) => *v,
            Self::Sequence(values) => values.first().copied().unwrap_or(default),
        }
    }
}

/// Inputs of the angle strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleRequest {
    /// Yaw in degrees; missing or null reads as 0.
    #[serde(default)]
    pub yaw_degrees: Option<AngleInput>,
    /// Pitch in degrees before offset correction; missing or null reads as 0.
    #[serde(default)]
    pub pitch_degrees: Option<AngleInput>,
    pub right_threshold: f64,
    pub left_threshold: f64,
    pub up_threshold: f64,
    pub down_threshold: f64,
}

impl AngleRequest {
    /// Effective yaw.
    #[must_use]
    pub fn yaw(&self) -> f64 {
        self.yaw_degrees.as_ref().map_or(0.0, |v| v.first_or(0.0))
    }

    /// Effective raw pitch.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch_degrees.as_ref().map_or(0.0, |v| v.first_or(0.0))
    }

    /// Thresholds carried by the request.
    #[must_use]
    pub const fn thresholds(&self) -> AngleThresholds {
        AngleThresholds {
            right: self.right_threshold,
            left: self.left_threshold,
            up: self.up_threshold,
            down: self.down_threshold,
        }
    }
}

/// Inputs of the landmark strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRequest {
    /// Missing or null reads as an empty batch, which classifies as `unknown-1`.
    #[serde(default, deserialize_with = "null_as_empty_batch")]
    pub detections: DetectionBatch,
}

fn null_as_empty_batch<'de, D>(deserializer: D) -> Result<DetectionBatch, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DetectionBatch>::deserialize(deserializer)?.unwrap_or_default())
}

/// One invocation, tagged by strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Request {
    /// Facial landmark boxes.
    Landmarks(LandmarkRequest),
    /// Head-pose angles.
    Angles(AngleRequest),
}

impl Request {
    /// Name of the strategy this request targets.
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Landmarks(_) => "landmarks",
            Self::Angles(_) => "angles",
        }
    }
}

/// Both strategies with their configured thresholds.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    landmarks: LandmarkClassifier,
    angles: AngleClassifier,
}

impl Classifier {
    /// Creates a classifier from landmark thresholds and a pitch offset.
    #[must_use]
    pub const fn new(thresholds: LandmarkThresholds, pitch_offset: f64) -> Self {
        Self {
            landmarks: LandmarkClassifier::new(thresholds),
            angles: AngleClassifier::new(pitch_offset),
        }
    }

    /// The landmark strategy.
    #[must_use]
    pub const fn landmarks(&self) -> &LandmarkClassifier {
        &self.landmarks
    }

    /// The angle strategy.
    #[must_use]
    pub const fn angles(&self) -> &AngleClassifier {
        &self.angles
    }

    /// Dispatches a request to its strategy.
    #[must_use]
    pub fn run(&self, request: &Request) -> BlockResult {
        match request {
            Request::Landmarks(req) => self.run_landmarks(&req.detections),
            Request::Angles(req) => self.run_angles(req),
        }
    }

    /// Landmark entry point; always carries `debug_info`.
    #[must_use]
    pub fn run_landmarks(&self, detections: &DetectionBatch) -> BlockResult {
        self.landmarks.run(detections)
    }

    /// Angle entry point; carries only `action`.
    #[must_use]
    pub fn run_angles(&self, request: &AngleRequest) -> BlockResult {
        let direction = self
            .angles
            .classify(request.yaw(), request.pitch(), &request.thresholds());
        BlockResult::action(direction)
    }
}
