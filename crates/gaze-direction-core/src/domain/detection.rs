//! Raw detection batches as supplied by the workflow runner.

use serde::{Deserialize, Deserializer, Serialize};

/// Image width assumed when the batch carries no metadata.
pub const DEFAULT_IMAGE_WIDTH: f64 = 1686.0;

/// One frame's worth of landmark detections.
///
/// The three sequences are parallel: index `i` of `xyxy`, `confidence`
/// and `class_id` describe the same box. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionBatch {
    /// Boxes as `[x1, y1, x2, y2]` in pixels.
    #[serde(default)]
    pub xyxy: Option<Vec<[f64; 4]>>,
    /// Per-box confidence (0.0 to 1.0).
    #[serde(default)]
    pub confidence: Option<Vec<f64>>,
    /// Per-box class id (0 = eye, 1 = mouth, 2 = nose).
    ///
    /// Detectors that emit float ids (`0.0`) are accepted.
    #[serde(default, deserialize_with = "class_ids")]
    pub class_id: Option<Vec<i64>>,
    /// Optional frame metadata.
    #[serde(default)]
    pub metadata: DetectionMetadata,
}

/// A class id as detectors emit it.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawClassId {
    Int(i64),
    Float(f64),
}

impl RawClassId {
    /// Integral values keep their id; anything else maps to an id no class uses.
    #[allow(clippy::cast_possible_truncation)]
    fn into_id(self) -> i64 {
        match self {
            Self::Int(id) => id,
            Self::Float(id) if id.fract() == 0.0 && id.abs() <= 1e15 => id as i64,
            Self::Float(_) => UNMATCHED_CLASS_ID,
        }
    }
}

const UNMATCHED_CLASS_ID: i64 = -1;

fn class_ids<'de, D>(deserializer: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawClassId>>::deserialize(deserializer)?;
    Ok(raw.map(|ids| ids.into_iter().map(RawClassId::into_id).collect()))
}

/// Frame metadata attached to a detection batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionMetadata {
    /// Source image width in pixels.
    #[serde(default)]
    pub width: Option<f64>,
}

impl DetectionBatch {
    /// Number of boxes in the batch (zero when the box sequence is absent).
    #[must_use]
    pub fn len(&self) -> usize {
        self.xyxy.as_ref().map_or(0, Vec::len)
    }

    /// Returns true when the batch has no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Image width from metadata, falling back to `default`.
    #[must_use]
    pub fn image_width_or(&self, default: f64) -> f64 {
        self.metadata.width.unwrap_or(default)
    }
}

/// Facial landmark classes emitted by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkClass {
    /// Class id 0.
    Eye,
    /// Class id 1.
    Mouth,
    /// Class id 2.
    Nose,
}

impl LandmarkClass {
    /// Maps a detector class id, `None` for ids this classifier ignores.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(Self::Eye),
            1 => Some(Self::Mouth),
            2 => Some(Self::Nose),
            _ => None,
        }
    }
}
