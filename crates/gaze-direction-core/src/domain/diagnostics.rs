//! Observability record emitted alongside each landmark classification.

use serde::{Deserialize, Serialize};

/// Which rule of the landmark chain produced the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// No eye survived filtering.
    NoEyes,
    /// Exactly one eye, resolved against a reference.
    SingleEye,
    /// Several eyes but neither mouth nor nose.
    EyesOnly,
    /// Eye width asymmetry.
    EyeWidth,
    /// Combined nose and mouth vertical ratio.
    NoseMouth,
    /// Nose-only vertical ratio.
    NoseOnly,
    /// Mouth-only vertical ratio.
    MouthOnly,
    /// Nothing fired.
    Default,
}

/// Ratios and presence flags recorded along the taken path.
///
/// Ratios that were not computed stay `None` and are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnostics {
    /// Number of eyes that passed the confidence filter.
    pub eyes: usize,
    /// Whether a nose passed the filter.
    pub nose: bool,
    /// Whether a mouth passed the filter.
    pub mouth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_center: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_width_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_to_nose: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nose_to_mouth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nose_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouth_ratio: Option<f64>,
    /// Nose offset from the eye midpoint x, in eye distances.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nose_horizontal_ratio: Option<f64>,
    /// Mouth offset from the eye midpoint x, in eye distances.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouth_horizontal_ratio: Option<f64>,
    /// Failure description on the unknown path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Diagnostics {
    /// Starts a record with the presence flags filled in.
    #[must_use]
    pub fn with_presence(eyes: usize, nose: bool, mouth: bool) -> Self {
        Self {
            eyes,
            nose,
            mouth,
            ..Self::default()
        }
    }
}
