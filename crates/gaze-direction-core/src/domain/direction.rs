//! Direction labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the person is looking, as reported to the workflow runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Facing the camera.
    Center,
    /// Turned towards the viewer's left.
    LookingLeft,
    /// Turned towards the viewer's right.
    LookingRight,
    /// Head tilted up.
    LookingUp,
    /// Head tilted down.
    LookingDown,
    /// No usable signal.
    Unknown,
}

impl Direction {
    /// Wire spelling of the label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::LookingLeft => "looking_left",
            Self::LookingRight => "looking_right",
            Self::LookingUp => "looking_up",
            Self::LookingDown => "looking_down",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
