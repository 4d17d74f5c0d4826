//! Classification outcomes and the block result handed back to the runner.

use std::fmt;

use serde::{Serialize, Serializer};

use super::{Diagnostics, Direction};
use crate::error::ClassifyError;

/// A successful classification with its trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// The decided direction.
    pub direction: Direction,
    /// Ratios and flags recorded while deciding.
    pub diagnostics: Diagnostics,
}

/// What the runner receives in the `action` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A direction label.
    Direction(Direction),
    /// A failure rendered as `unknown-<n>`.
    Unknown(ClassifyError),
}

impl Action {
    /// The direction, or [`Direction::Unknown`] on failure.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self {
            Self::Direction(d) => *d,
            Self::Unknown(_) => Direction::Unknown,
        }
    }

    /// Returns true for any `unknown` outcome.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self.direction(), Direction::Unknown)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direction(d) => d.fmt(f),
            Self::Unknown(e) => e.fmt(f),
        }
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Self::Direction(direction)
    }
}

impl From<ClassifyError> for Action {
    fn from(err: ClassifyError) -> Self {
        Self::Unknown(err)
    }
}

/// The `{action, debug_info}` shape returned to the workflow runner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockResult {
    /// Label or unknown code.
    pub action: Action,
    /// Landmark diagnostics; absent for the angle strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<Diagnostics>,
}

impl BlockResult {
    /// A result carrying only an action.
    #[must_use]
    pub fn action(action: impl Into<Action>) -> Self {
        Self {
            action: action.into(),
            debug_info: None,
        }
    }
}
