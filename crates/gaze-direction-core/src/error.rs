//! Classification failure taxonomy.

use thiserror::Error;

/// Why a classification call produced no direction.
///
/// Each variant maps onto one of the `unknown-<n>` labels the workflow
/// runner receives. The `Display` output is exactly that label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The batch carried no boxes at all.
    #[error("unknown-1")]
    NoDetections,

    /// Confidence or class-id sequence was absent.
    #[error("unknown-2")]
    MissingAttributes {
        /// Name of the first missing attribute.
        attribute: &'static str,
    },

    /// Anything else, including degenerate geometry.
    #[error("unknown-9: {0}")]
    Unexpected(String),
}

impl ClassifyError {
    /// Numeric sub-reason carried in the `unknown-<n>` label.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::NoDetections => 1,
            Self::MissingAttributes { .. } => 2,
            Self::Unexpected(_) => 9,
        }
    }

    /// Human-readable description for diagnostics and logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::NoDetections => "no detections in batch".to_string(),
            Self::MissingAttributes { attribute } => format!("missing attribute: {attribute}"),
            Self::Unexpected(message) => message.clone(),
        }
    }

    pub(crate) fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

/// Result alias for classification internals.
pub type Result<T> = std::result::Result<T, ClassifyError>;
