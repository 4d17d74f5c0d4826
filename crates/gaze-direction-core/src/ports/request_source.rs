//! Request source port for reading classification requests.

use thiserror::Error;

use crate::domain::SourcedRequest;

/// Port for reading requests from a source.
pub trait RequestSource: Send + Sync {
    /// Returns an iterator over requests from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a file or line fails to decode.
    /// Sources attach an [`InputError`] so consumers can tell which input
    /// failed.
    fn requests(&self) -> Box<dyn Iterator<Item = anyhow::Result<SourcedRequest>> + Send + '_>;

    /// Returns the number of input files, if known.
    fn count_hint(&self) -> Option<usize>;
}

/// Where reading a request went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The input could not be read at all.
    #[error("Failed to read {input}")]
    Unreadable { input: String },

    /// The input is not a JSON document.
    #[error("Failed to parse JSON: {input}")]
    Malformed { input: String },

    /// One JSON Lines entry is not valid JSON.
    #[error("Failed to parse {input} line {line}")]
    MalformedLine {
        input: String,
        index: usize,
        line: usize,
    },

    /// A well-formed value is not a valid request.
    #[error("Invalid request {index} in {input}")]
    InvalidRequest { input: String, index: usize },
}

impl InputError {
    /// Path of the failing input, or `-` for stdin.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::Unreadable { input }
            | Self::Malformed { input }
            | Self::MalformedLine { input, .. }
            | Self::InvalidRequest { input, .. } => input,
        }
    }

    /// Request position within the input, `None` when the whole input failed.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Unreadable { .. } | Self::Malformed { .. } => None,
            Self::MalformedLine { index, .. } | Self::InvalidRequest { index, .. } => Some(*index),
        }
    }

    /// Finds the input error attached to `error` as context or cause.
    #[must_use]
    pub fn find(error: &anyhow::Error) -> Option<&Self> {
        error.downcast_ref::<Self>()
    }
}
