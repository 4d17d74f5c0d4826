//! Requests and results tagged with where they came from.

use serde::Serialize;

use super::{BlockResult, Direction};
use crate::invocation::Request;

/// A request read from an input, with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedRequest {
    /// Input path, or `-` for stdin.
    pub source: String,
    /// Position within the source (0-based).
    pub index: usize,
    /// The decoded request.
    pub request: Request,
}

/// One output record: location plus the block result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRecord {
    pub source: String,
    pub index: usize,
    #[serde(flatten)]
    pub result: BlockResult,
}

impl ClassifiedRecord {
    /// Pairs a result with the location of its request.
    #[must_use]
    pub fn new(request: &SourcedRequest, result: BlockResult) -> Self {
        Self {
            source: request.source.clone(),
            index: request.index,
            result,
        }
    }

    /// The decided direction, [`Direction::Unknown`] for failures.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.result.action.direction()
    }
}
