//! Progress reporting port.

use crate::domain::ClassifiedRecord;

/// Events emitted while a batch of requests is classified.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Classification started for a request.
    Started {
        /// Source the request was read from.
        source: String,
        /// Position within the source (0-based).
        index: usize,
        /// Total input files, if known.
        total: Option<usize>,
    },
    /// A request was classified.
    Completed {
        /// The output record.
        record: ClassifiedRecord,
    },
    /// An input could not be read or decoded.
    Skipped {
        /// Source that failed.
        source: String,
        /// Failing request's position, `None` when the whole source failed.
        index: Option<usize>,
        /// Reason for skipping.
        reason: String,
    },
    /// All inputs have been processed.
    Finished {
        /// Requests classified.
        processed: usize,
        /// Inputs skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
