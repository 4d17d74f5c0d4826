//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use gaze_direction_core::domain::{ClassifiedRecord, DetectionBatch, SourcedRequest};
use gaze_direction_core::ports::{ProgressEvent, ProgressSink, RequestSource, ResultOutput};
use gaze_direction_core::{InputError, Request};

use crate::builders::landmark_request;

/// Mock implementation of `RequestSource` for testing.
///
/// Yields pre-built requests, and optionally input failures, and tracks
/// iteration for assertions.
pub struct MockRequestSource {
    requests: Vec<Result<SourcedRequest, InputError>>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockRequestSource {
    /// Creates a new mock source yielding the given requests from
    /// `mock://requests`.
    #[must_use]
    pub fn new(requests: Vec<Request>) -> Self {
        let requests = requests
            .into_iter()
            .enumerate()
            .map(|(index, request)| {
                Ok(SourcedRequest {
                    source: "mock://requests".to_string(),
                    index,
                    request,
                })
            })
            .collect();
        Self {
            requests,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates a mock source of landmark requests.
    #[must_use]
    pub fn from_batches(batches: Vec<DetectionBatch>) -> Self {
        Self::new(batches.into_iter().map(landmark_request).collect())
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Appends a failing item after the existing requests.
    #[must_use]
    pub fn with_failure(mut self, error: InputError) -> Self {
        self.requests.push(Err(error));
        self
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl RequestSource for MockRequestSource {
    fn requests(&self) -> Box<dyn Iterator<Item = anyhow::Result<SourcedRequest>> + Send + '_> {
        let count = Arc::clone(&self.iteration_count);
        if let Ok(mut c) = count.lock() {
            *c += 1;
        }
        Box::new(
            self.requests
                .iter()
                .cloned()
                .map(|item| item.map_err(anyhow::Error::new)),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(1)
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures records for later assertions.
pub struct MockResultOutput {
    records: Arc<Mutex<Vec<ClassifiedRecord>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<ClassifiedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, record: &ClassifiedRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
