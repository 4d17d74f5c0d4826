//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the classifiers and the
//! adapters that feed and drain them.

mod progress;
mod request_source;
mod result_output;

pub use progress::{ProgressEvent, ProgressSink};
pub use request_source::{InputError, RequestSource};
pub use result_output::ResultOutput;
