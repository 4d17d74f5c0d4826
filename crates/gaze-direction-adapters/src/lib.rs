//! Gaze Direction Adapters - External adapters for gaze-direction.
//!
//! This crate provides the filesystem and stdin request source that feeds
//! recorded runner requests to the classifiers.

pub mod fs;

pub use fs::{parse_json, parse_jsonl, FsRequestSource, STDIN_PATH};
