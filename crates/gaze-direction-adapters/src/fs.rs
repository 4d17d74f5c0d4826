//! Filesystem adapter for reading classification requests.
//!
//! `.json` files hold one request object or an array of them, `.jsonl`
//! files hold one request per line. The path `-` reads JSON Lines from
//! stdin.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gaze_direction_core::{InputError, Request, RequestSource, SourcedRequest};
use serde_json::Value;
use tracing::{debug, warn};

/// Path that selects stdin.
pub const STDIN_PATH: &str = "-";

/// Supported request file extensions.
const REQUEST_EXTENSIONS: &[&str] = &["json", "jsonl"];

/// Filesystem request source adapter.
pub struct FsRequestSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsRequestSource {
    /// Creates a new filesystem request source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files, directories, or `-` for stdin
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Collects all request files from the configured paths.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if is_stdin(path) {
                files.push(path.clone());
            } else if path.is_file() {
                if is_request_file(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        // Sorted so output order does not depend on the filesystem.
        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && is_request_file(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl RequestSource for FsRequestSource {
    fn requests(&self) -> Box<dyn Iterator<Item = Result<SourcedRequest>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} request files", files.len());

        Box::new(files.into_iter().flat_map(|path| read_requests(&path)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Checks if a path has a supported request extension.
fn is_request_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| REQUEST_EXTENSIONS.contains(&e.as_str()))
}

fn is_jsonl(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jsonl"))
}

/// Reads every request from one input.
fn read_requests(path: &Path) -> Vec<Result<SourcedRequest>> {
    if is_stdin(path) {
        return match io::read_to_string(io::stdin()).context(InputError::Unreadable {
            input: STDIN_PATH.to_string(),
        }) {
            Ok(text) => parse_jsonl(STDIN_PATH, &text),
            Err(e) => vec![Err(e)],
        };
    }

    let source = path.to_string_lossy().into_owned();
    let text = match std::fs::read_to_string(path).with_context(|| InputError::Unreadable {
        input: source.clone(),
    }) {
        Ok(text) => text,
        Err(e) => return vec![Err(e)],
    };

    if is_jsonl(path) {
        parse_jsonl(&source, &text)
    } else {
        parse_json(&source, &text)
    }
}

/// Parses a JSON document holding one request or an array of requests.
///
/// A document that is not valid JSON yields a single error; an array
/// element that is not a valid request yields an error in its slot.
#[must_use]
pub fn parse_json(source: &str, text: &str) -> Vec<Result<SourcedRequest>> {
    let value: Value = match serde_json::from_str(text).with_context(|| InputError::Malformed {
        input: source.to_string(),
    }) {
        Ok(value) => value,
        Err(e) => return vec![Err(e)],
    };

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| decode(source, index, item))
            .collect(),
        other => vec![decode(source, 0, other)],
    }
}

/// Parses JSON Lines, one request per non-blank line.
///
/// Indices count requests, so blank lines do not shift them.
#[must_use]
pub fn parse_jsonl(source: &str, text: &str) -> Vec<Result<SourcedRequest>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .enumerate()
        .map(|(index, (line_no, line))| {
            let value: Value =
                serde_json::from_str(line).with_context(|| InputError::MalformedLine {
                    input: source.to_string(),
                    index,
                    line: line_no + 1,
                })?;
            decode(source, index, value)
        })
        .collect()
}

fn decode(source: &str, index: usize, value: Value) -> Result<SourcedRequest> {
    let request: Request =
        serde_json::from_value(value).with_context(|| InputError::InvalidRequest {
            input: source.to_string(),
            index,
        })?;
    Ok(SourcedRequest {
        source: source.to_string(),
        index,
        request,
    })
}
