//! Classify command - replay recorded requests through the classifiers.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use gaze_direction_adapters::FsRequestSource;
use gaze_direction_core::{
    ClassifiedRecord, Classifier, InputError, LandmarkThresholds, ProgressEvent, ProgressSink,
    RequestSource, ResultOutput,
};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Parse and validate a confidence value (0.0-1.0).
fn parse_confidence(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse and validate an eye width ratio (> 1.0).
fn parse_eye_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value > 1.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be greater than 1.0"))
    }
}

/// Parse and validate an image width in pixels.
fn parse_width(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be positive"))
    }
}

/// Parse a finite angle in degrees.
fn parse_degrees(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{value} is not a finite angle"))
    }
}

/// Shared arguments for request classification.
#[derive(Args, Clone)]
pub struct ClassifyArgs {
    /// Request files (.json, .jsonl), directories, or - for stdin
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Minimum landmark confidence (0.0-1.0)
    #[arg(long, value_parser = parse_confidence)]
    pub min_confidence: Option<f64>,

    /// Eye width ratio threshold (> 1.0)
    #[arg(long, value_parser = parse_eye_ratio)]
    pub eye_ratio: Option<f64>,

    /// Degrees added to pitch before angle scoring
    #[arg(long, value_parser = parse_degrees, allow_hyphen_values = true)]
    pub pitch_offset: Option<f64>,

    /// Image width assumed when a batch has no metadata
    #[arg(long, value_parser = parse_width)]
    pub image_width: Option<f64>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl ClassifyArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in `LandmarkThresholds` and the accessors)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Scalars: CLI > config; band overrides stay in the stored config.
        args.min_confidence = args.min_confidence.or(config.landmarks.min_confidence);
        args.eye_ratio = args.eye_ratio.or(config.landmarks.eye_ratio_threshold);
        args.image_width = args.image_width.or(config.landmarks.default_image_width);
        args.pitch_offset = args.pitch_offset.or(config.angles.pitch_offset);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.config = Some(config.clone());

        args
    }

    /// Landmark thresholds from config and CLI, over the defaults.
    fn landmark_thresholds(&self) -> LandmarkThresholds {
        let base = self
            .config
            .as_ref()
            .map_or_else(LandmarkThresholds::default, AppConfig::landmark_thresholds);
        LandmarkThresholds {
            min_confidence: self.min_confidence.unwrap_or(base.min_confidence),
            eye_ratio_threshold: self.eye_ratio.unwrap_or(base.eye_ratio_threshold),
            default_image_width: self.image_width.unwrap_or(base.default_image_width),
            ..base
        }
    }

    /// Get pitch offset with fallback to the default.
    fn pitch_offset(&self) -> f64 {
        self.pitch_offset
            .unwrap_or(gaze_direction_core::DEFAULT_PITCH_OFFSET)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the classify command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct ClassifyResult {
    /// Number of requests classified.
    pub processed: usize,
    /// Number of inputs skipped.
    pub skipped: usize,
    /// Number of requests that ended in an unknown action.
    pub unknown: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the classify command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &ClassifyArgs) -> Result<ClassifyResult> {
    info!("Running classify command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let classifier = build_classifier(args)?;

    let source = FsRequestSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout();

    process_requests(
        &source,
        &classifier,
        &output,
        &progress_bar,
        args.format(),
        args.pretty,
    )
}

/// Build the classifier from merged args (CLI + config).
fn build_classifier(args: &ClassifyArgs) -> Result<Classifier> {
    let thresholds = args.landmark_thresholds();
    thresholds
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid landmark thresholds: {e}"))?;
    let pitch_offset = args.pitch_offset();
    if !pitch_offset.is_finite() {
        anyhow::bail!("Invalid pitch offset: must be finite, got {pitch_offset}");
    }
    debug!("Landmark thresholds: {thresholds:?}");
    debug!("Pitch offset: {pitch_offset}");
    Ok(Classifier::new(thresholds, pitch_offset))
}

/// Classify every request from `source` and write the records.
fn process_requests(
    source: &dyn RequestSource,
    classifier: &Classifier,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
    format: OutputFormat,
    pretty: bool,
) -> Result<ClassifyResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut unknown = 0usize;
    let mut all_records: Vec<ClassifiedRecord> = Vec::new();

    for item in source.requests() {
        let request = match item {
            Ok(request) => request,
            Err(e) => {
                let (failed, index) = InputError::find(&e).map_or_else(
                    || ("<unknown input>".to_string(), None),
                    |input| (input.input().to_string(), input.index()),
                );
                progress.on_event(ProgressEvent::Skipped {
                    source: failed,
                    index,
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            source: request.source.clone(),
            index: request.index,
            total,
        });

        let result = classifier.run(&request.request);
        let record = ClassifiedRecord::new(&request, result);
        debug!(
            "{}[{}] ({}) -> {}",
            record.source,
            record.index,
            request.request.strategy(),
            record.result.action
        );

        if record.result.action.is_unknown() {
            unknown += 1;
        }

        progress.on_event(ProgressEvent::Completed {
            record: record.clone(),
        });

        match format {
            OutputFormat::Jsonl => output.write(&record)?,
            OutputFormat::Json => all_records.push(record),
        }

        processed += 1;
    }

    if format == OutputFormat::Json {
        output.write_array(&all_records, pretty)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if unknown > 0 {
        ExitCode::UnknownFound
    } else {
        ExitCode::Success
    };

    Ok(ClassifyResult {
        processed,
        skipped,
        unknown,
        exit_code,
    })
}
