//! CLI command definitions and handlers.

pub mod classify;
pub mod config;

use clap::{Parser, Subcommand};

/// Gaze Direction - classify gaze from facial landmarks or head pose
#[derive(Parser)]
#[command(name = "gaze-direction")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared classify arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub classify: classify::ClassifyArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify recorded requests
    Classify(classify::ClassifyArgs),
    /// Inspect configuration
    Config(config::ConfigArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every request produced a direction.
    Success,
    /// At least one request ended in `unknown`.
    UnknownFound,
    /// Usage or runtime error.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::UnknownFound => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
