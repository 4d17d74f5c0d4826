//! Configuration file support for gaze-direction.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/gaze-direction/config.toml` (lowest priority)
//! - Project-local: `.gaze-direction.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use gaze_direction_core::{LandmarkThresholds, VerticalBands, DEFAULT_PITCH_OFFSET};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = ".gaze-direction.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Landmark-ratio strategy settings.
    pub landmarks: LandmarksConfig,
    /// Angle strategy settings.
    pub angles: AnglesConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Landmark-ratio strategy configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LandmarksConfig {
    /// Minimum box confidence (0.0-1.0).
    pub min_confidence: Option<f64>,
    /// Eye width ratio threshold (> 1.0).
    pub eye_ratio_threshold: Option<f64>,
    /// Image width assumed when a batch has no metadata.
    pub default_image_width: Option<f64>,
    /// Bands for the nose and mouth ratio.
    pub nose_mouth: BandsConfig,
    /// Bands for the nose-only ratio.
    pub nose_only: BandsConfig,
    /// Bands for the mouth-only ratio.
    pub mouth_only: BandsConfig,
}

/// Partial override of one set of vertical bands.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BandsConfig {
    pub up_below: Option<f64>,
    pub center_low: Option<f64>,
    pub center_high: Option<f64>,
    pub down_above: Option<f64>,
}

/// Angle strategy configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AnglesConfig {
    /// Degrees added to every pitch before scoring.
    pub pitch_offset: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

/// Effective classifier settings, as printed by `config show`.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub landmarks: LandmarkThresholds,
    pub angles: EffectiveAngles,
}

/// Effective angle settings.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveAngles {
    pub pitch_offset: f64,
}

impl BandsConfig {
    /// Overlays the configured values onto `base`.
    const fn apply(&self, base: VerticalBands) -> VerticalBands {
        VerticalBands {
            up_below: match self.up_below {
                Some(v) => v,
                None => base.up_below,
            },
            center_low: match self.center_low {
                Some(v) => v,
                None => base.center_low,
            },
            center_high: match self.center_high {
                Some(v) => v,
                None => base.center_high,
            },
            down_above: match self.down_above {
                Some(v) => v,
                None => base.down_above,
            },
        }
    }

    fn merge(&mut self, other: Self) {
        self.up_below = other.up_below.or(self.up_below);
        self.center_low = other.center_low.or(self.center_low);
        self.center_high = other.center_high.or(self.center_high);
        self.down_above = other.down_above.or(self.down_above);
    }
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/gaze-direction/config.toml`
    /// 2. Project-local: `.gaze-direction.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Landmark thresholds with configured values over the defaults.
    #[must_use]
    pub fn landmark_thresholds(&self) -> LandmarkThresholds {
        let defaults = LandmarkThresholds::default();
        let landmarks = &self.landmarks;
        LandmarkThresholds {
            min_confidence: landmarks.min_confidence.unwrap_or(defaults.min_confidence),
            eye_ratio_threshold: landmarks
                .eye_ratio_threshold
                .unwrap_or(defaults.eye_ratio_threshold),
            default_image_width: landmarks
                .default_image_width
                .unwrap_or(defaults.default_image_width),
            nose_mouth: landmarks.nose_mouth.apply(defaults.nose_mouth),
            nose_only: landmarks.nose_only.apply(defaults.nose_only),
            mouth_only: landmarks.mouth_only.apply(defaults.mouth_only),
        }
    }

    /// Pitch offset with fallback to the default.
    #[must_use]
    pub fn pitch_offset(&self) -> f64 {
        self.angles.pitch_offset.unwrap_or(DEFAULT_PITCH_OFFSET)
    }

    /// Settings a classification run would use without CLI overrides.
    #[must_use]
    pub fn effective(&self) -> EffectiveConfig {
        EffectiveConfig {
            landmarks: self.landmark_thresholds(),
            angles: EffectiveAngles {
                pitch_offset: self.pitch_offset(),
            },
        }
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        self.landmark_thresholds()
            .validate()
            .map_err(|e| format!("landmarks.{e}"))?;

        if let Some(offset) = self.angles.pitch_offset {
            if !offset.is_finite() {
                return Err(format!("angles.pitch_offset must be finite, got {offset}"));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Landmarks
        self.landmarks.min_confidence = other
            .landmarks
            .min_confidence
            .or(self.landmarks.min_confidence);
        self.landmarks.eye_ratio_threshold = other
            .landmarks
            .eye_ratio_threshold
            .or(self.landmarks.eye_ratio_threshold);
        self.landmarks.default_image_width = other
            .landmarks
            .default_image_width
            .or(self.landmarks.default_image_width);
        self.landmarks.nose_mouth.merge(other.landmarks.nose_mouth);
        self.landmarks.nose_only.merge(other.landmarks.nose_only);
        self.landmarks.mouth_only.merge(other.landmarks.mouth_only);

        // Angles
        self.angles.pitch_offset = other.angles.pitch_offset.or(self.angles.pitch_offset);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
pub fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gaze-direction").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
pub fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.gaze-direction.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
