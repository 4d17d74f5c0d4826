//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: hardcoded defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Get path to test fixtures
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("gaze-direction-adapters/tests/fixtures")
}

/// Command running in `project` with `xdg` as the user config home.
fn cmd_in(project: &Path, xdg: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gaze-direction").unwrap();
    cmd.current_dir(project).env("XDG_CONFIG_HOME", xdg);
    cmd
}

fn write_xdg_config(xdg: &Path, content: &str) {
    let dir = xdg.join("gaze-direction");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}

fn actions(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            let v: Value = serde_json::from_str(l).unwrap();
            v["action"].as_str().unwrap().to_string()
        })
        .collect()
}

#[test]
fn test_project_config_applies_format() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join(".gaze-direction.toml"),
        r"
[output]
format = 'json'
",
    )
    .unwrap();

    cmd_in(project.path(), xdg.path())
        .arg(fixtures_dir().join("frontal.json"))
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_cli_overrides_project_config() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join(".gaze-direction.toml"),
        r"
[output]
format = 'json'
",
    )
    .unwrap();

    cmd_in(project.path(), xdg.path())
        .arg("--format")
        .arg("jsonl")
        .arg(fixtures_dir().join("frontal.json"))
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_pitch_offset_from_config() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    let angles = fixtures_dir().join("angles.jsonl");

    // Default offset: raw pitch -10 corrects to 0.
    let output = cmd_in(project.path(), xdg.path())
        .arg(&angles)
        .output()
        .unwrap();
    assert_eq!(actions(&output.stdout)[2], "center");

    fs::write(
        project.path().join(".gaze-direction.toml"),
        r"
[angles]
pitch_offset = 0.0
",
    )
    .unwrap();

    let output = cmd_in(project.path(), xdg.path())
        .arg(&angles)
        .output()
        .unwrap();
    assert_eq!(actions(&output.stdout)[2], "looking_down");

    // CLI restores the offset.
    let output = cmd_in(project.path(), xdg.path())
        .arg("--pitch-offset")
        .arg("10")
        .arg(&angles)
        .output()
        .unwrap();
    assert_eq!(actions(&output.stdout)[2], "center");
}

#[test]
fn test_project_config_overrides_xdg() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    write_xdg_config(
        xdg.path(),
        r"
[landmarks]
min_confidence = 0.89
",
    );
    let frontal = fixtures_dir().join("frontal.json");

    // XDG alone drops the right eye and the nose: single eye, mouth to its right.
    let output = cmd_in(project.path(), xdg.path())
        .arg(&frontal)
        .output()
        .unwrap();
    assert_eq!(actions(&output.stdout), vec!["looking_right"]);

    fs::write(
        project.path().join(".gaze-direction.toml"),
        r"
[landmarks]
min_confidence = 0.3
",
    )
    .unwrap();

    let output = cmd_in(project.path(), xdg.path())
        .arg(&frontal)
        .output()
        .unwrap();
    assert_eq!(actions(&output.stdout), vec!["looking_up"]);
}

#[test]
fn test_cli_min_confidence_overrides_config() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();

    let output = cmd_in(project.path(), xdg.path())
        .arg("--min-confidence")
        .arg("0.89")
        .arg(fixtures_dir().join("frontal.json"))
        .output()
        .unwrap();
    assert_eq!(actions(&output.stdout), vec!["looking_right"]);
}

#[test]
fn test_image_width_flag_moves_center() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    let input = r#"{"strategy": "landmarks", "detections": {"xyxy": [[390, 95, 410, 105]], "confidence": [0.9], "class_id": [0]}}"#;

    let output = cmd_in(project.path(), xdg.path())
        .arg("-")
        .write_stdin(input)
        .output()
        .unwrap();
    assert_eq!(actions(&output.stdout), vec!["looking_right"]);

    let output = cmd_in(project.path(), xdg.path())
        .arg("--image-width")
        .arg("640")
        .arg("-")
        .write_stdin(input)
        .output()
        .unwrap();
    assert_eq!(actions(&output.stdout), vec!["looking_left"]);
}

#[test]
fn test_config_bands_override() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    // frontal.json has a vertical ratio of 0.2; lowering up_below turns
    // it into a gap that falls through to center.
    fs::write(
        project.path().join(".gaze-direction.toml"),
        r"
[landmarks.nose_mouth]
up_below = 0.1
",
    )
    .unwrap();

    let output = cmd_in(project.path(), xdg.path())
        .arg(fixtures_dir().join("frontal.json"))
        .output()
        .unwrap();
    let line = String::from_utf8_lossy(&output.stdout);
    let record: Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(record["action"], "center");
    assert_eq!(record["debug_info"]["rule"], "default");
}

#[test]
fn test_config_recursive() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join(".gaze-direction.toml"),
        r"
[general]
recursive = true
",
    )
    .unwrap();

    let output = cmd_in(project.path(), xdg.path())
        .arg(fixtures_dir())
        .output()
        .unwrap();
    assert_eq!(actions(&output.stdout).len(), 8);
}

#[test]
fn test_invalid_config_warns() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join(".gaze-direction.toml"),
        r"
[output]
format = 'xml'
",
    )
    .unwrap();

    // Unknown format in config is ignored after the warning.
    cmd_in(project.path(), xdg.path())
        .arg(fixtures_dir().join("frontal.json"))
        .assert()
        .code(0)
        .stderr(predicate::str::contains("warning: output.format"))
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_invalid_thresholds_fail_run() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join(".gaze-direction.toml"),
        r"
[landmarks.mouth_only]
center_high = 2.0
",
    )
    .unwrap();

    cmd_in(project.path(), xdg.path())
        .arg(fixtures_dir().join("frontal.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid landmark thresholds"));
}

#[test]
fn test_non_finite_pitch_offset_fails_run() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join(".gaze-direction.toml"),
        r"
[angles]
pitch_offset = nan
",
    )
    .unwrap();

    cmd_in(project.path(), xdg.path())
        .arg(fixtures_dir().join("angles.jsonl"))
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid pitch offset"));
}

#[test]
fn test_unparseable_config_is_ignored() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    fs::write(project.path().join(".gaze-direction.toml"), "[output\n").unwrap();

    cmd_in(project.path(), xdg.path())
        .arg(fixtures_dir().join("frontal.json"))
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_config_show_reflects_layers() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    write_xdg_config(
        xdg.path(),
        r"
[landmarks]
eye_ratio_threshold = 1.5
",
    );
    fs::write(
        project.path().join(".gaze-direction.toml"),
        r"
[angles]
pitch_offset = 4.0
",
    )
    .unwrap();

    let output = cmd_in(project.path(), xdg.path())
        .arg("config")
        .arg("show")
        .output()
        .unwrap();
    assert!(output.status.success());

    let shown: toml::Value = toml::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(shown["landmarks"]["eye_ratio_threshold"].as_float(), Some(1.5));
    assert_eq!(shown["landmarks"]["min_confidence"].as_float(), Some(0.3));
    assert_eq!(shown["angles"]["pitch_offset"].as_float(), Some(4.0));
    assert_eq!(
        shown["landmarks"]["mouth_only"]["down_above"].as_float(),
        Some(1.0)
    );
}

#[test]
fn test_config_path_lists_project_file() {
    let project = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    fs::write(project.path().join(".gaze-direction.toml"), "").unwrap();

    cmd_in(project.path(), xdg.path())
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains(".gaze-direction.toml"));
}
