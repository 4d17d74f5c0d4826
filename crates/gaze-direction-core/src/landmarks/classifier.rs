//! Ratio chain over a resolved eye pair.
//!
//! Rules are tried in priority order and the first one that fires decides:
//!
//! 1. eye width asymmetry (head yaw)
//! 2. nose and mouth vertical ratio
//! 3. nose offset below the eye line
//! 4. mouth offset below the eye line
//! 5. center

use tracing::debug;

use super::thresholds::LandmarkThresholds;
use crate::domain::{Diagnostics, Direction, EyePair, Feature, Rule};
use crate::error::{ClassifyError, Result};

/// Runs the ratio chain, recording every computed ratio into `diag`.
///
/// # Errors
///
/// Returns [`ClassifyError::Unexpected`] when a ratio's denominator is zero.
pub fn classify_pair(
    pair: &EyePair,
    mouth: Option<Feature>,
    nose: Option<Feature>,
    thresholds: &LandmarkThresholds,
    diag: &mut Diagnostics,
) -> Result<Direction> {
    if pair.left.width == 0.0 {
        return Err(ClassifyError::unexpected("left eye has zero width"));
    }
    let eye_width_ratio = pair.right.width / pair.left.width;
    diag.eye_width_ratio = Some(eye_width_ratio);

    let turn = thresholds.eye_ratio_threshold;
    if eye_width_ratio > turn {
        return Ok(settle(diag, Rule::EyeWidth, Direction::LookingRight));
    }
    if eye_width_ratio < 1.0 / turn {
        return Ok(settle(diag, Rule::EyeWidth, Direction::LookingLeft));
    }

    record_horizontal(pair, mouth, nose, diag);
    let eye_mid_y = pair.midpoint_y();

    let vertical = match (nose, mouth) {
        (Some(nose), Some(mouth)) => {
            let eye_to_nose = (nose.y - eye_mid_y).abs();
            let nose_to_mouth = (mouth.y - nose.y).abs();
            diag.eye_to_nose = Some(eye_to_nose);
            diag.nose_to_mouth = Some(nose_to_mouth);
            if nose_to_mouth == 0.0 {
                return Err(ClassifyError::unexpected(
                    "nose and mouth share a vertical position",
                ));
            }
            let ratio = eye_to_nose / nose_to_mouth;
            diag.vertical_ratio = Some(ratio);
            thresholds
                .nose_mouth
                .classify(ratio)
                .map(|d| (Rule::NoseMouth, d))
        }
        (Some(nose), None) => {
            let ratio = offset_ratio(nose.y, eye_mid_y, pair, diag)?;
            diag.nose_ratio = Some(ratio);
            thresholds.nose_only.classify(ratio).map(|d| (Rule::NoseOnly, d))
        }
        (None, Some(mouth)) => {
            let ratio = offset_ratio(mouth.y, eye_mid_y, pair, diag)?;
            diag.mouth_ratio = Some(ratio);
            thresholds
                .mouth_only
                .classify(ratio)
                .map(|d| (Rule::MouthOnly, d))
        }
        (None, None) => None,
    };

    Ok(match vertical {
        Some((rule, direction)) => settle(diag, rule, direction),
        None => settle(diag, Rule::Default, Direction::Center),
    })
}

/// Signed vertical offset of a feature below the eye line, in eye distances.
fn offset_ratio(y: f64, eye_mid_y: f64, pair: &EyePair, diag: &mut Diagnostics) -> Result<f64> {
    let eye_distance = pair.distance();
    diag.eye_distance = Some(eye_distance);
    if eye_distance == 0.0 {
        return Err(ClassifyError::unexpected("eyes share a horizontal position"));
    }
    Ok((y - eye_mid_y) / eye_distance)
}

/// Records how far nose and mouth sit off the eye midpoint. Observational only.
fn record_horizontal(
    pair: &EyePair,
    mouth: Option<Feature>,
    nose: Option<Feature>,
    diag: &mut Diagnostics,
) {
    let eye_distance = pair.distance();
    if eye_distance == 0.0 {
        return;
    }
    let eye_mid_x = pair.midpoint_x();
    diag.nose_horizontal_ratio = nose.map(|n| (n.x - eye_mid_x).abs() / eye_distance);
    diag.mouth_horizontal_ratio = mouth.map(|m| (m.x - eye_mid_x).abs() / eye_distance);
}

fn settle(diag: &mut Diagnostics, rule: Rule, direction: Direction) -> Direction {
    debug!("Rule {rule:?} decided {direction}");
    diag.rule = Some(rule);
    direction
}
