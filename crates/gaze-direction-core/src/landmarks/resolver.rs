//! Eye resolution: find a usable eye pair or settle the label early.

use tracing::debug;

use crate::domain::{Diagnostics, Direction, EyePair, Feature, FeatureSet, Rule};

/// Outcome of eye resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum EyeResolution {
    /// The label is already decided.
    Settled(Direction),
    /// Two eyes are available for the ratio chain.
    Pair(EyePair),
}

/// Resolves the eye list into a pair or an early label.
///
/// Records the rule and reference positions for settled paths into `diag`.
pub fn resolve_eyes(
    features: &FeatureSet,
    image_width: f64,
    diag: &mut Diagnostics,
) -> EyeResolution {
    let Some(&first) = features.eyes.first() else {
        debug!("No eyes retained, defaulting to center");
        diag.rule = Some(Rule::NoEyes);
        return EyeResolution::Settled(Direction::Center);
    };

    if features.eyes.len() == 1 {
        diag.rule = Some(Rule::SingleEye);
        let direction = match features.reference_x() {
            Some(reference) => {
                diag.reference_x = Some(reference);
                visible_side(first, reference)
            }
            None => {
                let center = image_width / 2.0;
                diag.image_center = Some(center);
                visible_side(first, center)
            }
        };
        debug!("Single eye at x={:.1} resolves to {direction}", first.x);
        return EyeResolution::Settled(direction);
    }

    if features.lacks_reference() {
        // Uses the first-seen eye, not the left-most one.
        let center = image_width / 2.0;
        diag.rule = Some(Rule::EyesOnly);
        diag.image_center = Some(center);
        let direction = visible_side(first, center);
        debug!(
            "{} eyes without mouth or nose resolve to {direction}",
            features.eyes.len()
        );
        return EyeResolution::Settled(direction);
    }

    let mut eyes = features.eyes.clone();
    eyes.sort_by(|a, b| a.x.total_cmp(&b.x));

    EyeResolution::Pair(EyePair {
        left: eyes[0],
        right: eyes[1],
    })
}

/// An eye left of the reference means the head has turned to show its
/// left side, so the person faces right, and vice versa.
fn visible_side(eye: Feature, reference: f64) -> Direction {
    if eye.x < reference {
        Direction::LookingRight
    } else {
        Direction::LookingLeft
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn feature_at(x: f64, y: f64) -> Feature {
        Feature::from_xyxy([x - 5.0, y - 5.0, x + 5.0, y + 5.0], 0.9)
    }

    fn resolve(features: &FeatureSet) -> (EyeResolution, Diagnostics) {
        let mut diag = Diagnostics::default();
        let resolution = resolve_eyes(features, 1686.0, &mut diag);
        (resolution, diag)
    }

    #[test]
    fn test_no_eyes_is_center() {
        let features = FeatureSet {
            mouth: Some(feature_at(100.0, 200.0)),
            ..FeatureSet::default()
        };
        let (resolution, diag) = resolve(&features);
        assert_eq!(resolution, EyeResolution::Settled(Direction::Center));
        assert_eq!(diag.rule, Some(Rule::NoEyes));
    }

    #[test]
    fn test_single_eye_left_of_mouth_looks_right() {
        let features = FeatureSet {
            eyes: vec![feature_at(80.0, 100.0)],
            mouth: Some(feature_at(100.0, 200.0)),
            nose: None,
        };
        let (resolution, diag) = resolve(&features);
        assert_eq!(resolution, EyeResolution::Settled(Direction::LookingRight));
        assert_eq!(diag.reference_x, Some(100.0));
        assert!(diag.image_center.is_none());
    }

    #[test]
    fn test_single_eye_right_of_mouth_looks_left() {
        let features = FeatureSet {
            eyes: vec![feature_at(120.0, 100.0)],
            mouth: Some(feature_at(100.0, 200.0)),
            nose: None,
        };
        let (resolution, _) = resolve(&features);
        assert_eq!(resolution, EyeResolution::Settled(Direction::LookingLeft));
    }

    #[test]
    fn test_single_eye_prefers_mouth_over_nose() {
        // Left of the nose but right of the mouth: the mouth decides.
        let features = FeatureSet {
            eyes: vec![feature_at(100.0, 100.0)],
            mouth: Some(feature_at(90.0, 200.0)),
            nose: Some(feature_at(110.0, 150.0)),
        };
        let (resolution, _) = resolve(&features);
        assert_eq!(resolution, EyeResolution::Settled(Direction::LookingLeft));
    }

    #[test]
    fn test_single_eye_uses_nose_without_mouth() {
        let features = FeatureSet {
            eyes: vec![feature_at(100.0, 100.0)],
            mouth: None,
            nose: Some(feature_at(110.0, 150.0)),
        };
        let (resolution, _) = resolve(&features);
        assert_eq!(resolution, EyeResolution::Settled(Direction::LookingRight));
    }

    #[test]
    fn test_single_eye_against_image_center() {
        let left = FeatureSet {
            eyes: vec![feature_at(400.0, 100.0)],
            ..FeatureSet::default()
        };
        let (resolution, diag) = resolve(&left);
        assert_eq!(resolution, EyeResolution::Settled(Direction::LookingRight));
        assert_eq!(diag.image_center, Some(843.0));

        let right = FeatureSet {
            eyes: vec![feature_at(900.0, 100.0)],
            ..FeatureSet::default()
        };
        let (resolution, _) = resolve(&right);
        assert_eq!(resolution, EyeResolution::Settled(Direction::LookingLeft));
    }

    #[test]
    fn test_eye_exactly_at_reference_looks_left() {
        let features = FeatureSet {
            eyes: vec![feature_at(843.0, 100.0)],
            ..FeatureSet::default()
        };
        let (resolution, _) = resolve(&features);
        assert_eq!(resolution, EyeResolution::Settled(Direction::LookingLeft));
    }

    #[test]
    fn test_eyes_only_uses_first_seen_eye() {
        // First-seen eye is right of center even though another is left of it.
        let features = FeatureSet {
            eyes: vec![feature_at(1000.0, 100.0), feature_at(200.0, 100.0)],
            ..FeatureSet::default()
        };
        let (resolution, diag) = resolve(&features);
        assert_eq!(resolution, EyeResolution::Settled(Direction::LookingLeft));
        assert_eq!(diag.rule, Some(Rule::EyesOnly));
    }

    #[test]
    fn test_pair_sorted_by_x_and_extra_eyes_ignored() {
        let features = FeatureSet {
            eyes: vec![
                feature_at(300.0, 100.0),
                feature_at(100.0, 100.0),
                feature_at(200.0, 100.0),
            ],
            mouth: Some(feature_at(200.0, 300.0)),
            nose: None,
        };
        let (resolution, diag) = resolve(&features);
        let EyeResolution::Pair(pair) = resolution else {
            panic!("expected an eye pair");
        };
        assert!((pair.left.x - 100.0).abs() < 1e-9);
        assert!((pair.right.x - 200.0).abs() < 1e-9);
        assert!(diag.rule.is_none());
    }
}
