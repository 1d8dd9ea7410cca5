//! Properties of the pip layout that must hold for every input.

use proptest::prelude::*;
use robust_spn_anim::dieface::{compute_dot_anchors, face_anchors, Anchor, DieFaceError};
use robust_spn_anim::Point;

const CENTROID: Point<f64> = Point { x: 0.5, y: 0.5 };

fn valid_value() -> impl Strategy<Value = i32> {
    1..=6i32
}

fn invalid_value() -> impl Strategy<Value = i32> {
    prop_oneof![i32::MIN..=0i32, 7..=i32::MAX]
}

#[test]
fn canonical_layouts() {
    use Anchor::*;
    let expected: [&[Anchor]; 6] = [
        &[Center],
        &[TopLeft, BottomRight],
        &[TopLeft, Center, BottomRight],
        &[TopLeft, TopRight, BottomLeft, BottomRight],
        &[TopLeft, TopRight, Center, BottomLeft, BottomRight],
        &[TopLeft, TopRight, LeftMid, RightMid, BottomLeft, BottomRight],
    ];
    for (value, anchors) in (1..=6).zip(expected) {
        assert_eq!(face_anchors(value).unwrap(), anchors);
        let points = anchors.iter().map(|a| a.uv()).collect::<Vec<_>>();
        assert_eq!(compute_dot_anchors(value, 1.0).unwrap(), points);
    }
}

proptest! {
    /// Same arguments, same points in the same order
    #[test]
    fn layout_is_deterministic(value in valid_value(), factor in 0.0..=1.0f64) {
        let first = compute_dot_anchors(value, factor).unwrap();
        let second = compute_dot_anchors(value, factor).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Anything outside 1..=6 fails and names the value
    #[test]
    fn out_of_range_values_fail(value in invalid_value(), factor in 0.0..=1.0f64) {
        let report = compute_dot_anchors(value, factor).unwrap_err();
        prop_assert_eq!(report.current_context(), &DieFaceError::InvalidFaceValue(value));
    }

    /// Lowering the factor pulls every off-centre pip strictly closer to the centroid
    #[test]
    fn coalescing_is_monotonic(value in 2..=6i32, high in 0.0..=1.0f64, low in 0.0..=1.0f64) {
        prop_assume!(high - low > 1e-9);
        let spread = compute_dot_anchors(value, high).unwrap();
        let packed = compute_dot_anchors(value, low).unwrap();
        let canonical = compute_dot_anchors(value, 1.0).unwrap();
        for ((s, p), c) in spread.iter().zip(&packed).zip(&canonical) {
            if *c == CENTROID {
                prop_assert_eq!(*s, CENTROID);
                prop_assert_eq!(*p, CENTROID);
            } else {
                prop_assert!(p.distance_squared(CENTROID) < s.distance_squared(CENTROID));
            }
        }
    }

    /// Coalesced pips stay inside the unit square
    #[test]
    fn pips_stay_on_the_face(value in valid_value(), factor in 0.0..=1.0f64) {
        for p in compute_dot_anchors(value, factor).unwrap() {
            prop_assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
        }
    }

    /// Factors outside [0, 1] are refused, not clamped
    #[test]
    fn factors_outside_unit_range_fail(value in valid_value(), factor in prop_oneof![-10.0..-1e-9f64, 1.000001..10.0f64]) {
        let report = compute_dot_anchors(value, factor).unwrap_err();
        prop_assert_eq!(report.current_context(), &DieFaceError::InvalidCoalesceFactor(factor));
    }
}

#[test]
fn zero_factor_collapses_everything() {
    for value in 1..=6 {
        let points = compute_dot_anchors(value, 0.0).unwrap();
        assert_eq!(points.len(), value as usize);
        assert!(points.iter().all(|p| *p == CENTROID));
    }
}
