use super::{locate, Curve, Segment};

use num_traits::Float;

/// A curve that can be built from a list of `(t, value)` key points.
pub trait ChainableCurve: Curve {
    fn new(data: Vec<(<Self as Curve>::Value, <Self as Curve>::Value)>) -> Self;
}

#[derive(Clone, Debug)]
pub struct LinearPiecewiseCurve<T: Float + Send + Sync>(pub Vec<(T, T)>);

impl<T: Float + Send + Sync> Curve for LinearPiecewiseCurve<T> {
    type Value = T;
    fn get_value(&self, t: T) -> T {
        match locate(&self.0, t) {
            Segment::Empty => T::nan(),
            Segment::Hold(v) => v,
            Segment::Between((t0, v0), (t1, v1)) => v0 + (v1 - v0) * (t - t0) / (t1 - t0),
        }
    }
}

impl<T: Float + Send + Sync> ChainableCurve for LinearPiecewiseCurve<T> {
    fn new(data: Vec<(T, T)>) -> Self {
        LinearPiecewiseCurve(data)
    }
}

/// Eases in and out of every key point: accelerates over the first half of a segment and
/// decelerates over the second, reaching the next value with zero speed.
#[derive(Clone, Debug)]
pub struct SmoothCurve<T: Float + Send + Sync>(pub Vec<(T, T)>);

impl<T: Float + Send + Sync> Curve for SmoothCurve<T> {
    type Value = T;
    fn get_value(&self, t: T) -> T {
        match locate(&self.0, t) {
            Segment::Empty => T::nan(),
            Segment::Hold(v) => v,
            Segment::Between((t0, v0), (t1, v1)) => {
                let one = T::one();
                let two = one + one;
                let s = (t - t0) / (t1 - t0);
                let eased = if s < one / two {
                    two * s * s
                } else {
                    one - two * (one - s) * (one - s)
                };
                v0 + (v1 - v0) * eased
            }
        }
    }
}

impl<T: Float + Send + Sync> ChainableCurve for SmoothCurve<T> {
    fn new(data: Vec<(T, T)>) -> Self {
        SmoothCurve(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_interpolates_and_holds_ends() {
        let curve = LinearPiecewiseCurve(vec![(1.0, 0.0), (3.0, 1.0)]);
        assert_eq!(curve.get_value(0.0), 0.0);
        assert_eq!(curve.get_value(2.0), 0.5);
        assert_eq!(curve.get_value(10.0), 1.0);
    }

    #[test]
    fn linear_picks_the_right_segment() {
        let curve = LinearPiecewiseCurve(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 3.0)]);
        assert_eq!(curve.get_value(1.0), 1.0);
        assert_eq!(curve.get_value(1.5), 2.0);
    }

    #[test]
    fn smooth_is_symmetric_and_monotonic() {
        let curve = SmoothCurve(vec![(0.0, 1.0), (1.0, 0.5)]);
        assert_eq!(curve.get_value(0.5), 0.75);
        let samples = (0..=10).map(|i| curve.get_value(i as f64 / 10.0)).collect::<Vec<_>>();
        assert!(samples.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[10], 0.5);
    }

    #[test]
    fn empty_curve_is_nan() {
        assert!(LinearPiecewiseCurve::<f64>(vec![]).get_value(0.0).is_nan());
    }
}
