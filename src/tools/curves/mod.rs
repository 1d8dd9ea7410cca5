// Piecewise curves through (t, value) key points. Before the first point and after the last
// one the curve holds the end value.
use dyn_clone::{clone_trait_object, DynClone};
use num_traits::Float;

pub mod chainable_curves;

pub use chainable_curves::{ChainableCurve, LinearPiecewiseCurve, SmoothCurve};

pub trait Curve: DynClone + Send + Sync {
    type Value: Float;
    fn get_value(&self, t: Self::Value) -> Self::Value;
}
clone_trait_object!(Curve<Value = f32>);
clone_trait_object!(Curve<Value = f64>);

/// Outcome of locating `t` among sorted key points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Segment<T: Float> {
    Empty,
    Hold(T),
    Between((T, T), (T, T)),
}

pub(crate) fn locate<T: Float>(points: &[(T, T)], t: T) -> Segment<T> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Segment::Empty,
    };
    if points.len() == 1 || t <= first.0 {
        return Segment::Hold(first.1);
    }
    if t >= last.0 {
        return Segment::Hold(last.1);
    }
    // first index whose time is past t, guaranteed to be in 1..len here
    let upper = points.partition_point(|p| p.0 <= t);
    Segment::Between(points[upper - 1], points[upper])
}
