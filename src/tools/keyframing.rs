use super::curves::{ChainableCurve, Curve, LinearPiecewiseCurve, SmoothCurve};
use dyn_clone::{clone_trait_object, DynClone};
use std::time::Duration;

/// A value that changes over scene time.
pub trait KeyFrames: DynClone + Send + Sync {
    type Value: Clone + Send + Sync;
    fn get_value(&self, time: Duration) -> Self::Value;
}

clone_trait_object!(KeyFrames<Value = f64>);

/// Key points given in seconds, interpolated by the curve `C`.
#[derive(Clone, Debug)]
pub struct ScalarKeyFrames<C: Curve<Value = f64>> {
    pub curve: C,
}

impl<C: ChainableCurve<Value = f64> + Clone> ScalarKeyFrames<C> {
    pub fn new(data: Vec<(f64, f64)>) -> Self {
        Self {
            curve: C::new(data),
        }
    }
}

impl<C: Curve<Value = f64> + Clone> KeyFrames for ScalarKeyFrames<C> {
    type Value = f64;
    fn get_value(&self, time: Duration) -> f64 {
        self.curve.get_value(time.as_secs_f64())
    }
}

pub type SmoothKeyframes = ScalarKeyFrames<SmoothCurve<f64>>;
pub type LinearKeyframes = ScalarKeyFrames<LinearPiecewiseCurve<f64>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyframes_read_time_in_seconds() {
        let frames = LinearKeyframes::new(vec![(0.0, 0.0), (2.0, 1.0)]);
        assert_eq!(frames.get_value(Duration::from_millis(500)), 0.25);
        assert_eq!(frames.get_value(Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn boxed_keyframes_clone() {
        let frames: Box<dyn KeyFrames<Value = f64>> =
            Box::new(SmoothKeyframes::new(vec![(0.0, 1.0), (1.0, 0.5)]));
        let copy = frames.clone();
        assert_eq!(copy.get_value(Duration::from_secs(1)), 0.5);
    }
}
