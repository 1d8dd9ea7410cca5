//! Pip layouts for the six faces of a die.
//!
//! Positions live in the face's uv frame: `(0, 0)` is the bottom-left corner
//! and `(1, 1)` the top-right one, the same frame a [`Behaviour`] shades in.
//!
//! [`Behaviour`]: crate::renderable::Behaviour
use crate::palette::{BLUE_B, GREY_E, TRANSPARENT, WHITE};
use crate::Point;
use error_stack::{Context, Report, Result};
use image::Rgba;
use std::fmt::{self, Display, Formatter};

pub const MIN_FACE_VALUE: i32 = 1;
pub const MAX_FACE_VALUE: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DieFaceError {
    InvalidFaceValue(i32),
    InvalidCoalesceFactor(f64),
}

impl Display for DieFaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFaceValue(value) => write!(
                f,
                "invalid die face value {value}, expected an integer between {MIN_FACE_VALUE} and {MAX_FACE_VALUE}"
            ),
            Self::InvalidCoalesceFactor(factor) => {
                write!(f, "invalid dot coalesce factor {factor}, expected a value in [0, 1]")
            }
        }
    }
}

impl Context for DieFaceError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    LeftMid,
    RightMid,
    Center,
}

impl Anchor {
    pub const fn uv(self) -> Point<f64> {
        match self {
            Anchor::TopLeft => Point::new(0.0, 1.0),
            Anchor::TopRight => Point::new(1.0, 1.0),
            Anchor::BottomLeft => Point::new(0.0, 0.0),
            Anchor::BottomRight => Point::new(1.0, 0.0),
            Anchor::LeftMid => Point::new(0.0, 0.5),
            Anchor::RightMid => Point::new(1.0, 0.5),
            Anchor::Center => Point::new(0.5, 0.5),
        }
    }
}

use Anchor::*;

const FACE_ANCHORS: [&[Anchor]; 6] = [
    &[Center],
    &[TopLeft, BottomRight],
    &[TopLeft, Center, BottomRight],
    &[TopLeft, TopRight, BottomLeft, BottomRight],
    &[TopLeft, TopRight, Center, BottomLeft, BottomRight],
    &[TopLeft, TopRight, LeftMid, RightMid, BottomLeft, BottomRight],
];

/// The named anchors of a face, in drawing order.
pub fn face_anchors(value: i32) -> Result<&'static [Anchor], DieFaceError> {
    if !(MIN_FACE_VALUE..=MAX_FACE_VALUE).contains(&value) {
        return Err(Report::new(DieFaceError::InvalidFaceValue(value)));
    }
    Ok(FACE_ANCHORS[(value - MIN_FACE_VALUE) as usize])
}

fn check_coalesce_factor(factor: f64) -> Result<f64, DieFaceError> {
    if factor.is_finite() && (0.0..=1.0).contains(&factor) {
        Ok(factor)
    } else {
        Err(Report::new(DieFaceError::InvalidCoalesceFactor(factor)))
    }
}

/// Centre of the bounding box around `points`.
fn bounding_center(points: &[Point<f64>]) -> Point<f64> {
    let (min, max) = points.iter().fold(
        (
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        ),
        |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        },
    );
    (min + max) / 2.0
}

/// Pip positions for `value`, pulled toward their centre by `coalesce_factor`.
///
/// A factor of `1.0` keeps the pips on the anchors, `0.0` stacks them all on the centre.
/// ```
/// use robust_spn_anim::dieface::{compute_dot_anchors, Anchor};
/// let dots = compute_dot_anchors(2, 1.0).unwrap();
/// assert_eq!(dots, vec![Anchor::TopLeft.uv(), Anchor::BottomRight.uv()]);
/// ```
pub fn compute_dot_anchors(value: i32, coalesce_factor: f64) -> Result<Vec<Point<f64>>, DieFaceError> {
    let anchors = face_anchors(value)?;
    let factor = check_coalesce_factor(coalesce_factor)?;
    let points = anchors.iter().map(|a| a.uv()).collect::<Vec<_>>();
    let center = bounding_center(&points);
    Ok(points
        .into_iter()
        .map(|p| p.scale_about(center, factor))
        .collect())
}

/// How a face is drawn. Lengths other than `side_length` are fractions of the side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieFaceStyle {
    /// In pixels.
    pub side_length: f64,
    pub corner_radius: f64,
    pub stroke_color: Rgba<u8>,
    pub stroke_width: f64,
    pub fill_color: Rgba<u8>,
    pub dot_radius: f64,
    pub dot_color: Rgba<u8>,
    pub dot_coalesce_factor: f64,
}

impl Default for DieFaceStyle {
    fn default() -> Self {
        Self {
            side_length: 100.0,
            corner_radius: 0.15,
            stroke_color: WHITE,
            stroke_width: 0.02,
            fill_color: GREY_E,
            dot_radius: 0.08,
            dot_color: BLUE_B,
            dot_coalesce_factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DieFace {
    value: i32,
    style: DieFaceStyle,
    dots: Vec<Point<f64>>,
}

impl DieFace {
    pub fn new(value: i32, style: DieFaceStyle) -> Result<Self, DieFaceError> {
        let dots = compute_dot_anchors(value, style.dot_coalesce_factor)?;
        Ok(Self { value, style, dots })
    }
    pub fn value(&self) -> i32 {
        self.value
    }
    pub fn style(&self) -> &DieFaceStyle {
        &self.style
    }
    pub fn dot_positions(&self) -> &[Point<f64>] {
        &self.dots
    }
    pub fn with_coalesce_factor(&self, factor: f64) -> Result<Self, DieFaceError> {
        Self::new(
            self.value,
            DieFaceStyle {
                dot_coalesce_factor: factor,
                ..self.style
            },
        )
    }
    /// Colour of the face at `uv`. Pips are drawn over the whole square, stroke included;
    /// elsewhere outside the rounded square is transparent.
    pub fn color_at(&self, uv: Point<f64>) -> Rgba<u8> {
        let style = &self.style;
        let dot_radius_squared = style.dot_radius * style.dot_radius;
        if self
            .dots
            .iter()
            .any(|dot| dot.distance_squared(uv) <= dot_radius_squared)
        {
            return style.dot_color;
        }
        let radius = style.corner_radius.clamp(0.0, 0.5);
        // signed distance to a rounded square of side 1 centred on (0.5, 0.5)
        let q = (uv - Point::new(0.5, 0.5)).abs() - Point::new(0.5 - radius, 0.5 - radius);
        let distance = q.max_scalar(0.0).length() + q.x.max(q.y).min(0.0) - radius;
        if distance > 0.0 {
            return TRANSPARENT;
        }
        if distance >= -style.stroke_width {
            return style.stroke_color;
        }
        style.fill_color
    }
}

/// One face per value, all sharing `style`. Fails on the first invalid value.
pub fn die_faces<I: IntoIterator<Item = i32>>(
    values: I,
    style: DieFaceStyle,
) -> Result<Vec<DieFace>, DieFaceError> {
    values.into_iter().map(|v| DieFace::new(v, style)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uvs(anchors: &[Anchor]) -> Vec<Point<f64>> {
        anchors.iter().map(|a| a.uv()).collect()
    }

    #[test]
    fn three_is_a_diagonal() {
        assert_eq!(
            compute_dot_anchors(3, 1.0).unwrap(),
            uvs(&[TopLeft, Center, BottomRight])
        );
    }

    #[test]
    fn six_uses_side_midpoints() {
        assert_eq!(
            compute_dot_anchors(6, 1.0).unwrap(),
            uvs(&[TopLeft, TopRight, LeftMid, RightMid, BottomLeft, BottomRight])
        );
    }

    #[test]
    fn pip_count_matches_value() {
        for value in 1..=6 {
            assert_eq!(compute_dot_anchors(value, 1.0).unwrap().len(), value as usize);
            assert_eq!(face_anchors(value).unwrap().len(), value as usize);
        }
    }

    #[test]
    fn seven_is_rejected() {
        let report = compute_dot_anchors(7, 1.0).unwrap_err();
        assert_eq!(*report.current_context(), DieFaceError::InvalidFaceValue(7));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for value in [0, 7, -1, i32::MIN, i32::MAX] {
            let report = face_anchors(value).unwrap_err();
            assert_eq!(*report.current_context(), DieFaceError::InvalidFaceValue(value));
        }
    }

    #[test]
    fn invalid_value_wins_over_invalid_factor() {
        let report = compute_dot_anchors(0, 2.0).unwrap_err();
        assert_eq!(*report.current_context(), DieFaceError::InvalidFaceValue(0));
    }

    #[test]
    fn coalesce_factor_outside_unit_range_is_rejected() {
        for factor in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let report = compute_dot_anchors(4, factor).unwrap_err();
            assert!(matches!(
                report.current_context(),
                DieFaceError::InvalidCoalesceFactor(_)
            ));
        }
    }

    #[test]
    fn default_coalesce_halves_the_spread() {
        let dots = compute_dot_anchors(4, 0.5).unwrap();
        assert_eq!(
            dots,
            vec![
                Point::new(0.25, 0.75),
                Point::new(0.75, 0.75),
                Point::new(0.25, 0.25),
                Point::new(0.75, 0.25),
            ]
        );
    }

    #[test]
    fn zero_factor_collapses_to_center() {
        for value in 1..=6 {
            for dot in compute_dot_anchors(value, 0.0).unwrap() {
                assert_eq!(dot, Center.uv());
            }
        }
    }

    #[test]
    fn error_message_names_the_value() {
        assert!(DieFaceError::InvalidFaceValue(9).to_string().contains('9'));
    }

    #[test]
    fn shader_draws_stroke_fill_and_dots() {
        let face = DieFace::new(1, DieFaceStyle::default()).unwrap();
        let style = DieFaceStyle::default();
        assert_eq!(face.color_at(Point::new(0.5, 0.5)), style.dot_color);
        assert_eq!(face.color_at(Point::new(0.5, 0.99)), style.stroke_color);
        assert_eq!(face.color_at(Point::new(0.3, 0.7)), style.fill_color);
        // rounded away
        assert_eq!(face.color_at(Point::new(0.001, 0.001)), TRANSPARENT);
    }

    #[test]
    fn pips_on_the_outline_stay_visible() {
        let style = DieFaceStyle::default();
        let spread = DieFace::new(6, style).unwrap().with_coalesce_factor(1.0).unwrap();
        // LeftMid sits on the stroke band, TopLeft in the rounded-off corner
        assert_eq!(spread.color_at(Point::new(0.01, 0.5)), style.dot_color);
        assert_eq!(spread.color_at(Point::new(0.01, 0.99)), style.dot_color);
        // the band away from any pip is still stroke
        assert_eq!(spread.color_at(Point::new(0.5, 0.99)), style.stroke_color);
    }

    #[test]
    fn with_coalesce_factor_keeps_value_and_style() {
        let face = DieFace::new(5, DieFaceStyle::default()).unwrap();
        let spread = face.with_coalesce_factor(1.0).unwrap();
        assert_eq!(spread.value(), 5);
        assert_eq!(spread.style().dot_coalesce_factor, 1.0);
        assert_eq!(spread.dot_positions()[0], TopLeft.uv());
        assert!(face.with_coalesce_factor(-1.0).is_err());
    }

    #[test]
    fn die_faces_fails_on_first_bad_value() {
        assert_eq!(die_faces(1..=6, DieFaceStyle::default()).unwrap().len(), 6);
        let report = die_faces([1, 8, 0], DieFaceStyle::default()).unwrap_err();
        assert_eq!(*report.current_context(), DieFaceError::InvalidFaceValue(8));
    }
}
