use super::{Behaviour, Point, Renderable, RenderableBuilderError, RenderableParams, Rgba};
use crate::dieface::{DieFace, DieFaceStyle};
use crate::palette::with_opacity;
use crate::scene::Img;
use crate::tools::keyframing::KeyFrames;
use error_stack::{Result, ResultExt};
use error_stack_derive::ErrorStack;
use std::time::Duration;
use tracing::warn;

/// Shades a [`DieFace`], optionally animating its pip coalescing and its opacity.
#[derive(Clone)]
pub struct DieFaceBehaviour {
    face: DieFace,
    coalesce: Option<Box<dyn KeyFrames<Value = f64>>>,
    opacity: Option<Box<dyn KeyFrames<Value = f64>>>,
    current_opacity: f64,
}

impl DieFaceBehaviour {
    pub fn new(face: DieFace) -> Self {
        Self {
            face,
            coalesce: None,
            opacity: None,
            current_opacity: 1.0,
        }
    }
    pub fn with_coalesce(mut self, keyframes: Box<dyn KeyFrames<Value = f64>>) -> Self {
        self.coalesce = Some(keyframes);
        self
    }
    pub fn with_opacity(mut self, keyframes: Box<dyn KeyFrames<Value = f64>>) -> Self {
        self.opacity = Some(keyframes);
        self
    }
    pub fn face(&self) -> &DieFace {
        &self.face
    }
    /// A square renderable of the face's side length at `position`.
    pub fn into_renderable(self, position: Point<f64>) -> Result<Renderable, RenderableBuilderError> {
        let side = self.face.style().side_length;
        Renderable::builder()
            .with_position(position)
            .with_size(Point::new(side, side))
            .with_behaviour(Box::new(self))
            .build()
    }
}

impl Behaviour for DieFaceBehaviour {
    fn process(&mut self, _params: &mut RenderableParams, time: Duration) {
        if let Some(coalesce) = &self.coalesce {
            let factor = coalesce.get_value(time);
            if factor != self.face.style().dot_coalesce_factor {
                match self.face.with_coalesce_factor(factor) {
                    Ok(face) => self.face = face,
                    Err(report) => warn!(
                        value = self.face.value(),
                        "keeping previous pip layout: {}",
                        report.current_context()
                    ),
                }
            }
        }
        if let Some(opacity) = &self.opacity {
            self.current_opacity = opacity.get_value(time).clamp(0.0, 1.0);
        }
    }
    fn get_pixel(&self, _current_frame: &Img, uv_coords: Point<f64>, _time: Duration) -> Rgba<u8> {
        with_opacity(self.face.color_at(uv_coords), self.current_opacity)
    }
}

#[derive(Debug, ErrorStack)]
#[error_message("Failed to lay out a row of die faces")]
pub struct DieFaceRowError;

/// A horizontal line of faces, `buff` pixels apart.
#[derive(Debug, Clone, PartialEq)]
pub struct DieFaceRow {
    pub values: Vec<i32>,
    pub style: DieFaceStyle,
    pub buff: f64,
}

impl Default for DieFaceRow {
    fn default() -> Self {
        let style = DieFaceStyle::default();
        Self {
            values: (1..=6).collect(),
            buff: style.side_length * 0.5,
            style,
        }
    }
}

impl DieFaceRow {
    pub fn width(&self) -> f64 {
        let n = self.values.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        n * self.style.side_length + (n - 1.0) * self.buff
    }
}

/// Builds a group holding one face per value, the whole row centred on `center`.
///
/// `decorate` gets every face's behaviour before it is placed, so callers can attach keyframes.
pub fn die_face_row<F>(row: &DieFaceRow, center: Point<f64>, decorate: F) -> Result<Renderable, DieFaceRowError>
where
    F: Fn(DieFaceBehaviour) -> DieFaceBehaviour,
{
    let side = row.style.side_length;
    let top_left = center - Point::new(row.width() / 2.0, side / 2.0);
    let mut group = Renderable::group(top_left);
    for (i, value) in row.values.iter().copied().enumerate() {
        let face = DieFace::new(value, row.style)
            .change_context(DieFaceRowError)
            .attach_printable_lazy(|| format!("Face {} of the row could not be built", i))?;
        let renderable = decorate(DieFaceBehaviour::new(face))
            .into_renderable(Point::new(i as f64 * (side + row.buff), 0.0))
            .change_context(DieFaceRowError)?;
        group.add_child_simple(renderable);
    }
    Ok(group)
}
