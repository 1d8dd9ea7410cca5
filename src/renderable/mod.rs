use super::scene::Img;
pub use super::Point;
use error_stack::{Report, Result};
use error_stack_derive::ErrorStack;
pub use image::Rgba;

use dyn_clone::{clone_trait_object, DynClone};
use std::sync::{Arc, RwLock};
use std::time::Duration;

pub mod die_face;

pub trait Behaviour: DynClone + Send + Sync {
    /// Runs once per frame before any pixel of this renderable is shaded.
    fn process(&mut self, params: &mut RenderableParams, time: Duration);
    /// `uv_coords` spans the renderable's rectangle, `(0, 0)` bottom-left to `(1, 1)` top-right.
    fn get_pixel(&self, current_frame: &Img, uv_coords: Point<f64>, time: Duration) -> Rgba<u8>;
}
clone_trait_object!(Behaviour);

/// Draws nothing, only carries children.
#[derive(Clone, Copy, Debug, Default)]
pub struct Group;

impl Behaviour for Group {
    fn process(&mut self, _: &mut RenderableParams, _: Duration) {}
    fn get_pixel(&self, _: &Img, _: Point<f64>, _: Duration) -> Rgba<u8> {
        Rgba([0, 0, 0, 0])
    }
}

#[derive(Clone)]
pub struct Renderable {
    pub params: RenderableParams,
    behaviour: Box<dyn Behaviour>,
}

/// Position and size are in pixels, relative to the parent's top-left corner.
#[derive(Clone)]
pub struct RenderableParams {
    children: Vec<Arc<RwLock<Renderable>>>,
    pub position: Point<f64>,
    pub size: Point<f64>,
}

impl RenderableParams {
    pub fn add_child(&mut self, child: Arc<RwLock<Renderable>>) {
        self.children.push(child);
    }
    pub fn add_child_simple(&mut self, child: Renderable) -> Arc<RwLock<Renderable>> {
        //! Wraps child in an Arc<RwLock<Renderable>>, adds it to children and returns a handle to it
        let arc = Arc::new(RwLock::new(child));
        self.add_child(arc.clone());
        arc
    }
    pub fn get_children(&self) -> &Vec<Arc<RwLock<Renderable>>> {
        &self.children
    }
}

impl Renderable {
    pub fn add_child_simple(&mut self, child: Renderable) -> Arc<RwLock<Renderable>> {
        self.params.add_child_simple(child)
    }
    pub fn get_children(&self) -> &Vec<Arc<RwLock<Renderable>>> {
        self.params.get_children()
    }
    pub fn run_shader(&self, current_frame: &Img, uv_coords: Point<f64>, time: Duration) -> Rgba<u8> {
        self.behaviour.get_pixel(current_frame, uv_coords, time)
    }
    pub fn run_behaviour(&mut self, time: Duration) {
        self.behaviour.process(&mut self.params, time);
    }
    pub fn builder() -> RenderableBuilder {
        RenderableBuilder {
            children: vec![],
            position: Some(Point::new(0.0, 0.0)),
            size: None,
            behaviour: None,
        }
    }
    /// An empty-sized renderable with the [`Group`] behaviour, placed at `position`.
    pub fn group(position: Point<f64>) -> Self {
        Renderable {
            params: RenderableParams {
                children: vec![],
                position,
                size: Point::new(0.0, 0.0),
            },
            behaviour: Box::new(Group),
        }
    }
}

#[derive(ErrorStack, Debug, Clone)]
#[error_message("Not all builder requirements were fullfilled")]
pub struct RenderableBuilderError;

pub struct RenderableBuilder {
    children: Vec<Arc<RwLock<Renderable>>>,
    position: Option<Point<f64>>,
    size: Option<Point<f64>>,
    behaviour: Option<Box<dyn Behaviour>>,
}

impl RenderableBuilder {
    pub fn add_child(&mut self, child: Renderable) -> &mut Self {
        self.children.push(Arc::new(RwLock::new(child)));
        self
    }
    pub fn with_position(&mut self, position: Point<f64>) -> &mut Self {
        self.position = Some(position);
        self
    }
    pub fn with_size(&mut self, size: Point<f64>) -> &mut Self {
        self.size = Some(size);
        self
    }
    pub fn with_behaviour(&mut self, behaviour: Box<dyn Behaviour>) -> &mut Self {
        self.behaviour = Some(behaviour);
        self
    }
    pub fn build(&mut self) -> Result<Renderable, RenderableBuilderError> {
        let mut report: Option<Report<RenderableBuilderError>> = None;
        let mut missing = |message: &'static str| {
            report = Some(match report.take() {
                Some(r) => r.attach_printable(message),
                None => Report::new(RenderableBuilderError).attach_printable(message),
            });
        };
        if self.position.is_none() {
            missing("No position was set");
        }
        if self.size.is_none() {
            missing("No size was set");
        }
        if self.behaviour.is_none() {
            missing("No behaviour was set");
        }
        if let Some(report) = report {
            return Err(report);
        }

        match (self.position, self.size, self.behaviour.take()) {
            (Some(position), Some(size), Some(behaviour)) => Ok(Renderable {
                params: RenderableParams {
                    children: std::mem::take(&mut self.children),
                    position,
                    size,
                },
                behaviour,
            }),
            _ => Err(Report::new(RenderableBuilderError)),
        }
    }
}
