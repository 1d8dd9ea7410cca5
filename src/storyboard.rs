//! Scenes of the dice storyboard.
use crate::config::RenderConfig;
use crate::renderable::die_face::{die_face_row, DieFaceBehaviour, DieFaceRow};
use crate::scene::Scene;
use crate::tools::keyframing::SmoothKeyframes;
use crate::Point;
use error_stack::{Result, ResultExt};
use error_stack_derive::ErrorStack;
use tracing::debug;

/// Gap between neighbouring faces, relative to the side length.
pub const FACE_BUFF_RATIO: f64 = 0.5;

#[derive(Debug, ErrorStack)]
#[error_message("Failed to build a storyboard scene")]
pub struct StoryboardError;

fn frame_center(config: &RenderConfig) -> Point<f64> {
    config.resolution.map_both(|v| v as f64) / 2.0
}

fn row_for(config: &RenderConfig, values: Vec<i32>) -> DieFaceRow {
    let style = config.scaled_style();
    DieFaceRow {
        values,
        buff: style.side_length * FACE_BUFF_RATIO,
        style,
    }
}

fn scene_with_row<F>(config: &RenderConfig, row: &DieFaceRow, decorate: F) -> Result<Scene, StoryboardError>
where
    F: Fn(DieFaceBehaviour) -> DieFaceBehaviour,
{
    let group = die_face_row(row, frame_center(config), decorate)
        .change_context(StoryboardError)
        .attach_printable_lazy(|| format!("Could not lay out faces {:?}", row.values))?;
    Scene::builder()
        .with_resolution(config.resolution)
        .with_fps(config.fps)
        .with_length(config.length)
        .with_output_filename(&config.output)
        .with_background(config.background)
        .with_mp4(config.mp4)
        .add_child(group)
        .build()
        .change_context(StoryboardError)
}

/// Six faces fade in over the first second, then their pips coalesce from the corners to
/// the configured factor during the next second.
pub fn intro_scene(config: &RenderConfig) -> Result<Scene, StoryboardError> {
    intro_row_scene(config, (1..=6).collect())
}

/// The intro animation applied to any row of faces.
pub fn intro_row_scene(config: &RenderConfig, values: Vec<i32>) -> Result<Scene, StoryboardError> {
    let row = row_for(config, values);
    let target = row.style.dot_coalesce_factor;
    debug!(values = ?row.values, side = row.style.side_length, target, "building intro scene");
    scene_with_row(config, &row, |behaviour| {
        behaviour
            .with_opacity(Box::new(SmoothKeyframes::new(vec![(0.0, 0.0), (1.0, 1.0)])))
            .with_coalesce(Box::new(SmoothKeyframes::new(vec![(1.0, 1.0), (2.0, target)])))
    })
}

/// A static row of faces, for stills.
pub fn die_faces_scene(config: &RenderConfig, values: Vec<i32>) -> Result<Scene, StoryboardError> {
    let row = row_for(config, values);
    debug!(values = ?row.values, "building die faces scene");
    scene_with_row(config, &row, |behaviour| behaviour)
}
