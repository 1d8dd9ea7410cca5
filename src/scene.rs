use error_stack::{IntoReport, Report, Result, ResultExt};
use error_stack_derive::ErrorStack;

use ffmpeg_sidecar::command::FfmpegCommand;
use image::{Rgba, RgbaImage};
use std::fs::DirBuilder;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info};

use super::encoding::{blend_over, flatten, rgba_to_yuv};
use super::palette::BLACK;
use super::renderable::*;
use super::Point;
use openh264::encoder::{Encoder, EncoderConfig, RateControlMode};

#[derive(Clone)]
pub struct Img {
    pub dimensions: Point<usize>,
    pub image: RgbaImage,
}

impl Img {
    pub fn new(dimensions: Point<usize>) -> Self {
        Self {
            dimensions,
            image: RgbaImage::new(dimensions.x as u32, dimensions.y as u32),
        }
    }
    pub fn get_pixel(&self, point: Point<usize>) -> Rgba<u8> {
        *self.image.get_pixel(point.x as u32, point.y as u32)
    }
    pub fn set_pixel(&mut self, point: Point<usize>, color: Rgba<u8>) {
        self.image.put_pixel(point.x as u32, point.y as u32, color);
    }
}

#[derive(ErrorStack, Debug)]
#[error_message("An error occured while rendering a scene")]
pub enum SceneRenderingError {
    FileWritingError,
    FrameRenderingError,
    EncodingError,
    FFMPEGError,
}

pub struct Scene {
    children: Vec<Arc<RwLock<Renderable>>>,
    resolution: Point<usize>,
    fps: usize,
    length: Duration,
    output_filename: PathBuf,
    background: Rgba<u8>,
    mp4: bool,
}

impl Scene {
    pub fn builder() -> SceneBuilder {
        SceneBuilder {
            children: vec![],
            resolution: Some(Point::new(1280, 720)),
            fps: Some(30),
            length: None,
            output_filename: Some(PathBuf::from("output/scene.h264")),
            background: BLACK,
            mp4: false,
        }
    }
    pub fn frame_count(&self) -> usize {
        (self.length.as_secs_f64() * self.fps as f64).round() as usize
    }
    pub fn frame_time(&self, frame_indx: usize) -> Duration {
        Duration::from_secs_f64(frame_indx as f64 / self.fps as f64)
    }
    fn render_frames(&self) -> Result<Vec<u8>, SceneRenderingError> {
        let max_frames = self.frame_count();
        let mut video_bytes: Vec<u8> = vec![];
        let mut encoder = Encoder::with_config(
            EncoderConfig::new(self.resolution.x as u32, self.resolution.y as u32)
                .max_frame_rate(self.fps as f32)
                .rate_control_mode(RateControlMode::Off),
        )
        .into_report()
        .change_context(SceneRenderingError::EncodingError)
        .attach_printable_lazy(|| "Failed to create encoder")?;
        for frame_indx in 0..max_frames {
            let time = self.frame_time(frame_indx);
            let frame = self
                .render_frame(time)
                .attach_printable_lazy(|| {
                    format!(
                        "Failed to render frame {} at time {} seconds",
                        frame_indx,
                        time.as_secs_f64()
                    )
                })?;
            encoder
                .encode(&rgba_to_yuv(&frame, self.background))
                .into_report()
                .change_context(SceneRenderingError::EncodingError)
                .attach_printable_lazy(|| format!("Failed to encode frame {}", frame_indx))?
                .write_vec(&mut video_bytes);
            debug!(frame = frame_indx, total = max_frames, "encoded frame");
        }
        Ok(video_bytes)
    }
    /// Renders the scene at `time`. Pixels nothing was drawn on stay transparent.
    pub fn render_frame(&self, time: Duration) -> Result<RgbaImage, SceneRenderingError> {
        let mut img_buffer = Img::new(self.resolution);
        // (offset, child), popped depth first so parents are drawn under their children
        let mut stack: Vec<(Point<f64>, Arc<RwLock<Renderable>>)> = self
            .children
            .iter()
            .rev()
            .map(|c| (Point::new(0.0, 0.0), Arc::clone(c)))
            .collect();
        while let Some((parent_offset, entry)) = stack.pop() {
            let mut child = entry
                .write()
                .map_err(|_| Report::new(SceneRenderingError::FrameRenderingError))
                .attach_printable("A renderable lock was poisoned")?;
            child.run_behaviour(time);

            let params = &child.params;
            let top_left = parent_offset + params.position;
            params
                .get_children()
                .iter()
                .rev()
                .for_each(|c| stack.push((top_left, Arc::clone(c))));

            let bottom_right = top_left + params.size;
            if bottom_right.x <= top_left.x || bottom_right.y <= top_left.y {
                continue;
            }
            let clip = |v: f64, max: usize| v.floor().clamp(0.0, max as f64) as usize;
            let (x0, x1) = (clip(top_left.x, self.resolution.x), clip(bottom_right.x.ceil(), self.resolution.x));
            let (y0, y1) = (clip(top_left.y, self.resolution.y), clip(bottom_right.y.ceil(), self.resolution.y));

            let shaded = (y0..y1)
                .flat_map(|y| (x0..x1).map(move |x| Point::new(x, y)))
                .map(|p| {
                    let center = Point::new(p.x as f64 + 0.5, p.y as f64 + 0.5);
                    let uv = to_uv(top_left, bottom_right, center);
                    (p, uv)
                })
                .filter(|(_, uv)| (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y))
                .map(|(p, uv)| (p, child.run_shader(&img_buffer, uv, time)))
                .collect::<Vec<_>>();
            for (p, color) in shaded {
                let current = img_buffer.get_pixel(p);
                img_buffer.set_pixel(p, blend_over(color, current));
            }
        }
        Ok(img_buffer.image)
    }
    fn write_video(&self, bytes: Vec<u8>) -> Result<PathBuf, SceneRenderingError> {
        let path = self.output_filename.with_extension("h264");
        create_parent_dir(&path)?;
        std::fs::write(&path, bytes)
            .into_report()
            .change_context(SceneRenderingError::FileWritingError)
            .attach_printable_lazy(|| format!("Failed to write video file {}", path.display()))?;
        Ok(path)
    }
    fn run_ffmpeg_cmd(&self, path: &Path) -> Result<PathBuf, SceneRenderingError> {
        let mp4_path = path.with_extension("mp4");
        let fps = self.fps.to_string();
        let (input, output) = (path.to_string_lossy(), mp4_path.to_string_lossy());
        let status = FfmpegCommand::new()
            .args(["-hide_banner", "-loglevel", "error", "-nostats", "-y"])
            .args(["-framerate", fps.as_str()])
            .input(&*input)
            .args(["-c:v", "copy"])
            .output(&*output)
            .spawn()
            .into_report()
            .change_context(SceneRenderingError::FFMPEGError)
            .attach_printable_lazy(|| "Failed to spawn ffmpeg")?
            .wait()
            .into_report()
            .change_context(SceneRenderingError::FFMPEGError)
            .attach_printable_lazy(|| "ffmpeg did not run to completion")?;
        if !status.success() {
            return Err(Report::new(SceneRenderingError::FFMPEGError))
                .attach_printable_lazy(|| format!("ffmpeg exited with {}", status));
        }
        Ok(mp4_path)
    }
    /// Encodes every frame and returns the path of the written video.
    pub fn render(&self) -> Result<PathBuf, SceneRenderingError> {
        info!(
            frames = self.frame_count(),
            width = self.resolution.x,
            height = self.resolution.y,
            "rendering scene"
        );
        let bytes = self
            .render_frames()
            .attach_printable_lazy(|| "Failed to render frames")?;
        let h264 = self.write_video(bytes)?;
        let output = if self.mp4 {
            self.run_ffmpeg_cmd(&h264)?
        } else {
            h264
        };
        info!(path = %output.display(), "scene rendered");
        Ok(output)
    }
    /// Writes the frame at `time` to `path`, flattened against the background.
    pub fn render_still<P: AsRef<Path> + ?Sized>(&self, time: Duration, path: &P) -> Result<(), SceneRenderingError> {
        let path = path.as_ref();
        let frame = self.render_frame(time)?;
        create_parent_dir(path)?;
        flatten(&frame, self.background)
            .save(path)
            .into_report()
            .change_context(SceneRenderingError::FileWritingError)
            .attach_printable_lazy(|| format!("Failed to save still {}", path.display()))?;
        info!(path = %path.display(), "still written");
        Ok(())
    }
}

fn create_parent_dir(path: &Path) -> Result<(), SceneRenderingError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => DirBuilder::new()
            .recursive(true)
            .create(parent)
            .into_report()
            .change_context(SceneRenderingError::FileWritingError)
            .attach_printable_lazy(|| format!("Failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}

#[derive(ErrorStack, Debug)]
#[error_message("Not all builder requirements were fullfilled")]
pub struct SceneBuilderError;

pub struct SceneBuilder {
    children: Vec<Arc<RwLock<Renderable>>>,
    resolution: Option<Point<usize>>,
    fps: Option<usize>,
    length: Option<Duration>,
    output_filename: Option<PathBuf>,
    background: Rgba<u8>,
    mp4: bool,
}

impl SceneBuilder {
    pub fn with_resolution(&mut self, resolution: Point<usize>) -> &mut Self {
        self.resolution = Some(resolution);
        self
    }
    pub fn with_fps(&mut self, fps: usize) -> &mut Self {
        self.fps = Some(fps);
        self
    }
    pub fn with_length(&mut self, length: Duration) -> &mut Self {
        self.length = Some(length);
        self
    }
    pub fn with_output_filename<P: AsRef<Path> + ?Sized>(&mut self, output_filename: &P) -> &mut Self {
        self.output_filename = Some(output_filename.as_ref().to_path_buf());
        self
    }
    pub fn with_background(&mut self, background: Rgba<u8>) -> &mut Self {
        self.background = background;
        self
    }
    /// Also wrap the encoded stream in an mp4 container through ffmpeg.
    pub fn with_mp4(&mut self, mp4: bool) -> &mut Self {
        self.mp4 = mp4;
        self
    }
    pub fn add_child(&mut self, child: Renderable) -> &mut Self {
        self.children.push(Arc::new(RwLock::new(child)));
        self
    }
    pub fn build(&mut self) -> Result<Scene, SceneBuilderError> {
        let mut problems: Vec<&'static str> = vec![];
        match self.resolution {
            None => problems.push("No resolution was set"),
            Some(r) if r.x == 0 || r.y == 0 => problems.push("Resolution must be non-zero"),
            _ => {}
        }
        match self.fps {
            None => problems.push("No fps was set"),
            Some(0) => problems.push("Fps must be non-zero"),
            _ => {}
        }
        if self.length.is_none() {
            problems.push("No length was set");
        }
        if self.output_filename.is_none() {
            problems.push("No output filename was set");
        }

        match (self.resolution, self.fps, self.length, self.output_filename.take()) {
            (Some(resolution), Some(fps), Some(length), Some(output_filename)) if problems.is_empty() => {
                Ok(Scene {
                    children: std::mem::take(&mut self.children),
                    resolution,
                    fps,
                    length,
                    output_filename,
                    background: self.background,
                    mp4: self.mp4,
                })
            }
            (_, _, _, output_filename) => {
                self.output_filename = output_filename;
                Err(problems
                    .into_iter()
                    .fold(Report::new(SceneBuilderError), |report, problem| {
                        report.attach_printable(problem)
                    }))
            }
        }
    }
}

pub fn to_uv(top_left: Point<f64>, bottom_right: Point<f64>, point: Point<f64>) -> Point<f64> {
    Point::new(
        (point.x - top_left.x) / (bottom_right.x - top_left.x),
        1.0 - (point.y - top_left.y) / (bottom_right.y - top_left.y), // image rows grow downward
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Solid(Rgba<u8>);

    impl Behaviour for Solid {
        fn process(&mut self, _: &mut RenderableParams, _: Duration) {}
        fn get_pixel(&self, _: &Img, _: Point<f64>, _: Duration) -> Rgba<u8> {
            self.0
        }
    }

    fn solid(position: Point<f64>, size: Point<f64>, color: Rgba<u8>) -> Renderable {
        Renderable::builder()
            .with_position(position)
            .with_size(size)
            .with_behaviour(Box::new(Solid(color)))
            .build()
            .unwrap()
    }

    #[test]
    fn uv_flips_y() {
        let uv = to_uv(Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(2.5, 2.5));
        assert_eq!(uv, Point::new(0.25, 0.75));
    }

    #[test]
    fn builder_requires_length() {
        assert!(Scene::builder().build().is_err());
        assert!(Scene::builder().with_length(Duration::from_secs(1)).with_fps(0).build().is_err());
        let scene = Scene::builder().with_length(Duration::from_millis(1500)).build().unwrap();
        assert_eq!(scene.frame_count(), 45);
    }

    #[test]
    fn children_are_drawn_over_parents_with_offsets() {
        let red = Rgba([255, 0, 0, 255]);
        let blue = Rgba([0, 0, 255, 255]);
        let mut parent = solid(Point::new(1.0, 1.0), Point::new(4.0, 4.0), red);
        parent.add_child_simple(solid(Point::new(1.0, 1.0), Point::new(1.0, 1.0), blue));
        let scene = Scene::builder()
            .with_resolution(Point::new(8, 8))
            .with_length(Duration::from_secs(1))
            .add_child(parent)
            .build()
            .unwrap();
        let frame = scene.render_frame(Duration::ZERO).unwrap();
        assert_eq!(*frame.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*frame.get_pixel(1, 1), red);
        assert_eq!(*frame.get_pixel(2, 2), blue);
        assert_eq!(*frame.get_pixel(4, 4), red);
        assert_eq!(*frame.get_pixel(5, 5), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn offscreen_renderables_are_clipped() {
        let scene = Scene::builder()
            .with_resolution(Point::new(4, 4))
            .with_length(Duration::from_secs(1))
            .add_child(solid(Point::new(-2.0, 2.0), Point::new(10.0, 10.0), Rgba([1, 2, 3, 255])))
            .build()
            .unwrap();
        let frame = scene.render_frame(Duration::ZERO).unwrap();
        assert_eq!(*frame.get_pixel(3, 3), Rgba([1, 2, 3, 255]));
        assert_eq!(*frame.get_pixel(0, 1), Rgba([0, 0, 0, 0]));
    }
}
