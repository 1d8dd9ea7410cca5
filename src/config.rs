use crate::dieface::DieFaceStyle;
use crate::palette::BLACK;
use crate::Point;
use clap::ValueEnum;
use image::Rgba;
use std::path::PathBuf;
use std::time::Duration;

pub const RESOLUTION_240P: Point<usize> = Point { x: 426, y: 240 };
pub const RESOLUTION_360P: Point<usize> = Point { x: 640, y: 360 };
pub const RESOLUTION_480P: Point<usize> = Point { x: 854, y: 480 };
pub const RESOLUTION_720P: Point<usize> = Point { x: 1280, y: 720 };
pub const RESOLUTION_1080P: Point<usize> = Point { x: 1920, y: 1080 };
pub const RESOLUTION_2K: Point<usize> = Point { x: 2560, y: 1440 };
pub const RESOLUTION_4K: Point<usize> = Point { x: 3840, y: 2160 };
pub const RESOLUTION_8K: Point<usize> = Point { x: 7680, y: 4320 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ResolutionPreset {
    #[value(name = "240p")]
    P240,
    #[value(name = "360p")]
    P360,
    #[value(name = "480p")]
    P480,
    #[default]
    #[value(name = "720p")]
    P720,
    #[value(name = "1080p")]
    P1080,
    #[value(name = "2k")]
    K2,
    #[value(name = "4k")]
    K4,
    #[value(name = "8k")]
    K8,
}

impl ResolutionPreset {
    pub fn resolution(self) -> Point<usize> {
        match self {
            Self::P240 => RESOLUTION_240P,
            Self::P360 => RESOLUTION_360P,
            Self::P480 => RESOLUTION_480P,
            Self::P720 => RESOLUTION_720P,
            Self::P1080 => RESOLUTION_1080P,
            Self::K2 => RESOLUTION_2K,
            Self::K4 => RESOLUTION_4K,
            Self::K8 => RESOLUTION_8K,
        }
    }
}

/// Everything a storyboard scene needs to know about its output.
///
/// `style.side_length` is given for a 720p frame and scaled to `resolution`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub resolution: Point<usize>,
    pub fps: usize,
    pub length: Duration,
    pub output: PathBuf,
    pub mp4: bool,
    pub background: Rgba<u8>,
    pub style: DieFaceStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: RESOLUTION_720P,
            fps: 30,
            length: Duration::from_secs(4),
            output: PathBuf::from("output/intro.h264"),
            mp4: false,
            background: BLACK,
            style: DieFaceStyle::default(),
        }
    }
}

impl RenderConfig {
    /// Ratio between the configured frame height and the 720p reference.
    pub fn scale(&self) -> f64 {
        self.resolution.y as f64 / RESOLUTION_720P.y as f64
    }
    pub fn scaled_style(&self) -> DieFaceStyle {
        DieFaceStyle {
            side_length: self.style.side_length * self.scale(),
            ..self.style
        }
    }
}
