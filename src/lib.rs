pub use error_stack::{Context, IntoReport, Report, Result, ResultExt};
pub use error_stack_derive::ErrorStack;
pub use point::Point;

pub mod config;
pub mod dieface;
mod encoding;
pub mod palette;
pub mod point;
pub mod probability;
pub mod renderable;
pub mod scene;
pub mod storyboard;
pub mod table;
pub mod tools;

