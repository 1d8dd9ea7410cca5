//! Colours used across the storyboard.
use image::Rgba;

pub const WHITE: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
pub const BLACK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xFF]);
pub const GREY_E: Rgba<u8> = Rgba([0x22, 0x22, 0x22, 0xFF]);
pub const BLUE_B: Rgba<u8> = Rgba([0x9C, 0xDC, 0xEB, 0xFF]);
pub const RED_B: Rgba<u8> = Rgba([0xFF, 0x80, 0x80, 0xFF]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Scales the alpha channel by `opacity` (clamped to `[0, 1]`).
pub fn with_opacity(color: Rgba<u8>, opacity: f64) -> Rgba<u8> {
    let Rgba([r, g, b, a]) = color;
    Rgba([r, g, b, (a as f64 * opacity.clamp(0.0, 1.0)).round() as u8])
}
