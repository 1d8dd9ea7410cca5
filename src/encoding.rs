use image::{Rgb, RgbImage, Rgba, RgbaImage};
use openh264::formats::YUVBuffer;

/// Source-over compositing of straight (non-premultiplied) alpha colours.
pub(crate) fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_a = src.0[3] as f64 / 255.0;
    let dst_a = dst.0[3] as f64 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        ((src.0[i] as f64 * src_a + dst.0[i] as f64 * dst_a * (1.0 - src_a)) / out_a).round() as u8
    };
    Rgba([channel(0), channel(1), channel(2), (out_a * 255.0).round() as u8])
}

/// Drops alpha by compositing every pixel over an opaque `background`.
pub(crate) fn flatten(image: &RgbaImage, background: Rgba<u8>) -> RgbImage {
    let background = Rgba([background.0[0], background.0[1], background.0[2], 255]);
    let mut ret = RgbImage::new(image.width(), image.height());
    image.enumerate_pixels().for_each(|(x, y, p)| {
        let Rgba([r, g, b, _]) = blend_over(*p, background);
        ret.put_pixel(x, y, Rgb([r, g, b]));
    });
    ret
}

pub(crate) fn rgba_to_yuv(image: &RgbaImage, background: Rgba<u8>) -> YUVBuffer {
    let image = flatten(image, background);
    let (width, height) = image.dimensions();
    YUVBuffer::with_rgb(width as usize, height as usize, image.as_raw().as_slice())
}
