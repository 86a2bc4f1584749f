use kurbo::Rect;

use crate::{assets::PreparedImage, canvas::Canvas};

pub type PremulRgba8 = [u8; 4];

/// Source-over blend of two premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Scale `image` to fill `rect` and blend it onto the canvas.
///
/// Mismatched aspect ratios and upscaling are tolerated but logged, the
/// way a wrong-sized card art should be visible in the run output.
pub fn paste_scaled(canvas: &mut Canvas, rect: Rect, image: &PreparedImage) {
    let dst_w = rect.width().round().max(1.0) as u32;
    let dst_h = rect.height().round().max(1.0) as u32;

    warn_on_mismatch(image.width, image.height, dst_w, dst_h);

    let Some(src) = image::RgbaImage::from_raw(
        image.width,
        image.height,
        image.rgba8_premul.clone(),
    ) else {
        return;
    };

    let scaled = if (image.width, image.height) == (dst_w, dst_h) {
        src
    } else {
        image::imageops::resize(&src, dst_w, dst_h, image::imageops::FilterType::Triangle)
    };

    let x0 = rect.x0.round() as i64;
    let y0 = rect.y0.round() as i64;
    for (x, y, px) in scaled.enumerate_pixels() {
        canvas.blend_pixel(x0 + i64::from(x), y0 + i64::from(y), px.0);
    }
}

fn warn_on_mismatch(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) {
    fn reduce(a: u32, b: u32) -> (u32, u32) {
        fn gcd(a: u32, b: u32) -> u32 {
            if b == 0 { a } else { gcd(b, a % b) }
        }
        let d = gcd(a, b).max(1);
        (a / d, b / d)
    }

    let src_ratio = reduce(src_w, src_h);
    let dst_ratio = reduce(dst_w, dst_h);
    if src_ratio != dst_ratio {
        tracing::warn!(
            "image ratio ({}:{}) does not match the box ratio ({}:{}); image will be scaled",
            src_ratio.0,
            src_ratio.1,
            dst_ratio.0,
            dst_ratio.1
        );
    }
    if dst_w > src_w || dst_h > src_h {
        tracing::warn!(
            "image ({src_w} x {src_h}) is smaller than the box ({dst_w} x {dst_h}); image will be scaled"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn over_src_alpha_0_is_noop() {
        let dst = [10, 20, 30, 40];
        let src = [255, 255, 255, 0];
        assert_eq!(over(dst, src), dst);
    }

    #[test]
    fn over_src_opaque_replaces_dst() {
        let dst = [0, 0, 0, 255];
        let src = [255, 0, 0, 255];
        assert_eq!(over(dst, src), src);
    }

    #[test]
    fn over_dst_transparent_returns_src() {
        let dst = [0, 0, 0, 0];
        let src = [100, 110, 120, 200];
        assert_eq!(over(dst, src), src);
    }

    #[test]
    fn paste_covers_exactly_the_rect() {
        let mut canvas = Canvas::new(10, 10, Color::rgb(0, 0, 0));
        let image = PreparedImage {
            width: 2,
            height: 2,
            rgba8_premul: vec![255u8; 16],
        };
        paste_scaled(&mut canvas, Rect::new(2.0, 2.0, 6.0, 6.0), &image);

        assert_eq!(canvas.pixel(1, 1), [0, 0, 0, 255]);
        assert_eq!(canvas.pixel(2, 2), [255, 255, 255, 255]);
        assert_eq!(canvas.pixel(5, 5), [255, 255, 255, 255]);
        assert_eq!(canvas.pixel(6, 6), [0, 0, 0, 255]);
    }
}
