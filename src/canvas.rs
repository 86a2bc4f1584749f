use std::path::Path;

use crate::{
    color::Color,
    composite::{self, PremulRgba8},
    error::{CardError, CardResult},
};

/// Mutable pixel buffer for one render call.
///
/// Premultiplied RGBA8, row-major, tightly packed. Un-premultiplied
/// only when the buffer is encoded to a file.
#[derive(Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let px = background.to_premul();
        let data = px.repeat((width as usize) * (height as usize));
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_rgba8_premul(width: u32, height: u32, data: Vec<u8>) -> CardResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CardError::invalid_argument("canvas size overflow"))?;
        if data.len() != expected {
            return Err(CardError::invalid_argument(
                "canvas buffer must be width*height*4 bytes",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> PremulRgba8 {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Overwrite a pixel, ignoring writes outside the canvas.
    pub fn put_pixel(&mut self, x: i64, y: i64, px: PremulRgba8) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Source-over blend a pixel, ignoring writes outside the canvas.
    pub fn blend_pixel(&mut self, x: i64, y: i64, src: PremulRgba8) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.index(x as u32, y as u32);
        let dst = [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]];
        self.data[i..i + 4].copy_from_slice(&composite::over(dst, src));
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Straight-alpha copy for encoding.
    pub fn to_image(&self) -> image::RgbaImage {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
                continue;
            }
            for c in px.iter_mut().take(3) {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, out)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Encode to `path` in the format implied by its extension.
    pub fn save(&self, path: &Path) -> CardResult<()> {
        let format = image::ImageFormat::from_path(path).map_err(|e| {
            CardError::write(format!(
                "unrecognized output format for '{}': {e}",
                path.display()
            ))
        })?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                CardError::write(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }

        tracing::info!("saving card to {}", path.display());

        let img = self.to_image();
        let result = match format {
            // The JPEG encoder rejects alpha.
            image::ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(img)
                .to_rgb8()
                .save_with_format(path, format),
            _ => img.save_with_format(path, format),
        };
        result.map_err(|e| CardError::write(format!("write '{}': {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_with_premultiplied_background() {
        let canvas = Canvas::new(2, 2, Color::rgba(200, 100, 50, 128));
        let px = canvas.pixel(1, 1);
        assert_eq!(px[3], 128);
        assert_eq!(px[0], ((200u16 * 128 + 127) / 255) as u8);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut canvas = Canvas::new(2, 2, Color::rgb(0, 0, 0));
        canvas.put_pixel(-1, 0, [255; 4]);
        canvas.put_pixel(2, 0, [255; 4]);
        canvas.blend_pixel(0, 5, [255; 4]);
        assert!(canvas.data().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn to_image_unpremultiplies() {
        let mut canvas = Canvas::new(1, 1, Color::rgb(0, 0, 0));
        canvas.put_pixel(0, 0, Color::rgba(200, 100, 50, 128).to_premul());
        let img = canvas.to_image();
        let px = img.get_pixel(0, 0).0;
        assert_eq!(px[3], 128);
        assert!((i16::from(px[0]) - 200).abs() <= 1);
        assert!((i16::from(px[1]) - 100).abs() <= 1);
    }

    #[test]
    fn save_png_and_jpeg() {
        let dir = std::path::PathBuf::from("target").join("canvas_tests");
        std::fs::create_dir_all(&dir).unwrap();

        let canvas = Canvas::new(4, 3, Color::rgb(10, 20, 30));

        let png = dir.join("out.png");
        canvas.save(&png).unwrap();
        assert_eq!(image::image_dimensions(&png).unwrap(), (4, 3));

        let jpg = dir.join("out.jpg");
        canvas.save(&jpg).unwrap();
        assert_eq!(image::image_dimensions(&jpg).unwrap(), (4, 3));
    }

    #[test]
    fn save_unknown_extension_is_write_error() {
        let canvas = Canvas::new(1, 1, Color::rgb(0, 0, 0));
        let err = canvas
            .save(Path::new("target/canvas_tests/out.nonsense"))
            .unwrap_err();
        assert!(matches!(err, CardError::Write(_)));
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        assert!(Canvas::from_rgba8_premul(2, 2, vec![0u8; 15]).is_err());
        assert!(Canvas::from_rgba8_premul(2, 2, vec![0u8; 16]).is_ok());
    }
}
