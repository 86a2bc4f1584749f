use std::path::{Path, PathBuf};

use kurbo::Rect;
use rusttype::{Font, Scale, point};

use crate::{
    canvas::Canvas,
    color::Color,
    error::{CardError, CardResult},
    wrap,
};

/// Probed in order when no font is given on the command line.
pub const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoMono-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
];

/// Extra line spacing between body text lines, in pixels.
const LINE_SPACING: f32 = 4.0;

pub fn resolve_font_path(explicit: Option<&Path>) -> CardResult<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(CardError::asset_not_found(format!(
            "font '{}' does not exist",
            path.display()
        )));
    }

    FONT_SEARCH_PATHS
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            CardError::asset_not_found("no usable font found; pass one with --font")
        })
}

pub fn load_font(path: &Path) -> CardResult<Font<'static>> {
    let bytes = std::fs::read(path).map_err(|e| {
        CardError::asset_not_found(format!("cannot read font '{}': {e}", path.display()))
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| {
        CardError::asset_not_found(format!("'{}' is not a usable font", path.display()))
    })
}

/// One font at the three sizes the card layout uses.
pub struct TypeSet {
    pub font: Font<'static>,
    pub big: Scale,
    pub medium: Scale,
    pub small: Scale,
}

impl TypeSet {
    pub fn load(path: &Path, cell: f64) -> CardResult<Self> {
        let font = load_font(path)?;
        let (big, medium, small) = scales(cell);
        Ok(Self {
            font,
            big,
            medium,
            small,
        })
    }
}

/// Big = one grid cell; the smaller sizes keep the original ratios.
fn scales(cell: f64) -> (Scale, Scale, Scale) {
    let cell = cell as f32;
    (
        Scale::uniform(cell),
        Scale::uniform(cell / 1.2),
        Scale::uniform(cell / 1.8),
    )
}

/// Advance width of `text` at `scale`, in pixels.
pub fn text_width(font: &Font<'_>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Ink bounding box of `text` laid out with the baseline at the font's
/// ascent, so `min.y` is the gap between the draw origin and the first
/// inked row.
fn ink_bounds(font: &Font<'_>, scale: Scale, text: &str) -> Option<(f32, f32, f32, f32)> {
    let ascent = font.v_metrics(scale).ascent;
    let mut bounds: Option<(f32, f32, f32, f32)> = None;
    for g in font.layout(text, scale, point(0.0, ascent)) {
        let Some(bb) = g.pixel_bounding_box() else {
            continue;
        };
        let (x0, y0, x1, y1) = (
            bb.min.x as f32,
            bb.min.y as f32,
            bb.max.x as f32,
            bb.max.y as f32,
        );
        bounds = Some(match bounds {
            None => (x0, y0, x1, y1),
            Some((a, b, c, d)) => (a.min(x0), b.min(y0), c.max(x1), d.max(y1)),
        });
    }
    bounds
}

/// Rasterize one line with its baseline at `(x, baseline_y)`.
fn draw_line(canvas: &mut Canvas, font: &Font<'_>, scale: Scale, x: f32, baseline_y: f32, text: &str, color: Color) {
    for g in font.layout(text, scale, point(x, baseline_y)) {
        let Some(bb) = g.pixel_bounding_box() else {
            continue;
        };
        g.draw(|gx, gy, v| {
            let px = i64::from(bb.min.x) + i64::from(gx);
            let py = i64::from(bb.min.y) + i64::from(gy);
            canvas.blend_pixel(px, py, color.to_premul_coverage(v));
        });
    }
}

/// Draw `text` centered in `rect`.
///
/// Vertical centering always; horizontal only when `horizontal` is set,
/// otherwise the text sits one em in from the left edge. The text rides
/// slightly high of true center, which reads better in the bars.
pub fn draw_centered(
    canvas: &mut Canvas,
    font: &Font<'_>,
    scale: Scale,
    rect: Rect,
    text: &str,
    color: Color,
    horizontal: bool,
) {
    let Some((ix0, iy0, ix1, iy1)) = ink_bounds(font, scale, text) else {
        return;
    };
    let em = text_width(font, scale, "T");
    let ascent = font.v_metrics(scale).ascent;

    let text_w = ix1 - ix0;
    let text_h = iy1 - iy0;
    let x_off = if horizontal {
        (rect.width() as f32 - text_w) / 2.0
    } else {
        em
    };
    let y_off = (rect.height() as f32 - text_h) / 2.0 - em / 5.0;

    let origin_x = rect.x0 as f32 + x_off - ix0;
    let baseline_y = rect.y0 as f32 + y_off + ascent - iy0;
    draw_line(canvas, font, scale, origin_x, baseline_y, text, color);
}

/// Word-wrap `text` into `rect` (inset by one em on all sides) and draw
/// it top-aligned. Overflow is logged, not an error.
pub fn draw_body(
    canvas: &mut Canvas,
    font: &Font<'_>,
    scale: Scale,
    rect: Rect,
    text: &str,
    color: Color,
) {
    let em = f64::from(text_width(font, scale, "T"));
    let inner = Rect::new(rect.x0 + em, rect.y0 + em, rect.x1 - em, rect.y1 - em);

    let lines = wrap::wrap_words(text, inner.width() as f32, |s| text_width(font, scale, s));

    let vm = font.v_metrics(scale);
    let line_height = vm.ascent - vm.descent + vm.line_gap + LINE_SPACING;

    let total_height = lines.len() as f32 * line_height;
    if f64::from(total_height) > inner.height() {
        tracing::warn!(
            "too much text to fit in bounding box: {total_height} > {}",
            inner.height()
        );
    }

    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let baseline_y = inner.y0 as f32 + vm.ascent + i as f32 * line_height;
        draw_line(canvas, font, scale, inner.x0 as f32, baseline_y, line, color);
    }
}
