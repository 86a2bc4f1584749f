use kurbo::{Point, Rect};

use crate::{canvas::Canvas, color::Color};

/// Draw a box, optionally with rounded ends and an outline.
///
/// With an outline the box is first inflated by half the outline width
/// so the stroke straddles the nominal edge; adjacent boxes then share
/// a border instead of doubling it. A rounded box takes its corner
/// radius from the box height.
pub fn draw_box(
    canvas: &mut Canvas,
    rect: Rect,
    round: bool,
    fill: Option<Color>,
    outline: Option<Color>,
    width: f64,
) {
    let rect = if outline.is_some() {
        if (width as u32) % 2 != 0 {
            tracing::warn!(
                "box border width should preferably be divisible by two to render properly: {width}"
            );
        }
        rect.inflate(width / 2.0, width / 2.0)
    } else {
        rect
    };

    let radius = if round { rect.height() / 2.3 } else { 0.0 };
    let inner = rect.inflate(-width, -width);
    let inner_radius = (radius - width).max(0.0);

    let fill_px = fill.map(Color::to_premul);
    let outline_px = outline.map(Color::to_premul);

    let x_start = rect.x0.floor().max(0.0) as i64;
    let x_end = rect.x1.ceil().min(f64::from(canvas.width())) as i64;
    let y_start = rect.y0.floor().max(0.0) as i64;
    let y_end = rect.y1.ceil().min(f64::from(canvas.height())) as i64;

    for y in y_start..y_end {
        for x in x_start..x_end {
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if !rounded_contains(rect, radius, p) {
                continue;
            }
            let px = if outline_px.is_some() && !rounded_contains(inner, inner_radius, p) {
                outline_px
            } else {
                fill_px
            };
            if let Some(px) = px {
                canvas.blend_pixel(x, y, px);
            }
        }
    }
}

fn rounded_contains(rect: Rect, radius: f64, p: Point) -> bool {
    if !rect.contains(p) {
        return false;
    }
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    if r <= 0.0 {
        return true;
    }
    // Distance from the nearest corner arc center.
    let cx = p.x.clamp(rect.x0 + r, rect.x1 - r);
    let cy = p.y.clamp(rect.y0 + r, rect.y1 - r);
    let dx = p.x - cx;
    let dy = p.y - cy;
    dx * dx + dy * dy <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(40, 40, Color::rgb(0, 0, 0))
    }

    #[test]
    fn fill_only_covers_the_rect() {
        let mut c = canvas();
        draw_box(
            &mut c,
            Rect::new(10.0, 10.0, 30.0, 30.0),
            false,
            Some(Color::rgb(255, 0, 0)),
            None,
            0.0,
        );
        assert_eq!(c.pixel(20, 20), [255, 0, 0, 255]);
        assert_eq!(c.pixel(5, 5), [0, 0, 0, 255]);
    }

    #[test]
    fn outline_straddles_the_edge() {
        let mut c = canvas();
        draw_box(
            &mut c,
            Rect::new(10.0, 10.0, 30.0, 30.0),
            false,
            Some(Color::rgb(0, 255, 0)),
            Some(Color::rgb(255, 0, 0)),
            4.0,
        );
        // Inflated edge: outline reaches 2px outside the nominal rect.
        assert_eq!(c.pixel(9, 20), [255, 0, 0, 255]);
        // And 2px inside it.
        assert_eq!(c.pixel(11, 20), [255, 0, 0, 255]);
        // Interior is filled.
        assert_eq!(c.pixel(20, 20), [0, 255, 0, 255]);
    }

    #[test]
    fn rounded_corners_stay_unpainted() {
        let mut c = canvas();
        draw_box(
            &mut c,
            Rect::new(5.0, 10.0, 35.0, 30.0),
            true,
            Some(Color::rgb(255, 255, 255)),
            None,
            0.0,
        );
        // The very corner of the bounding rect is outside the rounding.
        assert_eq!(c.pixel(5, 10), [0, 0, 0, 255]);
        // Center is inside.
        assert_eq!(c.pixel(20, 20), [255, 255, 255, 255]);
    }

    #[test]
    fn rounded_contains_is_a_superset_of_the_core_rect() {
        let rect = Rect::new(0.0, 0.0, 30.0, 10.0);
        assert!(rounded_contains(rect, 5.0, Point::new(15.0, 5.0)));
        assert!(rounded_contains(rect, 5.0, Point::new(0.5, 5.0)));
        assert!(!rounded_contains(rect, 5.0, Point::new(0.5, 0.5)));
        assert!(!rounded_contains(rect, 5.0, Point::new(31.0, 5.0)));
    }
}
