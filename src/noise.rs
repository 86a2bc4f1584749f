use kurbo::Rect;
use rand::Rng;

use crate::{
    blur,
    canvas::Canvas,
    color::{self, Color},
    error::CardResult,
};

/// Steps in the gradient the noise cells are drawn from.
const GRADIENT_STEPS: usize = 5;

const CIRCLE_MIN_RADIUS: i64 = 50;
const CIRCLE_MAX_RADIUS: i64 = 100;

/// Fill `rect` with a blurred field of gradient-colored cells and a few
/// random circle outlines. The texture of the card frames and of the
/// art box when no art image is given.
///
/// Deterministic for a given RNG state, so seeded runs reproduce the
/// same card bytes.
pub fn noisy_rect(
    canvas: &mut Canvas,
    rect: Rect,
    light: Color,
    dark: Color,
    cell: u32,
    blur_radius: u32,
    rng: &mut impl Rng,
) -> CardResult<()> {
    let w = rect.width().round().max(1.0) as u32;
    let h = rect.height().round().max(1.0) as u32;
    let colors: Vec<[u8; 4]> = color::gradient(light, dark, GRADIENT_STEPS)
        .into_iter()
        .map(Color::to_premul)
        .collect();

    let mut field = vec![0u8; (w as usize) * (h as usize) * 4];

    let cell = cell.max(1);
    for bx in (0..w).step_by(cell as usize) {
        for by in (0..h).step_by(cell as usize) {
            let px = colors[rng.gen_range(0..colors.len())];
            fill_block(&mut field, w, h, bx, by, cell, px);
        }
    }

    // One circle per ~1000 px².
    let count = (w as u64 * h as u64) / 1000;
    for _ in 0..count {
        let cx = rng.gen_range(-CIRCLE_MIN_RADIUS / 2..=i64::from(w) + CIRCLE_MIN_RADIUS / 2);
        let cy = rng.gen_range(-CIRCLE_MIN_RADIUS / 2..=i64::from(h) + CIRCLE_MIN_RADIUS / 2);
        let radius = rng.gen_range(CIRCLE_MIN_RADIUS..=CIRCLE_MAX_RADIUS);
        let px = colors[rng.gen_range(0..colors.len())];
        circle_outline(&mut field, w, h, cx, cy, radius, i64::from(cell), px);
    }

    let field = blur::box_blur_rgba8(&field, w, h, blur_radius)?;

    let x0 = rect.x0.round() as i64;
    let y0 = rect.y0.round() as i64;
    for y in 0..h {
        for x in 0..w {
            let i = ((y as usize) * (w as usize) + (x as usize)) * 4;
            canvas.put_pixel(
                x0 + i64::from(x),
                y0 + i64::from(y),
                [field[i], field[i + 1], field[i + 2], field[i + 3]],
            );
        }
    }
    Ok(())
}

fn fill_block(field: &mut [u8], w: u32, h: u32, bx: u32, by: u32, cell: u32, px: [u8; 4]) {
    for y in by..(by + cell).min(h) {
        for x in bx..(bx + cell).min(w) {
            let i = ((y as usize) * (w as usize) + (x as usize)) * 4;
            field[i..i + 4].copy_from_slice(&px);
        }
    }
}

fn circle_outline(
    field: &mut [u8],
    w: u32,
    h: u32,
    cx: i64,
    cy: i64,
    radius: i64,
    width: i64,
    px: [u8; 4],
) {
    let inner = (radius - width).max(0);
    for y in (cy - radius).max(0)..(cy + radius + 1).min(i64::from(h)) {
        for x in (cx - radius).max(0)..(cx + radius + 1).min(i64::from(w)) {
            let dx = x - cx;
            let dy = y - cy;
            let d2 = dx * dx + dy * dy;
            if d2 <= radius * radius && d2 > inner * inner {
                let i = ((y as usize) * (w as usize) + (x as usize)) * 4;
                field[i..i + 4].copy_from_slice(&px);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn same_seed_same_field() {
        let mut a = Canvas::new(64, 64, Color::rgb(0, 0, 0));
        let mut b = Canvas::new(64, 64, Color::rgb(0, 0, 0));
        let rect = Rect::new(4.0, 4.0, 60.0, 60.0);
        let light = Color::rgb(0xff, 0xfe, 0xf5);
        let dark = Color::rgb(0xdf, 0xd3, 0xab);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        noisy_rect(&mut a, rect, light, dark, 6, 2, &mut rng).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        noisy_rect(&mut b, rect, light, dark, 6, 2, &mut rng).unwrap();

        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = Canvas::new(64, 64, Color::rgb(0, 0, 0));
        let mut b = Canvas::new(64, 64, Color::rgb(0, 0, 0));
        let rect = Rect::new(0.0, 0.0, 64.0, 64.0);
        let light = Color::rgb(0xff, 0xfe, 0xf5);
        let dark = Color::rgb(0x00, 0x00, 0x00);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        noisy_rect(&mut a, rect, light, dark, 6, 0, &mut rng).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        noisy_rect(&mut b, rect, light, dark, 6, 0, &mut rng).unwrap();

        assert_ne!(a.data(), b.data());
    }

    #[test]
    fn pixels_outside_the_rect_are_untouched() {
        let mut canvas = Canvas::new(32, 32, Color::rgb(1, 2, 3));
        let rect = Rect::new(8.0, 8.0, 24.0, 24.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        noisy_rect(
            &mut canvas,
            rect,
            Color::rgb(200, 200, 200),
            Color::rgb(50, 50, 50),
            4,
            1,
            &mut rng,
        )
        .unwrap();

        let bg = Color::rgb(1, 2, 3).to_premul();
        assert_eq!(canvas.pixel(0, 0), bg);
        assert_eq!(canvas.pixel(31, 31), bg);
        assert_eq!(canvas.pixel(7, 16), bg);
    }
}
