//! Annotated debug overview of one page.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};

use crate::extract::PageDetection;

const OUTLINE: Rgb<u8> = Rgb([0, 255, 0]);
const CENTER: Rgb<u8> = Rgb([255, 0, 0]);
const LABEL: Rgb<u8> = Rgb([0, 0, 255]);

const GLYPH_SIZE: i32 = 8;
const CENTER_MARK_RADIUS: i32 = 3;
const LABEL_OFFSET_X: i32 = 25;
const LABEL_GAP_Y: i32 = 5;

/// Copy of `color` with every named circle outlined, its center marked and
/// the first `label_max_chars` characters of its name written above it.
pub fn render_overlay(
    color: &RgbImage,
    detection: &PageDetection,
    label_max_chars: usize,
) -> RgbImage {
    let mut canvas = color.clone();
    for named in &detection.named {
        let c = named.circle;
        let center = (c.x as i32, c.y as i32);
        let r = c.radius as i32;

        draw_hollow_circle_mut(&mut canvas, center, r, OUTLINE);
        if r > 1 {
            draw_hollow_circle_mut(&mut canvas, center, r - 1, OUTLINE);
        }
        draw_filled_circle_mut(&mut canvas, center, CENTER_MARK_RADIUS, CENTER);

        let label: String = named.name.chars().take(label_max_chars).collect();
        // Text sits on a baseline `LABEL_GAP_Y` px above the circle.
        let top = center.1 - r - LABEL_GAP_Y - GLYPH_SIZE;
        draw_label(&mut canvas, &label, center.0 - LABEL_OFFSET_X, top, LABEL);
    }
    canvas
}

/// Draw `text` with the 8x8 bitmap font, top-left at `(x, y)`.
///
/// Pixels outside the canvas are skipped; unknown characters render as `?`.
pub fn draw_label(canvas: &mut RgbImage, text: &str, x: i32, y: i32, color: Rgb<u8>) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    for (i, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let gx = x + i as i32 * GLYPH_SIZE;
        for (row, bits) in glyph.iter().enumerate() {
            for bit in 0..GLYPH_SIZE {
                if *bits & (1u8 << bit) == 0 {
                    continue;
                }
                let px = gx + bit;
                let py = y + row as i32;
                if px >= 0 && py >= 0 && px < w && py < h {
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}
