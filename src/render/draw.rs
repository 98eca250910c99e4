//! Low-level drawing primitives: alpha-blended text, filled and
//! rounded rectangles. Everything clips against the canvas bounds.

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

/// Rendered width in pixels of `text` at the given size.
pub fn text_width(font: &Font<'_>, px: f32, text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let mut width: f32 = 0.0;
    for glyph in font.layout(text, scale, point(0.0, v_metrics.ascent)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            width = width.max(bb.max.x as f32);
        }
    }
    width
}

/// Draw `text` with its top-left corner at (x, y), blending glyph
/// coverage against the existing pixels.
pub fn draw_text(
    img: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let baseline = y as f32 + v_metrics.ascent;

    for glyph in font.layout(text, scale, point(x as f32, baseline)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px_x = gx as i32 + bb.min.x;
            let px_y = gy as i32 + bb.min.y;
            if px_x < 0 || px_y < 0 {
                return;
            }
            let (px_x, px_y) = (px_x as u32, px_y as u32);
            if px_x >= img.width() || px_y >= img.height() {
                return;
            }
            let a = coverage.clamp(0.0, 1.0);
            if a <= 0.0 {
                return;
            }
            let dst = img.get_pixel_mut(px_x, px_y);
            let inv = 1.0 - a;
            for c in 0..3 {
                dst.0[c] = (color.0[c] as f32 * a + dst.0[c] as f32 * inv) as u8;
            }
            dst.0[3] = 255;
        });
    }
}

/// Fill the axis-aligned rectangle [x0, x1) x [y0, y1).
pub fn fill_rect(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    for y in y0.max(0)..y1.min(h) {
        for x in x0.max(0)..x1.min(w) {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Rounded rectangle with a filled interior and a stroked outline.
pub fn draw_rounded_rect(
    img: &mut RgbaImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: i32,
    fill: Rgba<u8>,
    outline: Rgba<u8>,
    stroke: i32,
) {
    let (w, h) = (x1 - x0, y1 - y0);
    if w <= 0 || h <= 0 {
        return;
    }
    let (img_w, img_h) = (img.width() as i32, img.height() as i32);
    let inner_radius = (radius - stroke).max(0);

    for y in 0..h {
        for x in 0..w {
            if !rounded_rect_contains(x, y, w, h, radius) {
                continue;
            }
            let inner = rounded_rect_contains(
                x - stroke,
                y - stroke,
                w - 2 * stroke,
                h - 2 * stroke,
                inner_radius,
            );
            let color = if inner { fill } else { outline };
            let (px, py) = (x0 + x, y0 + y);
            if px >= 0 && py >= 0 && px < img_w && py < img_h {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// Is (x, y) inside a w x h rectangle whose corners are rounded with
/// the given radius? Coordinates are local to the rectangle.
fn rounded_rect_contains(x: i32, y: i32, w: i32, h: i32, r: i32) -> bool {
    if x < 0 || y < 0 || x >= w || y >= h {
        return false;
    }
    let r = r.min(w / 2).min(h / 2);
    let in_left = x < r;
    let in_right = x >= w - r;
    let in_top = y < r;
    let in_bottom = y >= h - r;
    if !(in_left || in_right) || !(in_top || in_bottom) {
        return true;
    }
    let cx = if in_left { r } else { w - r - 1 };
    let cy = if in_top { r } else { h - r - 1 };
    let dx = (x - cx) as i64;
    let dy = (y - cy) as i64;
    dx * dx + dy * dy <= (r as i64) * (r as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips_to_canvas() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        fill_rect(&mut img, -2, -2, 10, 10, Rgba([255, 0, 0, 255]));
        assert!(img.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn rounded_rect_clips_corners() {
        // Corner pixel lies outside the rounding circle
        assert!(!rounded_rect_contains(0, 0, 30, 30, 8));
        // Center is always inside
        assert!(rounded_rect_contains(15, 15, 30, 30, 8));
        // Edge midpoints are inside
        assert!(rounded_rect_contains(15, 0, 30, 30, 8));
        assert!(rounded_rect_contains(0, 15, 30, 30, 8));
        // Out of bounds is outside
        assert!(!rounded_rect_contains(-1, 5, 30, 30, 8));
        assert!(!rounded_rect_contains(30, 5, 30, 30, 8));
    }

    #[test]
    fn rounded_rect_draws_fill_and_outline() {
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
        let fill = Rgba([10, 20, 30, 255]);
        let outline = Rgba([255, 255, 255, 255]);
        draw_rounded_rect(&mut img, 5, 5, 35, 35, 8, fill, outline, 2);
        // Center gets the fill
        assert_eq!(*img.get_pixel(20, 20), fill);
        // Edge midpoint gets the outline
        assert_eq!(*img.get_pixel(20, 5), outline);
        // Square corner stays background
        assert_eq!(*img.get_pixel(5, 5), Rgba([0, 0, 0, 255]));
    }
}
