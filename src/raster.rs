// Software rasterization: contour outlines onto the canvas, polygon fills
// into the fill layer. Every pixel write is bounds-guarded, so contours that
// wander off the canvas clip instead of failing.

use crate::types::{Color, Contour, FillLayer, FrameBuffer};

/// Put a pixel on the framebuffer if (x, y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Stamp a filled disc of diameter `thickness` centered at (cx, cy). This is
/// the pen tip for thick lines; thickness 1 reduces to a single pixel.
fn stamp_pen(fb: &mut FrameBuffer, cx: i32, cy: i32, color: u32, thickness: i32) {
    if thickness <= 1 {
        put_pixel(fb, cx, cy, color);
        return;
    }
    let radius = thickness as f32 / 2.0;
    let r = radius.ceil() as i32;
    let r2 = radius * radius;
    // Scan just the bounding box (fast enough for small pens)
    for y in (cy - r)..=(cy + r) {
        for x in (cx - r)..=(cx + r) {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

/// Draw a line between (x0,y0) and (x1,y1) using Bresenham, stamping the pen
/// at every step.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32, thickness: i32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp_pen(fb, x0, y0, color, thickness);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Stroke a closed contour onto the canvas: a segment between each pair of
/// consecutive points plus the closing segment back to the first. Degenerate
/// contours (fewer than 3 points) draw nothing.
pub fn draw_contour(fb: &mut FrameBuffer, contour: &Contour, color: Color, thickness: i32) {
    if contour.is_degenerate() {
        return;
    }
    let packed = color.packed();
    let pts = &contour.points;
    for i in 0..pts.len() {
        let (x0, y0) = pts[i];
        let (x1, y1) = pts[(i + 1) % pts.len()];
        draw_line(fb, x0, y0, x1, y1, packed, thickness);
    }
}

/// Rasterize a contour's interior into the fill layer, even-odd rule,
/// overwriting whatever a previous annotation left there.
///
/// For each scanline the x-crossings of all non-horizontal edges are
/// collected under the half-open vertex rule (an edge covers scanlines
/// min(y0,y1) <= y < max(y0,y1), so a shared vertex toggles parity exactly
/// once), sorted, and the spans between successive pairs are filled. The
/// contour's own edges are then stamped in at thickness 1: the traced
/// boundary belongs to the region, and the span pass alone leaves the
/// bottom row and parts of slanted edges uncovered.
pub fn fill_contour(layer: &mut FillLayer, contour: &Contour, color: Color) {
    if contour.is_degenerate() {
        return;
    }
    let packed = color.packed();
    let pts = &contour.points;

    let y_min = pts.iter().map(|p| p.1).min().unwrap_or(0).max(0);
    let y_max = pts
        .iter()
        .map(|p| p.1)
        .max()
        .unwrap_or(-1)
        .min(layer.height as i32 - 1);

    let mut crossings: Vec<f64> = Vec::new();
    for y in y_min..=y_max {
        crossings.clear();
        let yf = y as f64;
        for i in 0..pts.len() {
            let (x0, y0) = pts[i];
            let (x1, y1) = pts[(i + 1) % pts.len()];
            if y0 == y1 {
                continue; // horizontal edges contribute no parity change
            }
            let (lo, hi) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
            if y < lo || y >= hi {
                continue;
            }
            let t = (yf - y0 as f64) / (y1 as f64 - y0 as f64);
            crossings.push(x0 as f64 + t * (x1 as f64 - x0 as f64));
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            let xa = (pair[0].ceil() as i32).max(0);
            let xb = (pair[1].floor() as i32).min(layer.width as i32 - 1);
            for x in xa..=xb {
                layer.set(x, y, packed);
            }
        }
    }

    // Boundary pass: the outline itself is part of the filled region.
    for i in 0..pts.len() {
        let (x0, y0) = pts[i];
        let (x1, y1) = pts[(i + 1) % pts.len()];
        fill_line(layer, x0, y0, x1, y1, packed);
    }
}

/// Bresenham again, but writing into the fill layer (which tracks touched
/// pixels) instead of the canvas.
fn fill_line(layer: &mut FillLayer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        layer.set(x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::new(255, 255, 255);

    fn square(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
        Contour { points: vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)] }
    }

    #[test]
    fn outline_strokes_the_rectangle_border() {
        let mut fb = FrameBuffer::new(8, 8);
        draw_contour(&mut fb, &square(1, 1, 5, 5), WHITE, 1);
        let packed = WHITE.packed();
        // Every border pixel set, interior untouched.
        for i in 1..=5 {
            assert_eq!(fb.pixels[1 * 8 + i], packed);
            assert_eq!(fb.pixels[5 * 8 + i], packed);
            assert_eq!(fb.pixels[i * 8 + 1], packed);
            assert_eq!(fb.pixels[i * 8 + 5], packed);
        }
        assert_eq!(fb.pixels[3 * 8 + 3], 0);
    }

    #[test]
    fn degenerate_contours_draw_nothing() {
        let mut fb = FrameBuffer::new(8, 8);
        draw_contour(&mut fb, &Contour { points: vec![(4, 4)] }, WHITE, 3);
        draw_contour(&mut fb, &Contour { points: vec![(1, 1), (6, 1)] }, WHITE, 3);
        assert!(fb.pixels.iter().all(|&p| p == 0));

        let mut layer = FillLayer::new(8, 8);
        fill_contour(&mut layer, &Contour { points: vec![(4, 4)] }, WHITE);
        assert!(layer.touched.iter().all(|&t| !t));
    }

    #[test]
    fn out_of_range_points_clip_without_panicking() {
        let mut fb = FrameBuffer::new(6, 6);
        let wild = Contour { points: vec![(-10, -10), (20, -3), (12, 12), (-4, 9)] };
        draw_contour(&mut fb, &wild, WHITE, 2);
        let mut layer = FillLayer::new(6, 6);
        fill_contour(&mut layer, &wild, WHITE);
        // Nothing to assert beyond "we got here": writes outside the buffer
        // are dropped by the guards, and the buffers are still well-formed.
        assert_eq!(fb.pixels.len(), 36);
        assert_eq!(layer.pixels.len(), 36);
    }

    #[test]
    fn thick_pen_covers_neighbors() {
        let mut fb = FrameBuffer::new(9, 9);
        let dot = square(4, 4, 4, 4);
        // A zero-length rectangle still stamps the pen at its single corner.
        draw_contour(&mut fb, &dot, WHITE, 3);
        let packed = WHITE.packed();
        assert_eq!(fb.pixels[4 * 9 + 4], packed);
        assert_eq!(fb.pixels[4 * 9 + 5], packed);
        assert_eq!(fb.pixels[4 * 9 + 3], packed);
        assert_eq!(fb.pixels[3 * 9 + 4], packed);
        assert_eq!(fb.pixels[5 * 9 + 4], packed);
    }

    #[test]
    fn fill_covers_interior_and_boundary() {
        let mut layer = FillLayer::new(8, 8);
        fill_contour(&mut layer, &square(2, 2, 5, 5), WHITE);
        let packed = WHITE.packed();
        for y in 2..=5 {
            for x in 2..=5 {
                let idx = y * 8 + x;
                assert_eq!(layer.pixels[idx], packed, "pixel ({x},{y})");
                assert!(layer.touched[idx]);
            }
        }
        // One ring outside stays clear.
        for i in 1..=6 {
            assert!(!layer.touched[1 * 8 + i]);
            assert!(!layer.touched[6 * 8 + i]);
            assert!(!layer.touched[i * 8 + 1]);
            assert!(!layer.touched[i * 8 + 6]);
        }
    }

    #[test]
    fn fill_triangle_stays_inside_its_edges() {
        let mut layer = FillLayer::new(12, 12);
        let tri = Contour { points: vec![(2, 2), (9, 2), (2, 9)] };
        fill_contour(&mut layer, &tri, WHITE);
        // A point clearly inside.
        assert!(layer.touched[4 * 12 + 4]);
        // The corner opposite the hypotenuse stays empty.
        assert!(!layer.touched[9 * 12 + 9]);
    }

    #[test]
    fn overlapping_fills_are_last_writer_wins() {
        let red = Color::new(200, 0, 0);
        let blue = Color::new(0, 0, 200);
        let mut layer = FillLayer::new(10, 10);
        fill_contour(&mut layer, &square(1, 1, 6, 6), red);
        fill_contour(&mut layer, &square(4, 4, 8, 8), blue);
        assert_eq!(layer.pixels[5 * 10 + 5], blue.packed()); // overlap
        assert_eq!(layer.pixels[2 * 10 + 2], red.packed());  // red only
        assert_eq!(layer.pixels[7 * 10 + 7], blue.packed()); // blue only
    }
}
