// Demo for the overlay renderer.
// • The window shows a base image (a file given on the command line, or a
//   synthetic backdrop) with a handful of segmentation masks rendered on top.
// • F toggles filled polygons, Up/Down nudge the fill opacity, T cycles the
//   outline thickness, M toggles masked compositing, R rerolls the colors,
//   S saves the frame to overlay.png, ESC quits.

mod blend;
mod color;
mod contour;
mod error;
mod overlay;
mod raster;
mod types;
mod window;

use color::RandomColors;
use error::Error;
use overlay::draw_annotations;
use types::{Annotation, FrameBuffer, Mask, OverlayOptions};
use window::Drawer;

fn main() -> Result<(), Error> {
    env_logger::init();

    // Base image: decode the file given on the command line, or fall back to
    // a generated backdrop so the demo runs standalone.
    let image = match std::env::args().nth(1) {
        Some(path) => load_image(&path)?,
        None => synthetic_backdrop(640, 480),
    };
    let (w, h) = (image.width, image.height);

    let annotations = demo_annotations(w, h);
    log::info!("{} demo annotation(s) over a {}x{} base image", annotations.len(), w, h);

    let mut drawer = Drawer::new("Mask Overlay", w, h)?;

    let mut opts = OverlayOptions::default();
    let mut seed: u32 = 0xC0FFEE;
    let mut dirty = true; // re-render only when a knob changed
    let mut frame = image.clone();

    while drawer.is_open() && !drawer.esc_pressed() {
        if drawer.f_pressed_once() {
            opts.draw_polygon = !opts.draw_polygon;
            log::info!("fill mode: {}", if opts.draw_polygon { "on" } else { "off" });
            dirty = true;
        }
        if drawer.m_pressed_once() {
            opts.masked_blend = !opts.masked_blend;
            log::info!("masked blend: {}", if opts.masked_blend { "on" } else { "off" });
            dirty = true;
        }
        if drawer.t_pressed_once() {
            opts.line_thickness = opts.line_thickness % 4 + 1; // 1..=4
            log::info!("line thickness: {}", opts.line_thickness);
            dirty = true;
        }
        if drawer.alpha_up_pressed() {
            opts.alpha = (opts.alpha + 0.05).min(1.0);
            log::info!("alpha: {:.2}", opts.alpha);
            dirty = true;
        }
        if drawer.alpha_down_pressed() {
            opts.alpha = (opts.alpha - 0.05).max(0.0);
            log::info!("alpha: {:.2}", opts.alpha);
            dirty = true;
        }
        if drawer.r_pressed_once() {
            // LCG-style scramble so each reroll lands on a fresh palette.
            seed = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
            dirty = true;
        }
        if drawer.s_pressed_once() {
            save_png(&frame, "overlay.png")?;
            log::info!("saved overlay.png");
        }

        if dirty {
            let mut colors = RandomColors::from_seed(seed);
            frame = draw_annotations(&image, &annotations, &opts, &mut colors)?;
            dirty = false;
        }

        drawer.present(&frame)?;
    }

    Ok(())
}

/// Decode an image file into the packed 0x00RRGGBB buffer the renderer and
/// the window both use.
fn load_image(path: &str) -> Result<FrameBuffer, Error> {
    let decoded = image::open(path)
        .map_err(|e| Error::ImageLoad(format!("{path}: {e}")))?
        .to_rgb8();

    let (w, h) = decoded.dimensions();
    let mut pixels = Vec::with_capacity((w as usize) * (h as usize));
    for pixel in decoded.pixels() {
        let r = pixel[0] as u32;
        let g = pixel[1] as u32;
        let b = pixel[2] as u32;
        pixels.push((r << 16) | (g << 8) | b);
    }

    Ok(FrameBuffer { width: w as usize, height: h as usize, pixels })
}

/// Encode the current frame as a PNG next to the working directory.
fn save_png(fb: &FrameBuffer, path: &str) -> Result<(), Error> {
    let img = image::RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        image::Rgb([
            ((px >> 16) & 0xFF) as u8,
            ((px >> 8) & 0xFF) as u8,
            (px & 0xFF) as u8,
        ])
    });
    img.save(path)
        .map_err(|e| Error::ImageSave(format!("{path}: {e}")))
}

/// A soft two-tone gradient with darker bands, enough texture to judge the
/// overlay against when no photo is supplied.
fn synthetic_backdrop(width: usize, height: usize) -> FrameBuffer {
    let mut fb = FrameBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (40 + 100 * x / width) as u32;
            let g = (60 + 80 * y / height) as u32;
            let b = (90 + 60 * (x + y) / (width + height)) as u32;
            let band = if (y / 40) % 2 == 0 { 0 } else { 12 };
            fb.pixels[y * width + x] =
                ((r - band.min(r)) << 16) | ((g - band.min(g)) << 8) | (b - band.min(b));
        }
    }
    fb
}

/// Masks exercising every tracer path: a disc, a notched slab (concave), a
/// donut (hole is not traced), one mask holding two disjoint blobs, and a
/// single stray pixel that must render as nothing.
fn demo_annotations(width: usize, height: usize) -> Vec<Annotation> {
    let w = width as i32;
    let h = height as i32;
    let unit = w.min(h);

    let mut anns = Vec::new();

    // Disc on the left.
    anns.push(mask_annotation(width, height, |x, y| {
        in_disc(x, y, w * 3 / 10, h / 2, unit * 3 / 20)
    }));

    // Notched slab: rectangle with a bite taken out of the top edge.
    anns.push(mask_annotation(width, height, |x, y| {
        let in_slab = x >= w / 2 && x < w * 9 / 10 && y >= h * 3 / 5 && y < h * 4 / 5;
        let in_notch = x >= w * 13 / 20 && x < w * 15 / 20 && y < h * 7 / 10;
        in_slab && !in_notch
    }));

    // Donut in the upper right; only its outer boundary gets traced.
    anns.push(mask_annotation(width, height, |x, y| {
        let (cx, cy) = (w * 7 / 10, h * 3 / 10);
        in_disc(x, y, cx, cy, unit / 8) && !in_disc(x, y, cx, cy, unit / 20)
    }));

    // Two small blobs sharing one mask: two contours, one color.
    anns.push(mask_annotation(width, height, |x, y| {
        in_disc(x, y, w * 12 / 100, h * 15 / 100, unit / 16)
            || in_disc(x, y, w * 30 / 100, h * 12 / 100, unit / 20)
    }));

    // A single stray pixel: degenerate, silently invisible.
    anns.push(mask_annotation(width, height, |x, y| {
        x == w - 10 && y == h - 10
    }));

    anns
}

fn mask_annotation(
    width: usize,
    height: usize,
    inside: impl Fn(i32, i32) -> bool,
) -> Annotation {
    let mut mask = Mask::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if inside(x as i32, y as i32) {
                mask.set(x, y, true);
            }
        }
    }
    let area = mask.area();
    Annotation { mask, area }
}

#[inline]
fn in_disc(x: i32, y: i32, cx: i32, cy: i32, radius: i32) -> bool {
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= radius * radius
}
