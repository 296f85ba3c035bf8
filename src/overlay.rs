// The pipeline entry point: validate, then for each annotation trace its
// contours, pick a color, stroke the outlines onto the canvas and optionally
// fill the regions into a shared layer, and finish with a single blend pass.

use crate::blend::blend_fill_layer;
use crate::color::ColorSource;
use crate::contour::trace_contours;
use crate::error::Error;
use crate::raster::{draw_contour, fill_contour};
use crate::types::{Annotation, FillLayer, FrameBuffer, OverlayOptions};

/// Render `anns` over `image` and return the result as a new buffer; the
/// input is never written to. One color is drawn from `colors` per
/// annotation, whether or not its mask produced contours, so the consumed
/// color sequence always lines up with the annotation list.
///
/// All validation happens before the first pixel write: an invalid thickness
/// or alpha, or any mask whose size differs from the image's, fails the whole
/// call. Once drawing starts there is nothing left to fail; out-of-range
/// contour points clip silently.
pub fn draw_annotations(
    image: &FrameBuffer,
    anns: &[Annotation],
    opts: &OverlayOptions,
    colors: &mut dyn ColorSource,
) -> Result<FrameBuffer, Error> {
    if opts.line_thickness < 1 {
        return Err(Error::InvalidParameter(format!(
            "line_thickness must be >= 1, got {}",
            opts.line_thickness
        )));
    }
    if !(0.0..=1.0).contains(&opts.alpha) {
        return Err(Error::InvalidParameter(format!(
            "alpha must lie in [0, 1], got {}",
            opts.alpha
        )));
    }
    for (i, ann) in anns.iter().enumerate() {
        if ann.mask.width != image.width || ann.mask.height != image.height {
            return Err(Error::DimensionMismatch(format!(
                "annotation {}: mask is {}x{}, image is {}x{}",
                i, ann.mask.width, ann.mask.height, image.width, image.height
            )));
        }
    }

    let mut canvas = image.clone();
    if anns.is_empty() {
        return Ok(canvas);
    }

    // Allocated only in fill mode; outline-only rendering never consults it.
    let mut fill = if opts.draw_polygon {
        Some(FillLayer::new(image.width, image.height))
    } else {
        None
    };

    for ann in anns {
        let contours = trace_contours(&ann.mask);
        let color = colors.next_color();

        for contour in &contours {
            if contour.is_degenerate() {
                log::debug!(
                    "skipping degenerate contour ({} point(s))",
                    contour.points.len()
                );
                continue;
            }
            draw_contour(&mut canvas, contour, color, opts.line_thickness);
            if let Some(layer) = fill.as_mut() {
                fill_contour(layer, contour, color);
            }
        }
    }

    if let Some(layer) = fill.as_ref() {
        blend_fill_layer(&mut canvas, layer, opts.alpha, opts.masked_blend)?;
    }

    log::debug!(
        "rendered {} annotation(s) onto {}x{} image (fill: {})",
        anns.len(),
        image.width,
        image.height,
        opts.draw_polygon
    );
    Ok(canvas)
}
