// Compositing: one pass that mixes the accumulated fill layer into the
// canvas. Runs at most once per render, after every annotation has been
// rasterized.

use crate::error::Error;
use crate::types::{FillLayer, FrameBuffer};

/// Blend `layer` over `canvas`: out = round(fill * alpha + canvas * (1 - alpha))
/// per channel, computed in f32. Ties round away from zero, so for these
/// non-negative values a .5 fraction rounds up.
///
/// With `masked` false every pixel participates, including those the fill
/// never wrote; their fill value is black, so the canvas darkens toward black
/// at weight `alpha` there. This uniform blend is the default. With `masked`
/// true only touched pixels blend and the rest of the canvas passes through
/// unchanged.
pub fn blend_fill_layer(
    canvas: &mut FrameBuffer,
    layer: &FillLayer,
    alpha: f32,
    masked: bool,
) -> Result<(), Error> {
    if canvas.width != layer.width || canvas.height != layer.height {
        return Err(Error::DimensionMismatch(format!(
            "blend: fill layer is {}x{}, canvas is {}x{}",
            layer.width, layer.height, canvas.width, canvas.height
        )));
    }

    let inv = 1.0 - alpha;
    for (i, px) in canvas.pixels.iter_mut().enumerate() {
        if masked && !layer.touched[i] {
            continue;
        }

        let pc = *px;
        let pf = layer.pixels[i];

        let rc = ((pc >> 16) & 0xFF) as f32;
        let gc = ((pc >> 8) & 0xFF) as f32;
        let bc = (pc & 0xFF) as f32;

        let rf = ((pf >> 16) & 0xFF) as f32;
        let gf = ((pf >> 8) & 0xFF) as f32;
        let bf = (pf & 0xFF) as f32;

        let r = (rf * alpha + rc * inv).round() as u32;
        let g = (gf * alpha + gc * inv).round() as u32;
        let b = (bf * alpha + bc * inv).round() as u32;

        *px = (r << 16) | (g << 8) | b;
    }
    Ok(())
}
