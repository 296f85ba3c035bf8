// Boundary extraction: binary mask -> closed outer contours, one per
// 8-connected foreground component. Moore-neighbor border following with a
// flood fill afterwards so a component can never seed a second trace.

use crate::types::{Contour, Mask};

// The 8 neighbors in clockwise screen order (x right, y down), starting west.
// Probe order matters: the walk scans clockwise from the backtrack direction.
const DIRS: [(i32, i32); 8] = [
    (-1, 0),  // W
    (-1, -1), // NW
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
];

/// Extract every outer boundary of `mask` as a closed clockwise contour.
///
/// Seeds are found by a row-major scan, so the output order and the point
/// sequences are fully determined by the mask. Interior holes are not traced.
/// An isolated pixel comes back as a 1-point contour; the rasterizers treat
/// anything shorter than 3 points as a no-op.
pub fn trace_contours(mask: &Mask) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut labeled = vec![false; mask.width * mask.height];

    for y in 0..mask.height as i32 {
        for x in 0..mask.width as i32 {
            let idx = y as usize * mask.width + x as usize;
            if !mask.cells[idx] || labeled[idx] {
                continue;
            }
            // First unlabeled foreground pixel in scan order: everything left
            // of it in this row and everything above is background or another
            // component, so the west neighbor is guaranteed background and
            // the Moore walk can start with a west backtrack.
            let points = follow_boundary(mask, x, y);
            flood_label(mask, &mut labeled, x, y);
            contours.push(Contour { points: compress_collinear(points) });
        }
    }

    log::debug!(
        "traced {} contour(s) from {}x{} mask",
        contours.len(),
        mask.width,
        mask.height
    );
    contours
}

/// Moore-neighbor walk around one component, clockwise, starting at the
/// component's topmost-leftmost pixel with a west backtrack. Terminates by
/// Jacob's criterion: back at the start pixel and about to repeat the very
/// first move.
fn follow_boundary(mask: &Mask, sx: i32, sy: i32) -> Vec<(i32, i32)> {
    let start = (sx, sy);
    let mut points = vec![start];

    // First move out of the start pixel; none means an isolated pixel.
    let Some((first_dir, first)) = probe(mask, start, 0) else {
        return points;
    };

    let mut cur = first;
    let mut probe_from = backtrack_of(first_dir);
    // The walk visits at most one (pixel, direction) state each; cap well
    // above that so a logic slip can't spin forever.
    let cap = 8 * mask.width * mask.height + 8;

    loop {
        // cur was reached from a foreground neighbor, so the probe finds one.
        let Some((dir, next)) = probe(mask, cur, probe_from) else {
            break;
        };
        if cur == start && dir == first_dir {
            break;
        }
        points.push(cur);
        cur = next;
        probe_from = backtrack_of(dir);
        if points.len() >= cap {
            break;
        }
    }

    points
}

/// Scan the 8 neighbors of `c` clockwise, starting just past `from`, and
/// return the first foreground one together with its direction index.
#[inline]
fn probe(mask: &Mask, c: (i32, i32), from: usize) -> Option<(usize, (i32, i32))> {
    for i in 1..=8 {
        let d = (from + i) % 8;
        let n = (c.0 + DIRS[d].0, c.1 + DIRS[d].1);
        if mask.get(n.0, n.1) {
            return Some((d, n));
        }
    }
    None
}

/// Direction to resume probing from after moving along `dir`: the neighbor
/// checked just before the move landed, which is known background.
#[inline]
fn backtrack_of(dir: usize) -> usize {
    (dir + 6) % 8
}

/// Mark every pixel of the 8-connected component containing (sx, sy). Run
/// after a boundary trace so concave pixels the walk stepped past (and all
/// interior pixels) can no longer act as seeds for a duplicate contour.
fn flood_label(mask: &Mask, labeled: &mut [bool], sx: i32, sy: i32) {
    let mut stack = vec![(sx, sy)];
    labeled[sy as usize * mask.width + sx as usize] = true;

    while let Some((x, y)) = stack.pop() {
        for (dx, dy) in DIRS {
            let (nx, ny) = (x + dx, y + dy);
            if !mask.get(nx, ny) {
                continue;
            }
            let idx = ny as usize * mask.width + nx as usize;
            if !labeled[idx] {
                labeled[idx] = true;
                stack.push((nx, ny));
            }
        }
    }
}

/// Drop points in the middle of a straight run (same step direction in and
/// out), so an axis-aligned rectangle keeps only its corners. Sequences
/// shorter than 3 points pass through untouched.
fn compress_collinear(points: Vec<(i32, i32)>) -> Vec<(i32, i32)> {
    let n = points.len();
    if n < 3 {
        return points;
    }
    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let p = points[i];
        let next = points[(i + 1) % n];
        let step_in = (p.0 - prev.0, p.1 - prev.1);
        let step_out = (next.0 - p.0, next.1 - p.1);
        if step_in != step_out {
            kept.push(p);
        }
    }
    kept
}
