// Resize maths for the eight window handles

use super::types::{Rect, ResizeDirection};

/// Compute the rectangle produced by dragging a resize handle.
///
/// `dx`/`dy` are the pointer deltas since the resize started and `start` is
/// the geometry at that moment. Right/bottom edges only change the size.
/// Left/top edges move the origin with the size so the opposite edge stays
/// put; the origin delta is clamped once the minimum size is reached.
pub fn resize_rect(
    start: Rect,
    direction: ResizeDirection,
    dx: f64,
    dy: f64,
    min_width: f64,
    min_height: f64,
) -> Rect {
    let (horizontal, vertical) = direction.axes();
    let mut out = start;

    match horizontal {
        1 => out.width = (start.width + dx).max(min_width),
        -1 => {
            let max_delta = start.width - min_width;
            let delta = dx.min(max_delta);
            out.width = start.width - delta;
            out.x = start.x + delta;
        }
        _ => {}
    }

    match vertical {
        1 => out.height = (start.height + dy).max(min_height),
        -1 => {
            let max_delta = start.height - min_height;
            let delta = dy.min(max_delta);
            out.height = start.height - delta;
            out.y = start.y + delta;
        }
        _ => {}
    }

    out
}
