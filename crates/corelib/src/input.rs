use crate::math::{Rect, Vec2, vec2};
use crate::size::CanvasSize;

mod mouse;

pub use mouse::*;

/// Converts a position in client (viewport) space into canvas pixel space.
/// The canvas backing store can be bigger or smaller than its css box,
/// so the position is scaled by `size / rect.size`.
pub fn client_to_canvas(client: Vec2, rect: Rect, size: CanvasSize) -> Vec2 {
    (client - rect.origin) * canvas_scale(rect, size)
}

/// Scales a movement delta from client space into canvas pixel space
pub fn scale_movement(movement: Vec2, rect: Rect, size: CanvasSize) -> Vec2 {
    movement * canvas_scale(rect, size)
}

#[inline]
fn canvas_scale(rect: Rect, size: CanvasSize) -> Vec2 {
    // a hidden or detached canvas reports an empty rect
    if rect.is_empty() || size.is_empty() {
        return Vec2::ONE;
    }

    vec2(
        size.width as f32 / rect.width(),
        size.height as f32 / rect.height(),
    )
}
