use crate::math::{Vec2, vec2};

/// Width and height of a canvas backing store, in pixels
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if any side is 0, nothing can be drawn
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        vec2(self.width as _, self.height as _)
    }
}

impl From<(u32, u32)> for CanvasSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl std::fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Keeps the last observed size and reports when it changes
#[derive(Default, Clone, Copy, Debug)]
pub struct SizeTracker {
    last: CanvasSize,
}

impl SizeTracker {
    pub fn new(initial: CanvasSize) -> Self {
        Self { last: initial }
    }

    /// Last size observed
    #[inline]
    pub fn last(&self) -> CanvasSize {
        self.last
    }

    /// Stores `current` and returns it if it differs from the last observed size
    pub fn update(&mut self, current: CanvasSize) -> Option<CanvasSize> {
        if current == self.last {
            return None;
        }

        self.last = current;
        Some(current)
    }
}
