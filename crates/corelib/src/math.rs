pub use glam::{Vec2, vec2};

/// Axis aligned rectangle, used for the canvas bounding box in client space
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
    }

    /// Returns true if the rect has no area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_bounds() {
        let rect = Rect::new(vec2(10.0, 20.0), vec2(100.0, 50.0));
        assert_eq!(rect.min(), vec2(10.0, 20.0));
        assert_eq!(rect.max(), vec2(110.0, 70.0));
        assert!(rect.contains(vec2(10.0, 20.0)));
        assert!(!rect.contains(vec2(110.0, 70.0)));
        assert!(!rect.is_empty());
        assert!(Rect::default().is_empty());
    }
}
