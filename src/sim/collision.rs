//! Axis-aligned rectangle overlap

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left origin (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict overlap test. Touching edges do not count, so a zero-sized
/// rectangle misses itself and anything it only touches, but a point
/// strictly inside another rectangle still hits it.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn test_touching_edges_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
    }

    #[test]
    fn test_contained() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(intersects(&outer, &inner));
        assert!(intersects(&inner, &outer));
    }

    #[test]
    fn test_zero_size_misses_itself_and_edges() {
        let point = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(!intersects(&point, &point));

        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        for edge in [
            Rect::new(0.0, 5.0, 0.0, 0.0),
            Rect::new(10.0, 5.0, 0.0, 0.0),
            Rect::new(5.0, 0.0, 0.0, 0.0),
            Rect::new(5.0, 10.0, 0.0, 0.0),
        ] {
            assert!(!intersects(&edge, &b));
            assert!(!intersects(&b, &edge));
        }
    }

    #[test]
    fn test_point_inside_hits() {
        let point = Rect::new(5.0, 5.0, 0.0, 0.0);
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(intersects(&point, &b));
        assert!(intersects(&b, &point));
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in rect(), b in rect()) {
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_self_intersects(x in -500.0f32..500.0, y in -500.0f32..500.0,
                                w in 0.01f32..200.0, h in 0.01f32..200.0) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(intersects(&r, &r));
        }
    }
}
