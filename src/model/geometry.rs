//! Page-coordinate rectangles.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page coordinates (points).
///
/// Always normalized so that `x0 <= x1` and `y0 <= y1`. Serialized as a
/// `[x0, y0, x1, y1]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from two corners in any order.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Centre point as `(x, y)`.
    pub fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Check whether a point lies inside (edges included).
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    /// Check whether `other` lies inside this rectangle, allowing `tolerance`
    /// points of overshoot on every edge.
    pub fn contains_rect(&self, other: &Rect, tolerance: f32) -> bool {
        other.x0 >= self.x0 - tolerance
            && other.x1 <= self.x1 + tolerance
            && other.y0 >= self.y0 - tolerance
            && other.y1 <= self.y1 + tolerance
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Tight bounding box of a set of rectangles, `None` when empty.
    pub fn bounding<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, r| match acc {
                Some(a) => Some(a.union(r)),
                None => Some(*r),
            })
    }
}

impl From<[f32; 4]> for Rect {
    fn from(v: [f32; 4]) -> Self {
        Rect::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rect> for [f32; 4] {
    fn from(r: Rect) -> Self {
        [r.x0, r.y0, r.x1, r.y1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_normalizes() {
        let r = Rect::new(10.0, 20.0, 0.0, 5.0);
        assert_eq!(r, Rect::new(0.0, 5.0, 10.0, 20.0));
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 15.0);
        assert_eq!(r.center(), (5.0, 12.5));
    }

    #[test]
    fn test_rect_bounding() {
        let rects = [Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(5.0, -2.0, 6.0, 3.0)];
        assert_eq!(
            Rect::bounding(rects.iter()),
            Some(Rect::new(0.0, -2.0, 6.0, 3.0))
        );
        assert_eq!(Rect::bounding(std::iter::empty::<&Rect>()), None);
    }

    #[test]
    fn test_rect_json_array() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
        let back: Rect = serde_json::from_str("[3, 4, 1, 2]").unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_contains_rect_tolerance() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains_rect(&Rect::new(-0.05, 0.0, 10.05, 10.0), 0.1));
        assert!(!outer.contains_rect(&Rect::new(-0.5, 0.0, 5.0, 5.0), 0.1));
    }
}
