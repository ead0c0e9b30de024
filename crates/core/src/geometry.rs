//! Axis-aligned rectangle primitives.
//!
//! All coordinates are millimeters in the sheet frame, with the origin at the
//! sheet's lower-left corner. A [`Rect`] is anchored at its lower-left corner.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    /// Extent along X.
    pub width: f64,
    /// Extent along Y.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its lower-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the given size at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge.
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge.
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Area of the rectangle.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Length of the outline.
    #[inline]
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    /// Returns true if the interiors of the two rectangles intersect.
    ///
    /// Rectangles that only share an edge or a corner do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.max_x() <= other.x
            || other.max_x() <= self.x
            || self.max_y() <= other.y
            || other.max_y() <= self.y)
    }

    /// Grows the rectangle by `amount` on every side.
    ///
    /// Negative amounts shrink it; the size never goes below zero.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: (self.width + 2.0 * amount).max(0.0),
            height: (self.height + 2.0 * amount).max(0.0),
        }
    }

    /// Returns true if `other` lies entirely inside this rectangle, within `eps`.
    pub fn contains(&self, other: &Rect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.max_x() <= self.max_x() + eps
            && other.max_y() <= self.max_y() + eps
    }

    /// Returns the same rectangle with width and height swapped.
    pub fn transposed(&self) -> Rect {
        Rect::new(self.x, self.y, self.height, self.width)
    }
}

/// Separating-axis overlap test; touching edges do not count.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Area of a rectangle (`width * height`).
#[inline]
pub fn area(rect: &Rect) -> f64 {
    rect.area()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_area_and_perimeter() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_relative_eq!(area(&r), 1200.0);
        assert_relative_eq!(r.perimeter(), 140.0);
        assert_relative_eq!(r.max_x(), 40.0);
        assert_relative_eq!(r.max_y(), 60.0);
    }

    #[test]
    fn test_overlap_detected() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let above = Rect::new(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &above));
        assert!(!overlaps(&a, &corner));
    }

    #[test]
    fn test_disjoint_rectangles() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(50.0, 50.0, 1.0, 1.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(overlaps(&outer, &inner));
        assert!(outer.contains(&inner, 0.0));
        assert!(!inner.contains(&outer, 0.0));
    }

    #[test]
    fn test_inflate() {
        let r = Rect::new(10.0, 10.0, 20.0, 10.0).inflate(2.5);
        assert_relative_eq!(r.x, 7.5);
        assert_relative_eq!(r.y, 7.5);
        assert_relative_eq!(r.width, 25.0);
        assert_relative_eq!(r.height, 15.0);

        let collapsed = Rect::new(0.0, 0.0, 2.0, 2.0).inflate(-5.0);
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
    }

    #[test]
    fn test_transposed() {
        let r = Rect::new(1.0, 2.0, 30.0, 40.0).transposed();
        assert_eq!(r, Rect::new(1.0, 2.0, 40.0, 30.0));
    }
}
