#![forbid(unsafe_code)]

//! Geometric primitives.

/// A cell position on the screen.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point.
    #[inline]
    #[must_use]
    pub fn manhattan_distance(self, other: Point) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }
}

/// A half-open rectangle for layout bounds and hit testing.
///
/// Covers columns `x..x + width` and rows `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bottom-right corner (exclusive).
    #[inline]
    pub const fn max(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Check if `other` lies entirely within this rectangle.
    ///
    /// An empty `other` is contained if its origin is within bounds.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(Point::new(2, 3)));
        assert!(rect.contains(Point::new(5, 7)));
        assert!(!rect.contains(Point::new(6, 3)));
        assert!(!rect.contains(Point::new(2, 8)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let rect = Rect::new(4, 4, 0, 3);
        assert!(!rect.contains(Point::new(4, 4)));
    }

    #[test]
    fn contains_rect_is_inclusive_of_edges() {
        let outer = Rect::new(0, 0, 10, 10);
        assert!(outer.contains_rect(&Rect::new(0, 0, 10, 10)));
        assert!(outer.contains_rect(&Rect::new(2, 2, 3, 3)));
        assert!(!outer.contains_rect(&Rect::new(8, 8, 3, 1)));
    }

    #[test]
    fn corners_and_emptiness() {
        let rect = Rect::new(1, 2, 5, 7);
        assert_eq!(rect.min(), Point::new(1, 2));
        assert_eq!(rect.max(), Point::new(6, 9));
        assert_eq!(rect.area(), 35);
        assert!(Rect::new(5, 5, 0, 2).is_empty());
    }

    #[test]
    fn point_distance() {
        let a = Point::new(3, 4);
        assert_eq!(a.manhattan_distance(Point::new(1, 7)), 5);
        assert_eq!(a.manhattan_distance(a), 0);
    }
}
