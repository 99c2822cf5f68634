/// A point in client-area coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle describing a chrome element's position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns whether the point lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom
    /// edges exclusive, matching Win32 `PtInRect`.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Returns whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Shrinks the rectangle by `by` pixels on every side.
    pub fn inset(&self, by: i32) -> Rect {
        Rect::new(
            self.x + by,
            self.y + by,
            (self.width - by * 2).max(0),
            (self.height - by * 2).max(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_top_left_exclusive_bottom_right() {
        // Arrange
        let r = Rect::new(10, 20, 100, 50);

        // Assert
        assert!(r.contains(Point::new(10, 20)));
        assert!(r.contains(Point::new(109, 69)));
        assert!(!r.contains(Point::new(110, 20)));
        assert!(!r.contains(Point::new(10, 70)));
        assert!(!r.contains(Point::new(9, 20)));
    }

    #[test]
    fn inset_never_goes_negative() {
        // Arrange
        let r = Rect::new(0, 0, 4, 4);

        // Act
        let inner = r.inset(3);

        // Assert
        assert_eq!(inner, Rect::new(3, 3, 0, 0));
        assert!(inner.is_empty());
    }
}
