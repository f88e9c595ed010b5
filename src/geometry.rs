//! Geometry primitives for popup placement.
//!
//! Sizes and rectangles are in device-independent units (f64). Pixel
//! snapping against a render scale happens in the popup host, not here.

/// A point in layout space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Shrink by a thickness on all four sides, clamping at zero
    pub fn deflate(&self, thickness: Thickness) -> Size {
        Size {
            width: (self.width - thickness.horizontal()).max(0.0),
            height: (self.height - thickness.vertical()).max(0.0),
        }
    }

    /// Component-wise minimum
    pub fn min(&self, other: Size) -> Size {
        Size {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }
}

/// A rectangular region
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_size(size: Size) -> Self {
        Self { x: 0.0, y: 0.0, width: size.width, height: size.height }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Per-side inset used for dialog margins
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Same inset on all four sides
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Total horizontal inset (left + right)
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical inset (top + bottom)
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Horizontal placement of dialog content within the available area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Pin to the margin-deflated left edge (content size ignored for placement)
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

/// Vertical placement of dialog content within the available area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    /// Pin to the margin-deflated top edge (content size ignored for placement)
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deflate_clamps_at_zero() {
        let size = Size::new(10.0, 4.0);
        let deflated = size.deflate(Thickness::uniform(3.0));
        assert_eq!(deflated, Size::new(4.0, 0.0));
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(14.9, 14.9)));
        assert!(!rect.contains(Point::new(15.0, 10.0)));
        assert!(!rect.contains(Point::new(10.0, 15.0)));
    }

    #[test]
    fn test_size_min() {
        let a = Size::new(100.0, 40.0);
        let b = Size::new(60.0, 80.0);
        assert_eq!(a.min(b), Size::new(60.0, 40.0));
    }
}
