//! Plane geometry for star positions.

use serde::{Deserialize, Serialize};

/// A position in the galaxy plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The 1x1 cell whose top-left corner is `p`.
    pub fn unit_at(p: Point) -> Self {
        Self::new(p.x, p.y, 1.0, 1.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn united(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Bounding rectangle that starts empty and grows as cells are added.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds(Option<Rect>);

impl Bounds {
    pub fn extend(&mut self, rect: Rect) {
        self.0 = Some(match self.0 {
            Some(current) => current.united(&rect),
            None => rect,
        });
    }

    /// The covered rectangle, or an empty rectangle at the origin when
    /// nothing was added.
    pub fn rect(&self) -> Rect {
        self.0.unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert_eq!(b.distance(&b), 0.0);
    }

    #[test]
    fn united_covers_both() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(10.0, -5.0, 1.0, 1.0);
        let u = a.united(&b);
        assert_eq!(u, Rect::new(0.0, -5.0, 11.0, 6.0));
    }

    #[test]
    fn bounds_start_empty() {
        let mut bounds = Bounds::default();
        assert!(bounds.is_empty());
        assert_eq!(bounds.rect(), Rect::default());

        bounds.extend(Rect::unit_at(Point::new(4.0, 2.0)));
        assert_eq!(bounds.rect(), Rect::new(4.0, 2.0, 1.0, 1.0));

        bounds.extend(Rect::unit_at(Point::new(-1.0, 7.0)));
        assert_eq!(bounds.rect(), Rect::new(-1.0, 2.0, 6.0, 6.0));
    }
}
