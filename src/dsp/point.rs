use std::ops::{Add, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D point, also used as a displacement vector between points.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector.
    #[inline]
    pub fn magnitude(self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).magnitude()
    }

    #[inline]
    pub fn scale(self, amount: f32) -> Self {
        Self::new(self.x * amount, self.y * amount)
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Mul<Point2D> for f32 {
    type Output = Point2D;

    #[inline]
    fn mul(self, rhs: Point2D) -> Point2D {
        rhs.scale(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Point2D::new(1.0, 2.0);
        let b = Point2D::new(4.0, -2.0);

        assert_eq!(a + b, Point2D::new(5.0, 0.0));
        assert_eq!(b - a, Point2D::new(3.0, -4.0));
        assert_eq!(a * 2.0, Point2D::new(2.0, 4.0));
        assert_eq!(0.5 * b, Point2D::new(2.0, -1.0));
    }

    #[test]
    fn magnitude_is_euclidean() {
        assert!((Point2D::new(3.0, 4.0).magnitude() - 5.0).abs() < 1e-6);
        assert_eq!(Point2D::ORIGIN.magnitude(), 0.0);
        assert!((Point2D::new(1.0, 1.0).distance(Point2D::new(4.0, 5.0)) - 5.0).abs() < 1e-6);
    }
}
