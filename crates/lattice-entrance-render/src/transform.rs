//! 2D affine transforms for placing an animated child.
//!
//! An entrance animation only ever translates and uniformly scales its
//! child, so this type keeps to that subset of affine operations.

use crate::types::Point;

/// A 2D affine transformation matrix.
///
/// Stored as a 3x2 matrix in column-major order:
/// ```text
/// | m00 m10 m20 |   | scale_x  skew_x   translate_x |
/// | m01 m11 m21 | = | skew_y   scale_y  translate_y |
/// ```
///
/// # Examples
///
/// ```
/// use lattice_entrance_render::{Point, Transform2D};
///
/// // Transforms are composed right-to-left with `then`
/// // (first translate, then scale)
/// let transform = Transform2D::scale(2.0).then(&Transform2D::translate(10.0, 0.0));
///
/// let p = transform.transform_point(Point::new(5.0, 0.0));
/// // 5 + 10 = 15, then * 2 = 30
/// assert_eq!(p, Point::new(30.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Matrix elements in column-major order.
    m: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Create a translation transform.
    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    /// Create a uniform scaling transform.
    #[inline]
    pub const fn scale(s: f32) -> Self {
        Self {
            m: [s, 0.0, 0.0, s, 0.0, 0.0],
        }
    }

    /// Create a uniform scale around a pivot point.
    ///
    /// The pivot stays fixed while everything else moves toward or away from it.
    #[inline]
    pub fn scale_around(s: f32, pivot: Point) -> Self {
        Self::translate(pivot.x, pivot.y)
            .then(&Self::scale(s))
            .then(&Self::translate(-pivot.x, -pivot.y))
    }

    /// Concatenate this transform with another (self * other).
    ///
    /// The resulting transform first applies `other`, then `self`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        Self {
            m: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Transform a point.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.m[0] * p.x + self.m[2] * p.y + self.m[4],
            y: self.m[1] * p.x + self.m[3] * p.y + self.m[5],
        }
    }

    /// Check if this is the identity transform.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.0001
    }

    #[test]
    fn test_identity() {
        let t = Transform2D::IDENTITY;
        let p = Point::new(5.0, 10.0);
        assert_eq!(t.transform_point(p), p);
        assert!(Transform2D::default().is_identity());
    }

    #[test]
    fn test_translation() {
        let t = Transform2D::translate(10.0, 20.0);
        assert_eq!(t.transform_point(Point::new(5.0, 5.0)), Point::new(15.0, 25.0));
    }

    #[test]
    fn test_concatenation() {
        // First translate, then scale
        let combined = Transform2D::scale(2.0).then(&Transform2D::translate(10.0, 0.0));
        assert_eq!(
            combined.transform_point(Point::new(5.0, 0.0)),
            Point::new(30.0, 0.0)
        );
    }

    #[test]
    fn test_scale_around_keeps_pivot() {
        let pivot = Point::new(50.0, 20.0);
        let t = Transform2D::scale_around(0.9, pivot);

        let moved = t.transform_point(pivot);
        assert!(approx_eq(moved.x, pivot.x));
        assert!(approx_eq(moved.y, pivot.y));

        let corner = t.transform_point(Point::ZERO);
        assert!(approx_eq(corner.x, 5.0));
        assert!(approx_eq(corner.y, 2.0));
    }
}
