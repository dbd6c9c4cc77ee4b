//! Planar points and ordered point sets.
//!
//! # Equality Semantics
//!
//! Two points are the same point exactly when both coordinates compare equal with
//! IEEE 754 `==`. There is no tolerance: `(0.1 + 0.2, 0.0)` and `(0.3, 0.0)` are
//! different points, while `(-0.0, 0.0)` and `(0.0, 0.0)` are the same point.
//! Duplicate detection in the triangulator relies on exactly this rule.
//!
//! The position of a point inside a [`PointSet`] is its identifier for the rest
//! of the pipeline: triangle vertex indices refer to positions in the set.

#![forbid(unsafe_code)]

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Convenience macro for building a [`Point`] from two coordinates.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::point;
///
/// let p = point!(1.0, 2.5);
/// assert_eq!(p.x(), 1.0);
/// assert_eq!(p.y(), 2.5);
/// ```
#[macro_export]
macro_rules! point {
    ($x:expr, $y:expr) => {
        $crate::geometry::point::Point::new($x, $y)
    };
}

// Re-export the macro at the module level for convenience
pub use crate::point;

// =============================================================================
// POINT STRUCT DEFINITION
// =============================================================================

/// A point in the plane with `f64` coordinates.
///
/// Points are immutable once created; the coordinates are private and exposed
/// through [`x`](Point::x), [`y`](Point::y) and [`coords`](Point::coords).
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::point::Point;
///
/// let p = Point::new(1.0, 2.0);
/// assert_eq!(p.coords(), [1.0, 2.0]);
/// assert_eq!(p, Point::from((1.0, 2.0)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point from its two coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The x coordinate.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// The y coordinate.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Both coordinates as an array `[x, y]`.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Returns `true` when neither coordinate is NaN or infinite.
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Hashable key with the same equality as `==` on finite coordinates.
    ///
    /// `OrderedFloat` hashes `-0.0` and `0.0` identically, so the key agrees
    /// with IEEE equality for every finite point.
    #[inline]
    pub(crate) const fn exact_key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.x), OrderedFloat(self.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(point: Point) -> Self {
        point.coords()
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

// =============================================================================
// POINT SET
// =============================================================================

/// An ordered sequence of points.
///
/// Order is significant: index `i` in the set is the identifier used by the
/// triangles that reference the point.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::point::PointSet;
/// use delaunay_mesh::point;
///
/// let set: PointSet = vec![point!(0.0, 0.0), point!(1.0, 0.0)].into();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set[1], point!(1.0, 0.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Wraps an ordered list of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The points in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Consumes the set, returning the underlying vector.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl std::ops::Index<usize> for PointSet {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl AsRef<[Point]> for PointSet {
    fn as_ref(&self) -> &[Point] {
        &self.points
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for PointSet {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collections::FastHashSet;

    #[test]
    fn point_accessors_and_conversions() {
        let p = Point::new(1.5, -2.0);
        assert_eq!(p.x(), 1.5);
        assert_eq!(p.y(), -2.0);
        assert_eq!(p.coords(), [1.5, -2.0]);

        let from_tuple: Point = (1.5, -2.0).into();
        let from_array: Point = [1.5, -2.0].into();
        assert_eq!(p, from_tuple);
        assert_eq!(p, from_array);

        let back: (f64, f64) = p.into();
        assert_eq!(back, (1.5, -2.0));
    }

    #[test]
    fn point_macro_builds_point() {
        let p = point!(3.0, 4.0);
        assert_eq!(p, Point::new(3.0, 4.0));
        assert_eq!(p.distance_squared(&Point::default()), 25.0);
    }

    #[test]
    fn equality_is_exact_without_tolerance() {
        assert_ne!(Point::new(0.1 + 0.2, 0.0), Point::new(0.3, 0.0));
        assert_eq!(Point::new(-0.0, 0.0), Point::new(0.0, -0.0));
    }

    #[test]
    fn exact_key_agrees_with_equality_for_signed_zero() {
        let mut seen = FastHashSet::default();
        assert!(seen.insert(Point::new(0.0, 1.0).exact_key()));
        assert!(!seen.insert(Point::new(-0.0, 1.0).exact_key()));
        assert!(seen.insert(Point::new(1e-300, 1.0).exact_key()));
    }

    #[test]
    fn finiteness_check() {
        assert!(Point::new(1e308, -1e308).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::NEG_INFINITY).is_finite());
    }

    #[test]
    fn display_formats_as_tuple() {
        assert_eq!(Point::new(1.0, -0.5).to_string(), "(1, -0.5)");
    }

    #[test]
    fn point_set_preserves_order() {
        let set: PointSet = [(2.0, 2.0), (0.0, 0.0), (1.0, 1.0)]
            .into_iter()
            .map(Point::from)
            .collect();
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(set[0], Point::new(2.0, 2.0));
        let xs: Vec<f64> = set.iter().map(Point::x).collect();
        assert_eq!(xs, vec![2.0, 0.0, 1.0]);
        assert_eq!(set.into_points().len(), 3);
    }

    #[test]
    fn serde_roundtrip_point_set() {
        let set = PointSet::new(vec![Point::new(0.25, -1.0), Point::new(1e-9, 1e9)]);
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with(r#"[{"x":0.25,"y":-1.0},"#));
        let back: PointSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
