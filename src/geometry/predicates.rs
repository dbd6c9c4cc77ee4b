//! Geometric predicates for planar triangulation.
//!
//! This module contains the two predicates the incremental triangulator relies
//! on, the collinearity (orientation) test and the circumcircle containment
//! test, together with the circumcircle construction they share.
//!
//! Both predicates are plain `f64` computations with fixed absolute tolerances:
//!
//! | Predicate | Tolerance | Meaning |
//! |---|---|---|
//! | [`is_collinear`] / [`orientation`] | [`COLLINEARITY_EPSILON`] | `abs(cross) < ε` is degenerate |
//! | [`incircle`] / [`circumcircle_contains`] | [`CIRCUMCIRCLE_EPSILON`] | `d² < r² − ε` is inside |
//!
//! The circumcircle tolerance band is classified as "not contained" so that
//! nearly co-circular configurations do not flip-flop between insertions.

#![forbid(unsafe_code)]

use crate::geometry::point::Point;
use thiserror::Error;

/// Absolute tolerance on the doubled signed area below which three points are
/// considered collinear.
pub const COLLINEARITY_EPSILON: f64 = 1e-9;

/// Absolute tolerance band around the squared circumradius.
pub const CIRCUMCIRCLE_EPSILON: f64 = 1e-9;

/// Errors raised by the circumcircle computations.
///
/// None of these can occur for a triangle produced by the triangulator; they
/// indicate a broken invariant rather than bad input.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PredicateError {
    /// The circumcircle denominator (twice the signed area) is zero or the
    /// circumcenter is not finite.
    #[error(
        "Degenerate triangle: circumcircle denominator {denominator} (vertices {a}, {b}, {c})"
    )]
    DegenerateTriangle {
        /// The value of `2 * (ax(by−cy) + bx(cy−ay) + cx(ay−by))`.
        denominator: f64,
        /// First vertex.
        a: Point,
        /// Second vertex.
        b: Point,
        /// Third vertex.
        c: Point,
    },
    /// A triangle references a point outside the point table.
    #[error("Triangle vertex index {index} out of bounds for point table of length {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Length of the point table.
        len: usize,
    },
}

/// Represents the position of a point relative to a circumcircle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InCircle {
    /// The point is outside the circumcircle
    OUTSIDE,
    /// The point is within the tolerance band around the circle
    BOUNDARY,
    /// The point is strictly inside the circumcircle
    INSIDE,
}

impl std::fmt::Display for InCircle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OUTSIDE => write!(f, "OUTSIDE"),
            Self::BOUNDARY => write!(f, "BOUNDARY"),
            Self::INSIDE => write!(f, "INSIDE"),
        }
    }
}

/// Represents the orientation of a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Clockwise (signed area < 0)
    NEGATIVE,
    /// Collinear within [`COLLINEARITY_EPSILON`]
    DEGENERATE,
    /// Counter-clockwise (signed area > 0)
    POSITIVE,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// The circle through the three vertices of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    /// Circumcenter.
    pub center: Point,
    /// Squared circumradius.
    pub radius_squared: f64,
}

impl Circumcircle {
    /// Classifies `p` against this circle with the [`CIRCUMCIRCLE_EPSILON`] band.
    #[must_use]
    pub fn classify(&self, p: &Point) -> InCircle {
        let dist_sq = self.center.distance_squared(p);
        if dist_sq < self.radius_squared - CIRCUMCIRCLE_EPSILON {
            InCircle::INSIDE
        } else if dist_sq > self.radius_squared + CIRCUMCIRCLE_EPSILON {
            InCircle::OUTSIDE
        } else {
            InCircle::BOUNDARY
        }
    }
}

// =============================================================================
// ORIENTATION
// =============================================================================

/// Twice the signed area of `(p1, p2, p3)`: the cross product of `p2 − p1` and
/// `p3 − p1`.
#[inline]
#[must_use]
pub fn cross(p1: &Point, p2: &Point, p3: &Point) -> f64 {
    (p2.x() - p1.x()) * (p3.y() - p1.y()) - (p3.x() - p1.x()) * (p2.y() - p1.y())
}

/// Returns `true` when the three points are collinear within
/// [`COLLINEARITY_EPSILON`].
///
/// # Example
///
/// ```
/// use delaunay_mesh::geometry::predicates::is_collinear;
/// use delaunay_mesh::point;
///
/// assert!(is_collinear(&point!(0.0, 0.0), &point!(1.0, 1.0), &point!(3.0, 3.0)));
/// assert!(!is_collinear(&point!(0.0, 0.0), &point!(1.0, 0.0), &point!(0.0, 1.0)));
/// ```
#[inline]
#[must_use]
pub fn is_collinear(p1: &Point, p2: &Point, p3: &Point) -> bool {
    cross(p1, p2, p3).abs() < COLLINEARITY_EPSILON
}

/// Orientation of the triangle `(p1, p2, p3)`.
///
/// `DEGENERATE` exactly when [`is_collinear`] holds.
///
/// # Example
///
/// ```
/// use delaunay_mesh::geometry::predicates::{orientation, Orientation};
/// use delaunay_mesh::point;
///
/// let o = orientation(&point!(0.0, 0.0), &point!(1.0, 0.0), &point!(0.0, 1.0));
/// assert_eq!(o, Orientation::POSITIVE);
/// ```
#[must_use]
pub fn orientation(p1: &Point, p2: &Point, p3: &Point) -> Orientation {
    let area2 = cross(p1, p2, p3);
    if area2.abs() < COLLINEARITY_EPSILON {
        Orientation::DEGENERATE
    } else if area2 > 0.0 {
        Orientation::POSITIVE
    } else {
        Orientation::NEGATIVE
    }
}

// =============================================================================
// CIRCUMCIRCLE
// =============================================================================

/// Computes the circumcircle of the triangle `(a, b, c)`.
///
/// Uses the closed-form determinant formula; the denominator
/// `d = 2 * (ax(by−cy) + bx(cy−ay) + cx(ay−by))` is twice the signed area.
///
/// # Errors
///
/// Returns [`PredicateError::DegenerateTriangle`] if `d` is zero or the
/// resulting center or radius is not finite.
///
/// # Example
///
/// ```
/// use delaunay_mesh::geometry::predicates::circumcircle;
/// use delaunay_mesh::point;
///
/// let circle = circumcircle(&point!(0.0, 0.0), &point!(2.0, 0.0), &point!(0.0, 2.0)).unwrap();
/// assert_eq!(circle.center, point!(1.0, 1.0));
/// assert_eq!(circle.radius_squared, 2.0);
/// ```
pub fn circumcircle(a: &Point, b: &Point, c: &Point) -> Result<Circumcircle, PredicateError> {
    let (ax, ay) = (a.x(), a.y());
    let (bx, by) = (b.x(), b.y());
    let (cx, cy) = (c.x(), c.y());

    let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
    if d == 0.0 || !d.is_finite() {
        return Err(degenerate(d, a, b, c));
    }

    let a_sq = ax * ax + ay * ay;
    let b_sq = bx * bx + by * by;
    let c_sq = cx * cx + cy * cy;

    let ux = (a_sq * (by - cy) + b_sq * (cy - ay) + c_sq * (ay - by)) / d;
    let uy = (a_sq * (cx - bx) + b_sq * (ax - cx) + c_sq * (bx - ax)) / d;

    let center = Point::new(ux, uy);
    let radius_squared = center.distance_squared(a);
    if !center.is_finite() || !radius_squared.is_finite() {
        return Err(degenerate(d, a, b, c));
    }

    Ok(Circumcircle {
        center,
        radius_squared,
    })
}

#[cold]
fn degenerate(denominator: f64, a: &Point, b: &Point, c: &Point) -> PredicateError {
    PredicateError::DegenerateTriangle {
        denominator,
        a: *a,
        b: *b,
        c: *c,
    }
}

/// Classifies `p` against the circumcircle of `(a, b, c)`.
///
/// `INSIDE` when the squared distance to the center is below
/// `r² − CIRCUMCIRCLE_EPSILON`, `OUTSIDE` when above `r² + CIRCUMCIRCLE_EPSILON`,
/// `BOUNDARY` otherwise.
///
/// # Errors
///
/// Propagates [`circumcircle`] failures for degenerate triangles.
///
/// # Example
///
/// ```
/// use delaunay_mesh::geometry::predicates::{incircle, InCircle};
/// use delaunay_mesh::point;
///
/// let (a, b, c) = (point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0));
/// assert_eq!(incircle(&a, &b, &c, &point!(1.0, 1.0)).unwrap(), InCircle::BOUNDARY);
/// assert_eq!(incircle(&a, &b, &c, &point!(0.4, 0.4)).unwrap(), InCircle::INSIDE);
/// assert_eq!(incircle(&a, &b, &c, &point!(2.0, 2.0)).unwrap(), InCircle::OUTSIDE);
/// ```
pub fn incircle(a: &Point, b: &Point, c: &Point, p: &Point) -> Result<InCircle, PredicateError> {
    Ok(circumcircle(a, b, c)?.classify(p))
}

/// Returns `true` if `point` lies strictly inside the circumcircle of the
/// triangle whose vertex indices into `points` are given by `triangle`.
///
/// Points in the tolerance band are reported as not contained.
///
/// # Errors
///
/// Returns [`PredicateError::IndexOutOfBounds`] if an index is outside the
/// table, or [`PredicateError::DegenerateTriangle`] for a collinear triangle.
///
/// # Example
///
/// ```
/// use delaunay_mesh::geometry::predicates::circumcircle_contains;
/// use delaunay_mesh::point;
///
/// let table = [point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)];
/// assert!(circumcircle_contains([0, 1, 2], &point!(0.9, 0.9), &table).unwrap());
/// assert!(!circumcircle_contains([0, 1, 2], &point!(1.0, 1.0), &table).unwrap());
/// ```
pub fn circumcircle_contains(
    triangle: [usize; 3],
    point: &Point,
    points: &[Point],
) -> Result<bool, PredicateError> {
    let [a, b, c] = triangle.map(|index| {
        points
            .get(index)
            .ok_or(PredicateError::IndexOutOfBounds {
                index,
                len: points.len(),
            })
    });
    Ok(incircle(a?, b?, c?, point)? == InCircle::INSIDE)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point;
    use approx::assert_relative_eq;

    // =============================================================================
    // ORIENTATION TESTS
    // =============================================================================

    #[test]
    fn collinear_points_are_detected() {
        assert!(is_collinear(
            &point!(0.0, 0.0),
            &point!(1.0, 1.0),
            &point!(2.0, 2.0)
        ));
        assert!(is_collinear(
            &point!(0.0, 0.0),
            &point!(1.0, 0.0),
            &point!(-5.0, 0.0)
        ));
        // Area below the tolerance still counts as collinear.
        assert!(is_collinear(
            &point!(0.0, 0.0),
            &point!(1.0, 0.0),
            &point!(0.5, 1e-10)
        ));
        assert!(!is_collinear(
            &point!(0.0, 0.0),
            &point!(1.0, 0.0),
            &point!(0.5, 1e-8)
        ));
    }

    #[test]
    fn orientation_matches_winding() {
        let a = point!(0.0, 0.0);
        let b = point!(1.0, 0.0);
        let c = point!(0.0, 1.0);
        assert_eq!(orientation(&a, &b, &c), Orientation::POSITIVE);
        assert_eq!(orientation(&a, &c, &b), Orientation::NEGATIVE);
        assert_eq!(
            orientation(&a, &b, &point!(2.0, 0.0)),
            Orientation::DEGENERATE
        );
        assert_eq!(Orientation::POSITIVE.to_string(), "POSITIVE");
    }

    // =============================================================================
    // CIRCUMCIRCLE TESTS
    // =============================================================================

    #[test]
    fn circumcircle_of_right_triangle_is_centered_on_hypotenuse() {
        let circle = circumcircle(&point!(0.0, 0.0), &point!(4.0, 0.0), &point!(0.0, 3.0)).unwrap();
        assert_relative_eq!(circle.center.x(), 2.0);
        assert_relative_eq!(circle.center.y(), 1.5);
        assert_relative_eq!(circle.radius_squared, 6.25);
    }

    #[test]
    fn circumcircle_is_independent_of_winding() {
        let (a, b, c) = (point!(0.3, -1.2), point!(4.1, 0.7), point!(-0.8, 2.9));
        let ccw = circumcircle(&a, &b, &c).unwrap();
        let cw = circumcircle(&a, &c, &b).unwrap();
        assert_relative_eq!(ccw.center.x(), cw.center.x(), epsilon = 1e-12);
        assert_relative_eq!(ccw.center.y(), cw.center.y(), epsilon = 1e-12);
        assert_relative_eq!(ccw.radius_squared, cw.radius_squared, epsilon = 1e-12);
    }

    #[test]
    fn circumcircle_rejects_zero_denominator() {
        let err = circumcircle(&point!(0.0, 0.0), &point!(1.0, 1.0), &point!(2.0, 2.0))
            .unwrap_err();
        assert!(matches!(
            err,
            PredicateError::DegenerateTriangle { denominator, .. } if denominator == 0.0
        ));
        assert!(err.to_string().contains("Degenerate triangle"));
    }

    #[test]
    fn circumcircle_rejects_repeated_vertex() {
        let p = point!(1.0, 2.0);
        assert!(circumcircle(&p, &p, &point!(3.0, 4.0)).is_err());
    }

    #[test]
    fn precomputed_circle_agrees_with_incircle() {
        let (a, b, c) = (point!(0.0, 0.0), point!(4.0, 0.0), point!(0.0, 4.0));
        let circle = circumcircle(&a, &b, &c).unwrap();
        for p in [point!(1.0, 1.0), point!(4.0, 4.0), point!(5.0, 5.0)] {
            assert_eq!(circle.classify(&p), incircle(&a, &b, &c, &p).unwrap());
        }
        assert_eq!(circle.classify(&point!(4.0, 4.0)), InCircle::BOUNDARY);
    }

    #[test]
    fn incircle_classifies_inside_boundary_outside() {
        let (a, b, c) = (point!(0.0, 0.0), point!(2.0, 0.0), point!(0.0, 2.0));
        assert_eq!(incircle(&a, &b, &c, &point!(1.0, 1.0)).unwrap(), InCircle::INSIDE);
        // The fourth corner of the square is co-circular.
        assert_eq!(incircle(&a, &b, &c, &point!(2.0, 2.0)).unwrap(), InCircle::BOUNDARY);
        assert_eq!(incircle(&a, &b, &c, &point!(3.0, 3.0)).unwrap(), InCircle::OUTSIDE);
        // Vertices are on their own circle.
        assert_eq!(incircle(&a, &b, &c, &a).unwrap(), InCircle::BOUNDARY);
        assert_eq!(InCircle::INSIDE.to_string(), "INSIDE");
    }

    #[test]
    fn containment_excludes_tolerance_band() {
        // radius² = 0.5 around (0.5, 0.5); a point with d² = r² - 1e-12 is in the band.
        let table = [point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)];
        let almost_on_circle = point!(0.5 + (0.5_f64 - 1e-12).sqrt(), 0.5);
        assert!(!circumcircle_contains([0, 1, 2], &almost_on_circle, &table).unwrap());
        assert!(circumcircle_contains([2, 0, 1], &point!(0.5, 0.5), &table).unwrap());
    }

    #[test]
    fn containment_reports_bad_indices() {
        let table = [point!(0.0, 0.0), point!(1.0, 0.0)];
        let err = circumcircle_contains([0, 1, 2], &point!(0.1, 0.1), &table).unwrap_err();
        assert_eq!(err, PredicateError::IndexOutOfBounds { index: 2, len: 2 });
    }
}
