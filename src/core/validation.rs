//! Delaunay empty-circumcircle property validation.

#![forbid(unsafe_code)]

use crate::core::triangle::Triangle;
use crate::geometry::point::Point;
use crate::geometry::predicates::{InCircle, PredicateError, circumcircle};
use thiserror::Error;

/// Errors that can occur during Delaunay property validation.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::triangle::Triangle;
/// use delaunay_mesh::core::validation::DelaunayValidationError;
///
/// let err = DelaunayValidationError::DelaunayViolation {
///     triangle: Triangle::new(0, 1, 2),
///     point: 3,
/// };
/// assert!(err.to_string().contains("(0, 1, 2)"));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DelaunayValidationError {
    /// A triangle has another input point strictly inside its circumcircle.
    #[error("Triangle {triangle} violates the Delaunay property: point {point} is inside its circumcircle")]
    DelaunayViolation {
        /// The violating triangle.
        triangle: Triangle,
        /// Index of the point inside the circumcircle.
        point: usize,
    },
    /// A triangle references a point that does not exist.
    #[error("Triangle {triangle} references a point outside a set of {len} points")]
    IndexOutOfBounds {
        /// The offending triangle.
        triangle: Triangle,
        /// Number of points in the set.
        len: usize,
    },
    /// A triangle has no circumcircle.
    #[error("Triangle {triangle} is degenerate: {source}")]
    DegenerateTriangle {
        /// The offending triangle.
        triangle: Triangle,
        /// The underlying predicate error.
        #[source]
        source: PredicateError,
    },
}

/// A triangle together with one input point found inside its circumcircle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DelaunayViolation {
    /// The violating triangle.
    pub triangle: Triangle,
    /// Index of the offending point.
    pub point: usize,
}

/// Finds every `(triangle, point)` pair where the point lies strictly inside the
/// triangle's circumcircle, beyond the predicate's tolerance band.
///
/// Vertices of a triangle are never tested against their own triangle. Each
/// circumcircle is solved once, so a degenerate triangle is an error even when
/// no other point exists. The check is `O(T * n)`.
///
/// # Errors
///
/// Returns [`DelaunayValidationError::IndexOutOfBounds`] or
/// [`DelaunayValidationError::DegenerateTriangle`] if a triangle cannot be
/// evaluated at all.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::triangle::Triangle;
/// use delaunay_mesh::core::validation::find_delaunay_violations;
/// use delaunay_mesh::point;
///
/// let points = [point!(0.0, 0.0), point!(4.0, 0.0), point!(0.0, 4.0), point!(1.0, 1.0)];
/// let violations = find_delaunay_violations(&points, &[Triangle::new(0, 1, 2)]).unwrap();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].point, 3);
/// ```
pub fn find_delaunay_violations(
    points: &[Point],
    triangles: &[Triangle],
) -> Result<Vec<DelaunayViolation>, DelaunayValidationError> {
    let mut violations = Vec::new();

    for &triangle in triangles {
        let [a, b, c] = triangle
            .points(points)
            .ok_or(DelaunayValidationError::IndexOutOfBounds {
                triangle,
                len: points.len(),
            })?;
        let circle = circumcircle(&a, &b, &c)
            .map_err(|source| DelaunayValidationError::DegenerateTriangle { triangle, source })?;

        for (index, point) in points.iter().enumerate() {
            if triangle.contains(index) {
                continue;
            }
            if circle.classify(point) == InCircle::INSIDE {
                violations.push(DelaunayViolation {
                    triangle,
                    point: index,
                });
            }
        }
    }

    tracing::debug!(
        "find_delaunay_violations: checked {} triangles against {} points, found {} violations",
        triangles.len(),
        points.len(),
        violations.len()
    );

    Ok(violations)
}

/// Validates the empty-circumcircle property, failing on the first violation.
///
/// # Errors
///
/// Returns [`DelaunayValidationError::DelaunayViolation`] for the first
/// violating pair, or the errors of [`find_delaunay_violations`].
pub fn validate_delaunay(
    points: &[Point],
    triangles: &[Triangle],
) -> Result<(), DelaunayValidationError> {
    match find_delaunay_violations(points, triangles)?.first() {
        Some(&DelaunayViolation { triangle, point }) => {
            Err(DelaunayValidationError::DelaunayViolation { triangle, point })
        }
        None => Ok(()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
