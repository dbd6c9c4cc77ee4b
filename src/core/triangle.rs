//! Triangles as canonical index triples.
//!
//! A [`Triangle`] names three positions in a point set. The vertex order is not
//! meaningful, so every constructor stores the indices in ascending order;
//! equality, hashing and set membership are therefore order-independent.

#![forbid(unsafe_code)]

use crate::geometry::point::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An edge as an ordered pair of point indices, in the winding order of the
/// triangle it was taken from.
pub type DirectedEdge = [usize; 2];

/// An unordered triple of point indices, stored in canonical (ascending) form.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::triangle::Triangle;
///
/// let t = Triangle::new(7, 2, 5);
/// assert_eq!(t.vertices(), [2, 5, 7]);
/// assert_eq!(t, Triangle::from([5, 7, 2]));
/// assert_eq!(t.to_string(), "(2, 5, 7)");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "[usize; 3]", into = "[usize; 3]")]
pub struct Triangle {
    vertices: [usize; 3],
}

impl Triangle {
    /// Creates a triangle from three indices in any order.
    #[inline]
    #[must_use]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        let mut vertices = [a, b, c];
        vertices.sort_unstable();
        Self { vertices }
    }

    /// The three indices in ascending order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [usize; 3] {
        self.vertices
    }

    /// Returns `true` if `index` is one of the vertices.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.vertices.contains(&index)
    }

    /// Largest vertex index.
    #[inline]
    #[must_use]
    pub const fn max_index(&self) -> usize {
        self.vertices[2]
    }

    /// Returns `true` if two of the indices coincide.
    #[inline]
    #[must_use]
    pub const fn has_repeated_vertex(&self) -> bool {
        let [a, b, c] = self.vertices;
        a == b || b == c
    }

    /// The three edges `(v0, v1)`, `(v1, v2)`, `(v0, v2)` of the canonical form.
    #[must_use]
    pub const fn edges(&self) -> [DirectedEdge; 3] {
        let [a, b, c] = self.vertices;
        [[a, b], [b, c], [a, c]]
    }

    /// Looks up the vertex coordinates in `points`, or `None` if any index is
    /// out of range.
    #[must_use]
    pub fn points(&self, points: &[Point]) -> Option<[Point; 3]> {
        let [a, b, c] = self.vertices;
        Some([*points.get(a)?, *points.get(b)?, *points.get(c)?])
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.vertices;
        write!(f, "({a}, {b}, {c})")
    }
}

impl From<[usize; 3]> for Triangle {
    #[inline]
    fn from([a, b, c]: [usize; 3]) -> Self {
        Self::new(a, b, c)
    }
}

impl From<(usize, usize, usize)> for Triangle {
    #[inline]
    fn from((a, b, c): (usize, usize, usize)) -> Self {
        Self::new(a, b, c)
    }
}

impl From<Triangle> for [usize; 3] {
    #[inline]
    fn from(triangle: Triangle) -> Self {
        triangle.vertices
    }
}

// =============================================================================
// TESTS
// =============================================================================
