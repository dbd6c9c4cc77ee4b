//! The triangle mesh exchanged with collaborators: a point set plus the
//! triangles built over it.

#![forbid(unsafe_code)]

use crate::core::algorithms::bowyer_watson::{BowyerWatson, TriangulationError};
use crate::core::collections::fast_hash_map_with_capacity;
use crate::core::options::TriangulationOptions;
use crate::core::triangle::Triangle;
use crate::core::validation::{DelaunayValidationError, validate_delaunay};
use crate::geometry::point::PointSet;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use thiserror::Error;

/// Structural problems found by [`Mesh::validate`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MeshValidationError {
    /// A triangle references a point index outside the point set.
    #[error(
        "Triangle {triangle_index} {triangle} references point {index}, but the mesh has {point_count} points"
    )]
    IndexOutOfBounds {
        /// Position of the triangle in the mesh.
        triangle_index: usize,
        /// The offending triangle.
        triangle: Triangle,
        /// The out-of-range point index.
        index: usize,
        /// Number of points in the mesh.
        point_count: usize,
    },
    /// A triangle uses the same point twice.
    #[error("Triangle {triangle_index} {triangle} repeats a vertex")]
    RepeatedVertex {
        /// Position of the triangle in the mesh.
        triangle_index: usize,
        /// The offending triangle.
        triangle: Triangle,
    },
    /// The same triangle appears twice.
    #[error("Triangle {triangle} appears at positions {first} and {second}")]
    DuplicateTriangle {
        /// The repeated triangle.
        triangle: Triangle,
        /// First position.
        first: usize,
        /// Second position.
        second: usize,
    },
}

/// A point set and the triangles over it.
///
/// Triangle vertex indices refer to positions in [`points`](Mesh::points).
/// A mesh built by [`Mesh::from_points`] always passes [`Mesh::validate`];
/// a mesh assembled with [`Mesh::new`] or decoded from bytes is not checked.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::mesh::Mesh;
/// use delaunay_mesh::point;
///
/// let mesh = Mesh::from_points(vec![
///     point!(0.0, 0.0),
///     point!(1.0, 0.0),
///     point!(0.0, 1.0),
///     point!(1.0, 1.0),
/// ])
/// .unwrap();
/// assert_eq!(mesh.number_of_points(), 4);
/// assert_eq!(mesh.number_of_triangles(), 2);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    points: PointSet,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Assembles a mesh without checking it.
    #[must_use]
    pub fn new(points: impl Into<PointSet>, triangles: Vec<Triangle>) -> Self {
        Self {
            points: points.into(),
            triangles,
        }
    }

    /// Triangulates `points` with default options and wraps the result.
    ///
    /// # Errors
    ///
    /// Returns the [`TriangulationError`] of the triangulator.
    pub fn from_points(points: impl Into<PointSet>) -> Result<Self, TriangulationError> {
        Self::from_points_with_options(points, TriangulationOptions::default())
    }

    /// Triangulates `points` with the given options and wraps the result.
    ///
    /// # Errors
    ///
    /// Returns the [`TriangulationError`] of the triangulator.
    pub fn from_points_with_options(
        points: impl Into<PointSet>,
        options: TriangulationOptions,
    ) -> Result<Self, TriangulationError> {
        let points = points.into();
        let triangles = BowyerWatson::new(options).triangulate(points.points())?;
        Ok(Self { points, triangles })
    }

    /// The point set.
    #[must_use]
    pub const fn points(&self) -> &PointSet {
        &self.points
    }

    /// The triangles, in the order they were produced or decoded.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of points.
    #[must_use]
    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn number_of_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Splits the mesh into its parts.
    #[must_use]
    pub fn into_parts(self) -> (PointSet, Vec<Triangle>) {
        (self.points, self.triangles)
    }

    /// Checks that every triangle references existing, pairwise distinct points
    /// and that no triangle is listed twice.
    ///
    /// # Errors
    ///
    /// Returns the first [`MeshValidationError`] found, in triangle order.
    pub fn validate(&self) -> Result<(), MeshValidationError> {
        let point_count = self.points.len();
        let mut seen = fast_hash_map_with_capacity(self.triangles.len());

        for (triangle_index, &triangle) in self.triangles.iter().enumerate() {
            if let Some(&index) = triangle.vertices().iter().find(|&&v| v >= point_count) {
                return Err(MeshValidationError::IndexOutOfBounds {
                    triangle_index,
                    triangle,
                    index,
                    point_count,
                });
            }
            if triangle.has_repeated_vertex() {
                return Err(MeshValidationError::RepeatedVertex {
                    triangle_index,
                    triangle,
                });
            }
            match seen.entry(triangle) {
                Entry::Occupied(entry) => {
                    return Err(MeshValidationError::DuplicateTriangle {
                        triangle,
                        first: *entry.get(),
                        second: triangle_index,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(triangle_index);
                }
            }
        }
        Ok(())
    }

    /// Checks the empty-circumcircle property over the mesh points.
    ///
    /// # Errors
    ///
    /// See [`validate_delaunay`].
    pub fn validate_delaunay(&self) -> Result<(), DelaunayValidationError> {
        validate_delaunay(self.points.points(), &self.triangles)
    }
}

// =============================================================================
// TESTS
// =============================================================================
