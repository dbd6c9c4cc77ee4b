//! Geometric helpers used by the triangulator, tests and benchmarks.
//!
//! - [`BoundingBox`] and [`super_triangle`] seed the incremental algorithm.
//! - [`generate_random_points_seeded`] and [`generate_grid_points`] produce
//!   reproducible inputs.

#![forbid(unsafe_code)]

use crate::geometry::point::Point;
use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;

/// Multiplier applied to the bounding-box extent when placing the
/// super-triangle vertices.
pub const SUPER_TRIANGLE_SCALE: f64 = 1e6;

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// Axis-aligned bounding box of a point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Lower-left corner.
    pub min: Point,
    /// Upper-right corner.
    pub max: Point,
}

impl BoundingBox {
    /// Computes the bounding box of `points`, or `None` for an empty slice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay_mesh::geometry::util::BoundingBox;
    /// use delaunay_mesh::point;
    ///
    /// let bbox = BoundingBox::from_points(&[point!(1.0, -1.0), point!(-2.0, 4.0)]).unwrap();
    /// assert_eq!(bbox.min, point!(-2.0, -1.0));
    /// assert_eq!(bbox.max, point!(1.0, 4.0));
    /// assert_eq!(bbox.max_extent(), 5.0);
    /// ```
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y) = (first.x(), first.y());
        let (mut max_x, mut max_y) = (min_x, min_y);

        for p in &points[1..] {
            min_x = min_x.min(p.x());
            min_y = min_y.min(p.y());
            max_x = max_x.max(p.x());
            max_y = max_y.max(p.y());
        }

        Some(Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        })
    }

    /// Extent along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x() - self.min.x()
    }

    /// Extent along y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y() - self.min.y()
    }

    /// The larger of [`width`](Self::width) and [`height`](Self::height).
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.width().max(self.height())
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x() + self.max.x()) / 2.0,
            (self.min.y() + self.max.y()) / 2.0,
        )
    }
}

/// Builds the synthetic super-triangle enclosing `bbox`.
///
/// With `s = SUPER_TRIANGLE_SCALE * max(1, max_extent)` and `(mx, my)` the box
/// center, the vertices are `(mx − 2s, my − s)`, `(mx, my + 2s)` and
/// `(mx + 2s, my − s)`, in that order.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::util::{BoundingBox, super_triangle};
/// use delaunay_mesh::point;
///
/// let bbox = BoundingBox::from_points(&[point!(0.0, 0.0), point!(1.0, 1.0)]).unwrap();
/// let [a, b, c] = super_triangle(&bbox);
/// assert_eq!(a, point!(0.5 - 2e6, 0.5 - 1e6));
/// assert_eq!(b, point!(0.5, 0.5 + 2e6));
/// assert_eq!(c, point!(0.5 + 2e6, 0.5 - 1e6));
/// ```
#[must_use]
pub fn super_triangle(bbox: &BoundingBox) -> [Point; 3] {
    let mid = bbox.center();
    let scale = SUPER_TRIANGLE_SCALE * bbox.max_extent().max(1.0);

    [
        Point::new(mid.x() - 2.0 * scale, mid.y() - scale),
        Point::new(mid.x(), mid.y() + 2.0 * scale),
        Point::new(mid.x() + 2.0 * scale, mid.y() - scale),
    ]
}

// =============================================================================
// POINT GENERATION
// =============================================================================

/// Errors from the point generators.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RandomPointGenerationError {
    /// The coordinate range is empty or inverted.
    #[error("Invalid coordinate range: min {min} must be less than max {max}")]
    InvalidRange {
        /// Lower bound, as a string.
        min: String,
        /// Upper bound, as a string.
        max: String,
    },
    /// The requested number of points is invalid.
    #[error("Invalid point count: {n_points}")]
    InvalidPointCount {
        /// Requested count.
        n_points: usize,
    },
}

/// Generates `n_points` uniformly distributed points in `[range.0, range.1)²`
/// from a fixed seed.
///
/// The same seed always yields the same sequence, which keeps property tests
/// and benchmarks reproducible.
///
/// # Errors
///
/// Returns [`RandomPointGenerationError::InvalidRange`] if `range.0 >= range.1`
/// or either bound is not finite.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::util::generate_random_points_seeded;
///
/// let a = generate_random_points_seeded(50, (-1.0, 1.0), 42).unwrap();
/// let b = generate_random_points_seeded(50, (-1.0, 1.0), 42).unwrap();
/// assert_eq!(a, b);
/// assert!(a.iter().all(|p| (-1.0..1.0).contains(&p.x())));
/// ```
pub fn generate_random_points_seeded(
    n_points: usize,
    range: (f64, f64),
    seed: u64,
) -> Result<Vec<Point>, RandomPointGenerationError> {
    if !(range.0.is_finite() && range.1.is_finite()) || range.0 >= range.1 {
        return Err(RandomPointGenerationError::InvalidRange {
            min: format!("{:?}", range.0),
            max: format!("{:?}", range.1),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let points = (0..n_points)
        .map(|_| {
            Point::new(
                rng.random_range(range.0..range.1),
                rng.random_range(range.0..range.1),
            )
        })
        .collect();

    Ok(points)
}

/// Generates a `points_per_side × points_per_side` grid with the given spacing,
/// starting at `offset`, in row-major order.
///
/// Grids are highly co-circular and exercise the tolerance band of the
/// circumcircle predicate.
///
/// # Errors
///
/// Returns [`RandomPointGenerationError::InvalidPointCount`] for an empty grid.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::geometry::util::generate_grid_points;
/// use delaunay_mesh::point;
///
/// let grid = generate_grid_points(3, 0.5, point!(1.0, 1.0)).unwrap();
/// assert_eq!(grid.len(), 9);
/// assert_eq!(grid[4], point!(1.5, 1.5));
/// ```
pub fn generate_grid_points(
    points_per_side: usize,
    spacing: f64,
    offset: Point,
) -> Result<Vec<Point>, RandomPointGenerationError> {
    if points_per_side == 0 {
        return Err(RandomPointGenerationError::InvalidPointCount { n_points: 0 });
    }

    let mut points = Vec::with_capacity(points_per_side * points_per_side);
    for row in 0..points_per_side {
        for col in 0..points_per_side {
            #[expect(clippy::cast_precision_loss, reason = "grid sizes are small")]
            points.push(Point::new(
                offset.x() + col as f64 * spacing,
                offset.y() + row as f64 * spacing,
            ));
        }
    }
    Ok(points)
}

// =============================================================================
// TESTS
// =============================================================================
