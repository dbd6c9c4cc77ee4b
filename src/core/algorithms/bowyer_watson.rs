//! Incremental Bowyer-Watson algorithm for planar Delaunay triangulation.
//!
//! # Algorithm Overview
//!
//! 1. **Initialization**: append three synthetic super-triangle vertices at
//!    indices `n`, `n + 1`, `n + 2` (see [`super_triangle`]) and start from the
//!    single triangle they span.
//! 2. **Incremental insertion**: for each input point, in input order:
//!    - collect the *bad* triangles, whose circumcircle strictly contains the
//!      point, oldest first;
//!    - collect the cavity boundary, the edges of bad triangles not shared with
//!      another bad triangle, in `(a, b)`, `(b, c)`, `(c, a)` order per triangle;
//!    - remove the bad triangles and fan every boundary edge to the new point.
//! 3. **Cleanup**: drop every triangle touching a super-triangle vertex and
//!    canonicalize the rest. The output follows creation order.
//!
//! # Preconditions
//!
//! Inputs are checked before any work is done, in this order:
//!
//! | Check | Error |
//! |---|---|
//! | fewer than 3 points | [`TriangulationError::InsufficientPoints`] |
//! | two points with identical coordinates | [`TriangulationError::DuplicatePoints`] |
//! | every point collinear with the first two | [`TriangulationError::AllCollinear`] |
//! | NaN or infinite coordinate | [`TriangulationError::NonFiniteCoordinate`] |
//! | more points than `max_points` | [`TriangulationError::TooManyPoints`] |
//!
//! # Tolerance band
//!
//! Containment uses a fixed `1e-9` band around the circumradius. A point that
//! falls in the band of every triangle has an empty cavity; it is skipped,
//! logged at `warn` and counted in [`TriangulationStatistics::points_skipped`].
//!
//! # References
//!
//! - **Bowyer, A.** "Computing Dirichlet tessellations." *The Computer Journal* 24.2 (1981): 162-166.
//!   DOI: [10.1093/comjnl/24.2.162](https://doi.org/10.1093/comjnl/24.2.162)
//! - **Watson, D.F.** "Computing the n-dimensional Delaunay tessellation with application to
//!   Voronoi polytopes." *The Computer Journal* 24.2 (1981): 167-172.
//!   DOI: [10.1093/comjnl/24.2.167](https://doi.org/10.1093/comjnl/24.2.167)
//! - **de Berg, M., Cheong, O., van Kreveld, M., and Overmars, M.**
//!   *Computational Geometry: Algorithms and Applications.* 3rd ed. Springer-Verlag, 2008.
//!   Chapter 9: Delaunay Triangulations.

#![forbid(unsafe_code)]

use crate::core::arena::TriangleArena;
use crate::core::collections::{
    BadTriangleBuffer, CAVITY_BUFFER_SIZE, CavityBoundaryBuffer, FastHashMap, SmallBuffer,
    fast_hash_map_with_capacity,
};
use crate::core::options::TriangulationOptions;
use crate::core::triangle::{DirectedEdge, Triangle};
use crate::core::validation::{DelaunayValidationError, validate_delaunay};
use crate::geometry::point::Point;
use crate::geometry::predicates::{PredicateError, circumcircle_contains, is_collinear};
use crate::geometry::util::{BoundingBox, super_triangle};
use std::collections::hash_map::Entry;
use std::time::{Duration, Instant};
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors that can occur while triangulating a point set.
///
/// The first five variants describe unusable input and are reported before any
/// triangle is built. `Cancelled` and `DeadlineExceeded` come from the caller's
/// [`TriangulationOptions`]. `InternalInvariantViolation` signals a
/// floating-point breakdown inside the algorithm, such as a zero circumcircle
/// denominator. It is reachable on valid input, typically nearly co-circular
/// points far from the origin, and is never retried.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TriangulationError {
    /// Fewer than three points were supplied.
    #[error("Insufficient points to form a triangle: got {count}, need at least 3")]
    InsufficientPoints {
        /// Number of points supplied.
        count: usize,
    },

    /// Two points have identical coordinates.
    #[error("Duplicate points: index {first} and index {second} have the same coordinates")]
    DuplicatePoints {
        /// Index of the first occurrence.
        first: usize,
        /// Index of the later occurrence.
        second: usize,
    },

    /// Every point lies on the line through the first two points.
    #[error("All {count} points are collinear")]
    AllCollinear {
        /// Number of points supplied.
        count: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("Point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },

    /// The input exceeds the configured point limit.
    #[error("Too many points: {count} exceeds the limit of {limit}")]
    TooManyPoints {
        /// Number of points supplied.
        count: usize,
        /// Configured limit.
        limit: usize,
    },

    /// The cancellation token was triggered.
    #[error("Triangulation cancelled after inserting {inserted} of {total} points")]
    Cancelled {
        /// Points processed before cancellation.
        inserted: usize,
        /// Total number of input points.
        total: usize,
    },

    /// The configured timeout elapsed.
    #[error("Triangulation exceeded its {timeout:?} timeout after inserting {inserted} of {total} points")]
    DeadlineExceeded {
        /// Points processed before the deadline.
        inserted: usize,
        /// Total number of input points.
        total: usize,
        /// The configured timeout.
        timeout: Duration,
    },

    /// An algorithm invariant was broken.
    #[error("Internal invariant violation: {message}")]
    InternalInvariantViolation {
        /// Description of the violation.
        message: String,
    },
}

impl TriangulationError {
    /// Returns `true` for [`InternalInvariantViolation`](Self::InternalInvariantViolation).
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::InternalInvariantViolation { .. })
    }

    /// Returns `true` for errors caused by the shape of the input.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPoints { .. }
                | Self::DuplicatePoints { .. }
                | Self::AllCollinear { .. }
                | Self::NonFiniteCoordinate { .. }
                | Self::TooManyPoints { .. }
        )
    }
}

impl From<PredicateError> for TriangulationError {
    fn from(source: PredicateError) -> Self {
        Self::InternalInvariantViolation {
            message: source.to_string(),
        }
    }
}

impl From<DelaunayValidationError> for TriangulationError {
    fn from(source: DelaunayValidationError) -> Self {
        Self::InternalInvariantViolation {
            message: source.to_string(),
        }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters collected during one triangulation call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriangulationStatistics {
    /// Points whose cavity was re-triangulated.
    pub points_inserted: usize,
    /// Points skipped because their cavity was empty.
    pub points_skipped: usize,
    /// Triangles created, including the super-triangle.
    pub triangles_created: u64,
    /// Triangles removed as part of a cavity.
    pub triangles_removed: u64,
    /// Live triangles before super-triangle cleanup.
    pub live_triangles: usize,
    /// Triangles in the returned result.
    pub output_triangles: usize,
    /// Largest number of bad triangles seen for one point.
    pub max_cavity_size: usize,
    /// Circumcircle containment tests performed.
    pub circumcircle_tests: u64,
}

impl TriangulationStatistics {
    /// Points processed so far, inserted or skipped.
    #[must_use]
    pub const fn points_processed(&self) -> usize {
        self.points_inserted + self.points_skipped
    }
}

// =============================================================================
// TRIANGULATOR
// =============================================================================

/// Bowyer-Watson triangulator.
///
/// Holds the options applied to every call and the statistics of the most
/// recent call; no geometric state survives between calls.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::algorithms::bowyer_watson::BowyerWatson;
/// use delaunay_mesh::core::options::TriangulationOptions;
/// use delaunay_mesh::core::triangle::Triangle;
/// use delaunay_mesh::point;
///
/// let mut triangulator = BowyerWatson::new(TriangulationOptions::default());
/// let triangles = triangulator
///     .triangulate(&[point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)])
///     .unwrap();
///
/// assert_eq!(triangles, vec![Triangle::new(0, 1, 2)]);
/// assert_eq!(triangulator.statistics().points_inserted, 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BowyerWatson {
    options: TriangulationOptions,
    statistics: TriangulationStatistics,
}

impl BowyerWatson {
    /// Creates a triangulator with the given options.
    #[must_use]
    pub fn new(options: TriangulationOptions) -> Self {
        Self {
            options,
            statistics: TriangulationStatistics::default(),
        }
    }

    /// The options applied to every call.
    #[must_use]
    pub const fn options(&self) -> &TriangulationOptions {
        &self.options
    }

    /// Statistics of the most recent call, including a failed one.
    #[must_use]
    pub const fn statistics(&self) -> &TriangulationStatistics {
        &self.statistics
    }

    /// Triangulates `points`, returning canonical triangles in creation order.
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition (see the module docs),
    /// [`TriangulationError::Cancelled`] or
    /// [`TriangulationError::DeadlineExceeded`] when the options say so, and
    /// [`TriangulationError::InternalInvariantViolation`] if a degenerate
    /// triangle is ever met or the optional output validation fails.
    pub fn triangulate(&mut self, points: &[Point]) -> Result<Vec<Triangle>, TriangulationError> {
        let mut statistics = TriangulationStatistics::default();
        let result = run(points, &self.options, &mut statistics);
        self.statistics = statistics;
        result
    }
}

/// Triangulates `points` with default options.
///
/// # Errors
///
/// See [`BowyerWatson::triangulate`].
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::algorithms::bowyer_watson::{triangulate, TriangulationError};
/// use delaunay_mesh::point;
///
/// let square = [point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0), point!(1.0, 1.0)];
/// assert_eq!(triangulate(&square).unwrap().len(), 2);
///
/// let line = [point!(0.0, 0.0), point!(1.0, 1.0), point!(2.0, 2.0)];
/// assert_eq!(
///     triangulate(&line),
///     Err(TriangulationError::AllCollinear { count: 3 })
/// );
/// ```
pub fn triangulate(points: &[Point]) -> Result<Vec<Triangle>, TriangulationError> {
    BowyerWatson::default().triangulate(points)
}

/// Checks the input preconditions without triangulating.
///
/// # Errors
///
/// Returns the first failing check, in the order listed in the module docs.
pub fn validate_input(
    points: &[Point],
    max_points: Option<usize>,
) -> Result<(), TriangulationError> {
    let count = points.len();
    if count < 3 {
        return Err(TriangulationError::InsufficientPoints { count });
    }

    check_duplicates(points)?;

    if let [p0, p1, rest @ ..] = points
        && rest.iter().all(|p| is_collinear(p0, p1, p))
    {
        return Err(TriangulationError::AllCollinear { count });
    }

    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(TriangulationError::NonFiniteCoordinate { index });
    }

    if let Some(limit) = max_points
        && count > limit
    {
        return Err(TriangulationError::TooManyPoints { count, limit });
    }

    Ok(())
}

fn check_duplicates(points: &[Point]) -> Result<(), TriangulationError> {
    let mut seen = fast_hash_map_with_capacity(points.len());
    // Non-finite points are reported by a later check.
    for (index, point) in points.iter().enumerate().filter(|(_, p)| p.is_finite()) {
        match seen.entry(point.exact_key()) {
            Entry::Occupied(entry) => {
                return Err(TriangulationError::DuplicatePoints {
                    first: *entry.get(),
                    second: index,
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(index);
            }
        }
    }
    Ok(())
}

fn run(
    points: &[Point],
    options: &TriangulationOptions,
    statistics: &mut TriangulationStatistics,
) -> Result<Vec<Triangle>, TriangulationError> {
    validate_input(points, options.max_points)?;

    let n = points.len();
    let started = Instant::now();
    tracing::debug!("Bowyer-Watson: triangulating {n} points");

    let Some(bbox) = BoundingBox::from_points(points) else {
        return Err(TriangulationError::InsufficientPoints { count: n });
    };
    let mut table = Vec::with_capacity(n + 3);
    table.extend_from_slice(points);
    table.extend(super_triangle(&bbox));

    // Euler: a planar triangulation of m vertices has at most 2m - 5 triangles.
    let mut arena = TriangleArena::with_capacity(2 * (n + 3));
    arena.insert([n, n + 1, n + 2]);

    let mut edge_counts: FastHashMap<DirectedEdge, u8> =
        fast_hash_map_with_capacity(3 * CAVITY_BUFFER_SIZE);

    for (index, point) in points.iter().enumerate() {
        check_interrupt(options, started, index, n)?;

        let mut bad = BadTriangleBuffer::new();
        for (key, triangle) in arena.iter() {
            statistics.circumcircle_tests += 1;
            let contained = circumcircle_contains(triangle.vertices(), point, &table)
                .map_err(|source| invariant_violation(index, &source))?;
            if contained {
                bad.push(key);
            }
        }

        if bad.is_empty() {
            tracing::warn!(
                "Bowyer-Watson: point {index} {point} is not strictly inside any circumcircle; skipping"
            );
            statistics.points_skipped += 1;
            continue;
        }

        arena.sort_by_creation(&mut bad);
        let cavity: SmallBuffer<_, CAVITY_BUFFER_SIZE> =
            bad.iter().filter_map(|&key| arena.remove(key)).collect();

        edge_counts.clear();
        for triangle in &cavity {
            for [a, b] in triangle.edges() {
                *edge_counts.entry(undirected(a, b)).or_insert(0) += 1;
            }
        }

        let mut boundary = CavityBoundaryBuffer::new();
        for triangle in &cavity {
            for edge @ [a, b] in triangle.edges() {
                if edge_counts.get(&undirected(a, b)) == Some(&1) {
                    boundary.push(edge);
                }
            }
        }

        for &[e0, e1] in &boundary {
            arena.insert([e0, e1, index]);
        }

        statistics.points_inserted += 1;
        statistics.max_cavity_size = statistics.max_cavity_size.max(cavity.len());
        tracing::trace!(
            "Bowyer-Watson: inserted point {index}: removed {} triangles, created {}",
            cavity.len(),
            boundary.len()
        );
    }

    statistics.triangles_created = arena.total_created();
    statistics.triangles_removed = arena.total_removed();
    statistics.live_triangles = arena.len();

    let triangles: Vec<Triangle> = arena
        .into_creation_order()
        .into_iter()
        .filter(|triangle| triangle.all_below(n))
        .map(|triangle| triangle.canonical())
        .collect();
    statistics.output_triangles = triangles.len();

    if options.validate_output {
        validate_delaunay(points, &triangles).map_err(|source| {
            tracing::error!("Bowyer-Watson: output failed Delaunay validation: {source}");
            TriangulationError::from(source)
        })?;
    }

    tracing::debug!(
        "Bowyer-Watson: {n} points -> {} triangles ({} skipped) in {:?}",
        triangles.len(),
        statistics.points_skipped,
        started.elapsed()
    );

    Ok(triangles)
}

fn check_interrupt(
    options: &TriangulationOptions,
    started: Instant,
    inserted: usize,
    total: usize,
) -> Result<(), TriangulationError> {
    if options.is_cancelled() {
        tracing::debug!("Bowyer-Watson: cancelled at point {inserted} of {total}");
        return Err(TriangulationError::Cancelled { inserted, total });
    }
    if let Some(timeout) = options.timeout
        && started.elapsed() >= timeout
    {
        tracing::debug!("Bowyer-Watson: {timeout:?} timeout hit at point {inserted} of {total}");
        return Err(TriangulationError::DeadlineExceeded {
            inserted,
            total,
            timeout,
        });
    }
    Ok(())
}

#[cold]
fn invariant_violation(index: usize, source: &PredicateError) -> TriangulationError {
    tracing::error!("Bowyer-Watson: invariant violated while inserting point {index}: {source}");
    TriangulationError::InternalInvariantViolation {
        message: format!("while inserting point {index}: {source}"),
    }
}

#[inline]
const fn undirected(a: usize, b: usize) -> DirectedEdge {
    if a <= b { [a, b] } else { [b, a] }
}

// =============================================================================
// TESTS
// =============================================================================
