//! # delaunay-mesh
//!
//! Planar Delaunay triangulation with the incremental
//! [Bowyer-Watson](https://en.wikipedia.org/wiki/Bowyer%E2%80%93Watson_algorithm)
//! algorithm, plus a byte-exact little-endian codec for exchanging point sets
//! and triangle meshes.
//!
//! # Features
//!
//! - Deterministic triangulation: the same input always yields the same
//!   triangles in the same order
//! - Typed precondition errors (too few points, duplicates, all collinear,
//!   non-finite coordinates, point limit)
//! - Cooperative cancellation and timeouts for untrusted inputs
//! - Binary codec that rejects truncated buffers and tolerates trailing bytes
//! - Serialization/Deserialization with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use delaunay_mesh::prelude::*;
//!
//! let points = vec![
//!     point!(0.0, 0.0),
//!     point!(2.0, 0.0),
//!     point!(1.0, 1.0),
//!     point!(0.0, 2.0),
//!     point!(2.0, 2.0),
//! ];
//!
//! let triangles = triangulate(&points).unwrap();
//! assert_eq!(triangles.len(), 4);
//! assert!(triangles.iter().all(|t| t.contains(2)));
//! ```
//!
//! # Wire Format
//!
//! A collaborator sends an encoded point set and receives an encoded mesh:
//!
//! ```rust
//! use delaunay_mesh::prelude::*;
//!
//! let request = encode_point_set(&[
//!     point!(0.0, 0.0),
//!     point!(1.0, 0.0),
//!     point!(0.0, 1.0),
//!     point!(1.0, 1.0),
//! ])
//! .unwrap();
//!
//! let response = triangulate_bytes(&request).unwrap();
//! let mesh = decode_mesh(&response).unwrap();
//! assert_eq!(mesh.number_of_points(), 4);
//! assert_eq!(mesh.number_of_triangles(), 2);
//! ```
//!
//! Every failure keeps its type through the pipeline:
//!
//! ```rust
//! use delaunay_mesh::prelude::*;
//! use delaunay_mesh::Error;
//!
//! let collinear = encode_point_set(&[
//!     point!(0.0, 0.0),
//!     point!(1.0, 1.0),
//!     point!(2.0, 2.0),
//! ])
//! .unwrap();
//!
//! assert!(matches!(
//!     triangulate_bytes(&collinear),
//!     Err(Error::Triangulation(TriangulationError::AllCollinear { count: 3 }))
//! ));
//! assert!(matches!(
//!     triangulate_bytes(&[3, 0, 0, 0]),
//!     Err(Error::Codec(CodecError::InsufficientBytes { .. }))
//! ));
//! ```
//!
//! # Numerical Behavior
//!
//! Predicates are plain `f64` arithmetic with absolute tolerances of `1e-9`
//! (see [`geometry::predicates`]). Nearly co-circular points inside the
//! tolerance band are treated as "not inside", which makes the triangulation of
//! regular grids stable but means the choice of diagonal in a co-circular quad
//! depends on insertion order. Duplicate detection is exact: `(0.1 + 0.2, 0)`
//! and `(0.3, 0)` are different points.
//!
//! Far from the origin the circumcircle formula loses precision. A cavity can
//! then produce a triangle whose circumcircle denominator rounds to zero, and
//! the call fails with
//! [`TriangulationError::InternalInvariantViolation`](crate::core::TriangulationError::InternalInvariantViolation).
//! Translating the input toward the origin avoids it.
//!
//! # Logging
//!
//! The library emits [`tracing`](https://docs.rs/tracing) events and never
//! installs a subscriber. Per-call summaries are logged at `debug`, per-point
//! progress at `trace`, skipped points and ignored trailing bytes at `warn`,
//! and invariant violations at `error`.

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// Triangle model, working storage, the triangulation algorithm, options and
/// validation.
pub mod core {
    /// Triangulation algorithms
    pub mod algorithms {
        /// Incremental Bowyer-Watson triangulation
        pub mod bowyer_watson;
        pub use bowyer_watson::*;
    }
    pub mod arena;
    /// Collection aliases
    pub mod collections;
    pub mod mesh;
    pub mod options;
    pub mod triangle;
    pub mod validation;

    pub use algorithms::*;
    pub use mesh::*;
    pub use options::*;
    pub use triangle::*;
    pub use validation::*;
}

/// Points, geometric predicates and geometric helpers.
pub mod geometry {
    pub mod point;
    pub mod predicates;
    pub mod util;

    pub use point::*;
    pub use predicates::*;
    pub use util::*;
}

/// Encoding and decoding.
pub mod io {
    pub mod binary;
    pub use binary::*;
}

pub mod pipeline;

pub use pipeline::Error;

/// A prelude module that re-exports commonly used types and macros.
pub mod prelude {
    pub use crate::core::{
        algorithms::bowyer_watson::{
            BowyerWatson, TriangulationError, TriangulationStatistics, triangulate,
        },
        mesh::{Mesh, MeshValidationError},
        options::{CancellationToken, TriangulationOptions, TriangulationOptionsBuilder},
        triangle::Triangle,
        validation::{DelaunayValidationError, find_delaunay_violations, validate_delaunay},
    };

    pub use crate::core::collections::{
        FastHashMap, FastHashSet, SmallBuffer, fast_hash_map_with_capacity,
        fast_hash_set_with_capacity,
    };

    pub use crate::geometry::{
        point::{Point, PointSet},
        predicates::{InCircle, Orientation, circumcircle_contains, is_collinear},
        util::{generate_grid_points, generate_random_points_seeded},
    };

    pub use crate::io::binary::{
        CodecError, decode_mesh, decode_point_set, encode_mesh, encode_point_set,
    };

    pub use crate::pipeline::{triangulate_bytes, triangulate_bytes_with_options};

    // Convenience macros
    pub use crate::point;
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{
        core::{arena::TriangleArena, mesh::Mesh, triangle::Triangle},
        geometry::{Point, PointSet},
        io::CodecError,
        is_normal,
    };

    // =============================================================================
    // TYPE SAFETY TESTS
    // =============================================================================

    #[test]
    fn normal_types() {
        assert!(is_normal::<Point>());
        assert!(is_normal::<PointSet>());
        assert!(is_normal::<Triangle>());
        assert!(is_normal::<Mesh>());
        assert!(is_normal::<TriangleArena>());
        assert!(is_normal::<CodecError>());
        assert!(is_normal::<crate::Error>());
    }

    #[test]
    fn test_prelude_exports() {
        use crate::prelude::*;

        let mut map: FastHashMap<u64, usize> = FastHashMap::default();
        map.insert(123, 456);
        assert_eq!(map.get(&123), Some(&456));

        let mut set: FastHashSet<u64> = FastHashSet::default();
        set.insert(789);
        assert!(set.contains(&789));

        let mut buffer: SmallBuffer<i32, 8> = SmallBuffer::new();
        buffer.push(42);
        assert_eq!(buffer.len(), 1);

        let points = vec![point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)];
        let mesh = Mesh::from_points(points.clone()).unwrap();
        assert_eq!(mesh.triangles(), &[Triangle::new(0, 1, 2)]);

        let bytes = encode_mesh(mesh.triangles(), &points).unwrap();
        assert_eq!(decode_mesh(&bytes).unwrap(), mesh);
    }
}
