//! Byte-in, byte-out triangulation: decode a point set, triangulate it and
//! encode the resulting mesh.

#![forbid(unsafe_code)]

use crate::core::algorithms::bowyer_watson::{BowyerWatson, TriangulationError};
use crate::core::options::TriangulationOptions;
use crate::io::binary::{CodecError, decode_point_set, encode_mesh};
use thiserror::Error;

/// Any error the pipeline can return.
///
/// Both sources are kept intact so a transport layer can map every case to
/// its own status without string matching.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The input or output buffer could not be decoded or encoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The decoded point set could not be triangulated.
    #[error(transparent)]
    Triangulation(#[from] TriangulationError),
}

impl Error {
    /// Returns `true` when the failure is an internal invariant violation
    /// rather than a problem with the input or a caller-requested abort.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Codec(_) => false,
            Self::Triangulation(err) => err.is_internal(),
        }
    }
}

/// Triangulates an encoded point set with default options and returns the
/// encoded mesh.
///
/// # Errors
///
/// Returns [`Error::Codec`] for malformed input and [`Error::Triangulation`]
/// for point sets that cannot be triangulated.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::io::binary::{decode_mesh, encode_point_set};
/// use delaunay_mesh::pipeline::triangulate_bytes;
/// use delaunay_mesh::point;
///
/// let request = encode_point_set(&[point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)]).unwrap();
/// let response = triangulate_bytes(&request).unwrap();
/// let mesh = decode_mesh(&response).unwrap();
/// assert_eq!(mesh.number_of_triangles(), 1);
/// ```
pub fn triangulate_bytes(buffer: &[u8]) -> Result<Vec<u8>, Error> {
    triangulate_bytes_with_options(buffer, TriangulationOptions::default())
}

/// Same as [`triangulate_bytes`] with explicit options.
///
/// # Errors
///
/// See [`triangulate_bytes`]; cancellation and timeouts surface as
/// [`Error::Triangulation`].
pub fn triangulate_bytes_with_options(
    buffer: &[u8],
    options: TriangulationOptions,
) -> Result<Vec<u8>, Error> {
    let point_set = decode_point_set(buffer)?;
    let triangles = BowyerWatson::new(options).triangulate(point_set.points())?;
    tracing::debug!(
        "triangulate_bytes: {} points -> {} triangles",
        point_set.len(),
        triangles.len()
    );
    Ok(encode_mesh(&triangles, point_set.points())?)
}

// =============================================================================
// TESTS
// =============================================================================
