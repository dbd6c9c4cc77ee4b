//! Little-endian binary wire format for point sets and meshes.
//!
//! # Layout
//!
//! ```text
//! PointSet:  u32 count | count × { f64 x | f64 y }
//! Mesh:      u32 pointCount | pointCount × { f64 x | f64 y }
//!            u32 triangleCount | triangleCount × { u32 i0 | u32 i1 | u32 i2 }
//! ```
//!
//! Decoding checks the declared counts against the buffer length before reading
//! and ignores anything after the last declared record, so producers may append
//! fields in later versions. Neither direction validates triangle indices.

#![forbid(unsafe_code)]

use crate::core::mesh::Mesh;
use crate::core::triangle::Triangle;
use crate::geometry::point::{Point, PointSet};
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use thiserror::Error;

/// Size of a `u32` count field.
pub const COUNT_SIZE: usize = 4;

/// Size of one encoded point (two `f64`).
pub const POINT_RECORD_SIZE: usize = 16;

/// Size of one encoded triangle (three `u32`).
pub const TRIANGLE_RECORD_SIZE: usize = 12;

/// Errors produced by the binary codec.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer is shorter than its header says it should be.
    #[error("Insufficient bytes for the specified number of records: expected at least {expected}, got {actual}")]
    InsufficientBytes {
        /// Minimum length implied by the counts read so far.
        expected: u64,
        /// Actual buffer length.
        actual: usize,
    },

    /// A mesh with no triangles cannot be encoded.
    #[error("No triangles to serialize")]
    EmptyTriangleSet,

    /// A count or index does not fit the `u32` wire field.
    #[error("{field} {value} does not fit in a u32 wire field")]
    ValueOutOfRange {
        /// Which field overflowed.
        field: &'static str,
        /// The value that did not fit.
        value: usize,
    },
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a point set.
///
/// # Errors
///
/// Returns [`CodecError::InsufficientBytes`] if the buffer is shorter than 4
/// bytes or shorter than `4 + 16 * count`.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::io::binary::decode_point_set;
/// use delaunay_mesh::point;
///
/// let mut bytes = 1_u32.to_le_bytes().to_vec();
/// bytes.extend(5.5_f64.to_le_bytes());
/// bytes.extend((-2.0_f64).to_le_bytes());
///
/// let set = decode_point_set(&bytes).unwrap();
/// assert_eq!(set.points(), &[point!(5.5, -2.0)]);
/// ```
pub fn decode_point_set(buffer: &[u8]) -> Result<PointSet, CodecError> {
    let mut reader = buffer;
    let count = read_count(&mut reader, buffer.len(), 0)?;
    let expected = records_end(0, count, POINT_RECORD_SIZE);
    ensure_length(buffer, expected)?;

    let points = read_points(&mut reader, count, buffer.len(), expected)?;
    note_trailing_bytes("point set", buffer.len(), expected);
    Ok(PointSet::new(points))
}

/// Decodes a mesh.
///
/// Triangles are canonicalized on the way in; their indices are not checked
/// against the point count (see [`Mesh::validate`]).
///
/// # Errors
///
/// Returns [`CodecError::InsufficientBytes`] if either count field is missing
/// or the buffer ends before the last declared record.
pub fn decode_mesh(buffer: &[u8]) -> Result<Mesh, CodecError> {
    let mut reader = buffer;
    let point_count = read_count(&mut reader, buffer.len(), 0)?;
    let points_end = records_end(0, point_count, POINT_RECORD_SIZE);
    // The triangle count must follow the points.
    ensure_length(buffer, points_end + COUNT_SIZE as u64)?;
    let points = read_points(&mut reader, point_count, buffer.len(), points_end)?;

    let triangle_count = read_count(&mut reader, buffer.len(), points_end)?;
    let expected = records_end(points_end, triangle_count, TRIANGLE_RECORD_SIZE);
    ensure_length(buffer, expected)?;

    let mut triangles = Vec::with_capacity(triangle_count as usize);
    for _ in 0..triangle_count {
        let mut indices = [0_usize; 3];
        for index in &mut indices {
            *index = reader
                .read_u32::<LittleEndian>()
                .map_err(|_| truncated(expected, buffer.len()))? as usize;
        }
        triangles.push(Triangle::from(indices));
    }

    note_trailing_bytes("mesh", buffer.len(), expected);
    Ok(Mesh::new(points, triangles))
}

fn read_count(reader: &mut &[u8], actual: usize, offset: u64) -> Result<u32, CodecError> {
    reader
        .read_u32::<LittleEndian>()
        .map_err(|_| truncated(offset + COUNT_SIZE as u64, actual))
}

fn read_points(
    reader: &mut &[u8],
    count: u32,
    actual: usize,
    expected: u64,
) -> Result<Vec<Point>, CodecError> {
    let mut points = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let x = reader
            .read_f64::<LittleEndian>()
            .map_err(|_| truncated(expected, actual))?;
        let y = reader
            .read_f64::<LittleEndian>()
            .map_err(|_| truncated(expected, actual))?;
        points.push(Point::new(x, y));
    }
    Ok(points)
}

/// Offset just past `count` records of `record_size` bytes that follow a count
/// field at `offset`.
const fn records_end(offset: u64, count: u32, record_size: usize) -> u64 {
    offset + COUNT_SIZE as u64 + count as u64 * record_size as u64
}

fn ensure_length(buffer: &[u8], expected: u64) -> Result<(), CodecError> {
    if (buffer.len() as u64) < expected {
        return Err(truncated(expected, buffer.len()));
    }
    Ok(())
}

#[cold]
const fn truncated(expected: u64, actual: usize) -> CodecError {
    CodecError::InsufficientBytes { expected, actual }
}

fn note_trailing_bytes(what: &str, actual: usize, consumed: u64) {
    let trailing = actual as u64 - consumed;
    if trailing > 0 {
        tracing::warn!("decoded {what}: ignoring {trailing} trailing bytes");
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a point set.
///
/// # Errors
///
/// Returns [`CodecError::ValueOutOfRange`] if there are more than `u32::MAX`
/// points.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::io::binary::{decode_point_set, encode_point_set};
/// use delaunay_mesh::point;
///
/// let points = [point!(1.0, 2.0), point!(-3.5, 0.25)];
/// let bytes = encode_point_set(&points).unwrap();
/// assert_eq!(bytes.len(), 4 + 2 * 16);
/// assert_eq!(decode_point_set(&bytes).unwrap().points(), &points);
/// ```
pub fn encode_point_set(points: &[Point]) -> Result<Vec<u8>, CodecError> {
    let count = to_wire("point count", points.len())?;
    let mut out = Vec::with_capacity(COUNT_SIZE + points.len() * POINT_RECORD_SIZE);
    write_points(&mut out, count, points);
    Ok(out)
}

/// Encodes a mesh from its triangles and points.
///
/// The counts written are the slice lengths. Indices are written as given.
///
/// # Errors
///
/// Returns [`CodecError::EmptyTriangleSet`] when `triangles` is empty, whatever
/// the points, and [`CodecError::ValueOutOfRange`] if a count or an index does
/// not fit in a `u32`.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::triangle::Triangle;
/// use delaunay_mesh::io::binary::{encode_mesh, CodecError};
/// use delaunay_mesh::point;
///
/// let points = [point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)];
/// let bytes = encode_mesh(&[Triangle::new(0, 1, 2)], &points).unwrap();
/// assert_eq!(bytes.len(), 4 + 3 * 16 + 4 + 12);
///
/// assert_eq!(encode_mesh(&[], &points), Err(CodecError::EmptyTriangleSet));
/// ```
pub fn encode_mesh(triangles: &[Triangle], points: &[Point]) -> Result<Vec<u8>, CodecError> {
    if triangles.is_empty() {
        return Err(CodecError::EmptyTriangleSet);
    }

    let point_count = to_wire("point count", points.len())?;
    let triangle_count = to_wire("triangle count", triangles.len())?;

    let mut out = Vec::with_capacity(
        2 * COUNT_SIZE + points.len() * POINT_RECORD_SIZE + triangles.len() * TRIANGLE_RECORD_SIZE,
    );
    write_points(&mut out, point_count, points);
    put_u32(&mut out, triangle_count);
    for triangle in triangles {
        for index in triangle.vertices() {
            put_u32(&mut out, to_wire("triangle vertex index", index)?);
        }
    }
    Ok(out)
}

fn write_points(out: &mut Vec<u8>, count: u32, points: &[Point]) {
    put_u32(out, count);
    let mut record = [0_u8; POINT_RECORD_SIZE];
    for point in points {
        LittleEndian::write_f64_into(&point.coords(), &mut record);
        out.extend_from_slice(&record);
    }
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    let mut field = [0_u8; COUNT_SIZE];
    LittleEndian::write_u32(&mut field, value);
    out.extend_from_slice(&field);
}

fn to_wire(field: &'static str, value: usize) -> Result<u32, CodecError> {
    u32::try_from(value).map_err(|_| CodecError::ValueOutOfRange { field, value })
}

// =============================================================================
// CONVENIENCE WRAPPERS
// =============================================================================

impl PointSet {
    /// Decodes a point set; see [`decode_point_set`].
    ///
    /// # Errors
    ///
    /// See [`decode_point_set`].
    pub fn from_bytes(buffer: &[u8]) -> Result<Self, CodecError> {
        decode_point_set(buffer)
    }

    /// Encodes this point set; see [`encode_point_set`].
    ///
    /// # Errors
    ///
    /// See [`encode_point_set`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        encode_point_set(self.points())
    }
}

impl Mesh {
    /// Decodes a mesh; see [`decode_mesh`].
    ///
    /// # Errors
    ///
    /// See [`decode_mesh`].
    pub fn from_bytes(buffer: &[u8]) -> Result<Self, CodecError> {
        decode_mesh(buffer)
    }

    /// Encodes this mesh; see [`encode_mesh`].
    ///
    /// # Errors
    ///
    /// See [`encode_mesh`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        encode_mesh(self.triangles(), self.points().points())
    }
}

// =============================================================================
// TESTS
// =============================================================================
