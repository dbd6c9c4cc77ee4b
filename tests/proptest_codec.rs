//! Property-based tests for the binary codec.
//!
//! - decode(encode(points)) reproduces every coordinate bit-for-bit, NaN
//!   payloads and signed zeros included
//! - every strict prefix of a valid buffer is rejected as truncated
//! - trailing bytes never change the decoded value
//! - mesh encoding has the documented length and round-trips

use delaunay_mesh::io::binary::{COUNT_SIZE, POINT_RECORD_SIZE, TRIANGLE_RECORD_SIZE};
use delaunay_mesh::prelude::*;
use proptest::prelude::*;

fn any_point() -> impl Strategy<Value = Point> {
    (any::<f64>(), any::<f64>()).prop_map(Point::from)
}

fn any_triangle() -> impl Strategy<Value = Triangle> {
    (0_usize..1000, 0_usize..1000, 0_usize..1000).prop_map(Triangle::from)
}

fn same_bits(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(p, q)| {
            p.x().to_bits() == q.x().to_bits() && p.y().to_bits() == q.y().to_bits()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_point_set_round_trip_is_bit_exact(points in prop::collection::vec(any_point(), 0..64)) {
        let bytes = encode_point_set(&points).unwrap();
        prop_assert_eq!(bytes.len(), COUNT_SIZE + points.len() * POINT_RECORD_SIZE);
        let decoded = decode_point_set(&bytes).unwrap();
        prop_assert!(same_bits(&points, decoded.points()));
    }

    #[test]
    fn prop_every_prefix_is_truncated(
        points in prop::collection::vec(any_point(), 0..16),
        cut in any::<prop::sample::Index>(),
    ) {
        let bytes = encode_point_set(&points).unwrap();
        let len = cut.index(bytes.len());
        let is_truncated = matches!(
            decode_point_set(&bytes[..len]),
            Err(CodecError::InsufficientBytes { actual, .. }) if actual == len
        );
        prop_assert!(is_truncated);
    }

    #[test]
    fn prop_trailing_bytes_are_ignored(
        points in prop::collection::vec(any_point(), 0..16),
        garbage in prop::collection::vec(any::<u8>(), 1..32),
    ) {
        let mut bytes = encode_point_set(&points).unwrap();
        bytes.extend(&garbage);
        let decoded = decode_point_set(&bytes).unwrap();
        prop_assert!(same_bits(&points, decoded.points()));
    }

    #[test]
    fn prop_mesh_layout_and_round_trip(
        points in prop::collection::vec(any_point(), 0..32),
        triangles in prop::collection::vec(any_triangle(), 1..32),
    ) {
        let bytes = encode_mesh(&triangles, &points).unwrap();
        prop_assert_eq!(
            bytes.len(),
            2 * COUNT_SIZE + points.len() * POINT_RECORD_SIZE + triangles.len() * TRIANGLE_RECORD_SIZE
        );

        let mesh = decode_mesh(&bytes).unwrap();
        prop_assert!(same_bits(&points, mesh.points().points()));
        prop_assert_eq!(mesh.triangles(), triangles.as_slice());
    }

    #[test]
    fn prop_mesh_prefix_is_truncated(
        points in prop::collection::vec(any_point(), 0..8),
        triangles in prop::collection::vec(any_triangle(), 1..8),
        cut in any::<prop::sample::Index>(),
    ) {
        let bytes = encode_mesh(&triangles, &points).unwrap();
        let len = cut.index(bytes.len());
        let is_truncated = matches!(
            decode_mesh(&bytes[..len]),
            Err(CodecError::InsufficientBytes { .. })
        );
        prop_assert!(is_truncated);
    }

    #[test]
    fn prop_pipeline_matches_manual_composition(
        coords in prop::collection::btree_set((-50_i32..50, -50_i32..50), 3..25),
    ) {
        let points: Vec<Point> = coords
            .iter()
            .map(|&(x, y)| point!(f64::from(x), f64::from(y)))
            .collect();
        let request = encode_point_set(&points).unwrap();

        match triangulate(&points) {
            Ok(triangles) => {
                let expected = encode_mesh(&triangles, &points).unwrap();
                prop_assert_eq!(triangulate_bytes(&request).unwrap(), expected);
            }
            Err(err) => {
                prop_assert_eq!(
                    triangulate_bytes(&request),
                    Err(delaunay_mesh::Error::Triangulation(err))
                );
            }
        }
    }
}
