//! Scaling benchmarks for the Bowyer-Watson triangulator.
//!
//! Measures `triangulate` on seeded uniform random inputs and on square grids,
//! which stress the co-circular tolerance band. Validation of the output is
//! benchmarked separately so its cost can be compared to construction.
//!
//! ```bash
//! cargo bench --bench triangulation_scaling
//! DELAUNAY_MESH_BENCH_SEED=0x1234 cargo bench --bench triangulation_scaling
//! ```

#![allow(missing_docs)] // Criterion macros generate undocumented functions

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use delaunay_mesh::prelude::*;
use std::hint::black_box;
use std::sync::OnceLock;

/// Get the deterministic seed for random point generation.
/// Reads `DELAUNAY_MESH_BENCH_SEED` (decimal or 0x-hex). Defaults to 0xD1EA.
/// Prints the resolved seed once if `PRINT_BENCH_SEED` is set.
fn get_benchmark_seed() -> u64 {
    static SEED: OnceLock<u64> = OnceLock::new();
    *SEED.get_or_init(|| {
        let seed = std::env::var("DELAUNAY_MESH_BENCH_SEED")
            .ok()
            .and_then(|s| {
                let s = s.trim();
                s.strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .map_or_else(|| s.parse().ok(), |hex| u64::from_str_radix(hex, 16).ok())
            })
            .unwrap_or(0xD1EA);
        if std::env::var("PRINT_BENCH_SEED").is_ok() {
            eprintln!("Benchmark seed: 0x{seed:X} ({seed})");
        }
        seed
    })
}

fn random_input(n_points: usize) -> Vec<Point> {
    generate_random_points_seeded(n_points, (-100.0, 100.0), get_benchmark_seed())
        .expect("benchmark range is valid")
}

fn benchmark_random_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate_random");

    for &n_points in &[10_usize, 50, 100, 250, 500] {
        group.throughput(Throughput::Elements(n_points as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_points),
            &n_points,
            |b, &n_points| {
                b.iter_batched(
                    || random_input(n_points),
                    |points| black_box(triangulate(&points).expect("random input triangulates")),
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn benchmark_grid_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate_grid");

    for &side in &[4_usize, 8, 16] {
        let points = generate_grid_points(side, 1.0, point!(0.0, 0.0)).expect("grid is non-empty");
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_with_input(BenchmarkId::new("side", side), &points, |b, points| {
            b.iter(|| black_box(triangulate(points).expect("grid triangulates")));
        });
    }

    group.finish();
}

fn benchmark_statistics_overhead(c: &mut Criterion) {
    let points = random_input(250);
    let mut group = c.benchmark_group("triangulate_with_options");

    group.bench_function("default", |b| {
        b.iter(|| {
            let mut triangulator = BowyerWatson::default();
            let triangles = triangulator.triangulate(&points).expect("triangulates");
            black_box((triangles, *triangulator.statistics()))
        });
    });

    group.bench_function("cancellation_and_timeout", |b| {
        b.iter(|| {
            let options = TriangulationOptionsBuilder::default()
                .cancellation(CancellationToken::new())
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("options are complete");
            black_box(BowyerWatson::new(options).triangulate(&points).expect("triangulates"))
        });
    });

    group.finish();
}

fn benchmark_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_delaunay");

    for &n_points in &[50_usize, 100, 250] {
        let points = random_input(n_points);
        let triangles = triangulate(&points).expect("random input triangulates");
        group.bench_with_input(
            BenchmarkId::from_parameter(n_points),
            &(points, triangles),
            |b, (points, triangles)| {
                b.iter(|| black_box(find_delaunay_violations(points, triangles)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_random_points,
    benchmark_grid_points,
    benchmark_statistics_overhead,
    benchmark_validation
);
criterion_main!(benches);
