/*
 * Boid Simulation Benchmark
 *
 * Benchmarks for the aquarium's per-frame hot path: the combined neighbor
 * query, the full steering pipeline, and the complete two-pass step, each
 * at several population sizes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use shoal::boid::Boid;
use shoal::registry::{BoidId, BoidRegistry, BoundaryVolume};

const POPULATIONS: [usize; 4] = [50, 100, 200, 400];

fn populated_registry(count: usize) -> (BoidRegistry, Vec<BoidId>) {
    let boundary = BoundaryVolume::new(Vec3::ZERO, vec3(240.0, 120.0, 240.0)).unwrap();
    let mut registry = BoidRegistry::new(boundary);
    let mut rng = StdRng::seed_from_u64(1234);
    let ids = (0..count)
        .map(|_| {
            let position = registry.boundary().random_point(&mut rng);
            let class = rng.gen_range(1..=3);
            registry.spawn(Boid::new(position, class, &mut rng))
        })
        .collect();
    registry.bind_player(Vec3::ZERO, 2.0);
    (registry, ids)
}

// Benchmark the combined three-radius neighbor query across the population
fn bench_neighbor_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_queries");

    for population in POPULATIONS.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            population,
            |b, &n| {
                let (registry, ids) = populated_registry(n);
                b.iter(|| {
                    for &id in &ids {
                        let hood = registry.neighbors(id, 24.0, 40.0, 8.0);
                        black_box(
                            hood.alignment.len() + hood.cohesion.len() + hood.separation.len(),
                        );
                    }
                });
            },
        );
    }

    group.finish();
}

// Benchmark the full steering pipeline (perceive + evaluate + combine)
fn bench_force_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_pipeline");

    for population in POPULATIONS.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            population,
            |b, &n| {
                let (registry, _) = populated_registry(n);
                b.iter(|| {
                    for (id, boid) in registry.iter() {
                        black_box(boid.plan(id, &registry));
                    }
                });
            },
        );
    }

    group.finish();
}

// Benchmark the complete two-pass frame step
fn bench_full_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_step");

    for population in POPULATIONS.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            population,
            |b, &n| {
                let (mut registry, _) = populated_registry(n);
                b.iter(|| {
                    registry.step(black_box(1.0 / 60.0));
                });
            },
        );
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_neighbor_queries, bench_force_pipeline, bench_full_step
}

criterion_main!(benches);
