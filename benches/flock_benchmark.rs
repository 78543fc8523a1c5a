/*
 * Flock Benchmark
 *
 * Measures the per-frame pieces of the simulation: rebuilding and querying
 * the quadtree, and a full simulation step, for several population sizes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use moodflock::{QuadTree, Region, Simulation, SimulationParams};
use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const WORLD: Region = Region::new(0.0, 0.0, 1600.0, 1000.0);

fn params(num_boids: usize) -> SimulationParams {
    SimulationParams {
        num_boids,
        num_food: num_boids / 2,
        rng_seed: Some(0xB01D),
        ..SimulationParams::default()
    }
}

// Rebuild the tree from scratch and run one query per point, as a frame does
fn bench_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");

    for num_points in [200, 1000, 5000].iter() {
        let mut rng = StdRng::seed_from_u64(1);
        let points: Vec<Vec2> = (0..*num_points).map(|_| WORLD.random_point(&mut rng)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(num_points), &points, |b, points| {
            let mut tree = QuadTree::new();
            let mut found = Vec::new();
            b.iter(|| {
                tree.reset();
                tree.init_region(WORLD);
                for p in points {
                    tree.insert(*p);
                }
                for p in points {
                    found.clear();
                    tree.query(&Region::around(*p, 40.0), &mut found);
                    black_box(found.len());
                }
                tree.dispose();
            });
        });
    }

    group.finish();
}

// Full frame: update, index, eat, flock, dispose
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");

    for num_boids in [200, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let mut sim = Simulation::new(params(n), WORLD.w, WORLD.h).expect("valid setup");
            b.iter(|| {
                sim.step();
                black_box(sim.stats());
            });
        });
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
    targets = bench_quadtree, bench_step
}

criterion_main!(benches);
