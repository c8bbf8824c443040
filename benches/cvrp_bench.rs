//! Criterion benchmarks for the CVRP memetic solver.
//!
//! Uses seeded random instances so the numbers depend only on the
//! algorithm, not on input files.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_cvrp::distance::DistanceMatrix;
use u_cvrp::evaluation::{decode, Evaluator};
use u_cvrp::ga::{Chromosome, MemeticConfig, MemeticRunner};
use u_cvrp::local_search::{two_opt_solution, LocalSearch};
use u_cvrp::models::{Node, ProblemInstance};

/// `n` customers scattered in a 100 x 100 square around a central depot.
fn random_instance(n: usize, seed: u64) -> ProblemInstance {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut nodes = vec![Node::depot(1, 50.0, 50.0)];
    for id in 2..=n + 1 {
        nodes.push(Node::new(
            id,
            rng.random_range(0.0..100.0),
            rng.random_range(0.0..100.0),
            rng.random_range(1..=30),
        ));
    }
    ProblemInstance::new(1, 100, nodes).expect("demands fit capacity")
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for n in [30, 100, 300] {
        let instance = random_instance(n, 1);
        let genes = Chromosome::random(instance.customers(), &mut StdRng::seed_from_u64(2));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| decode(black_box(genes.genes()), &instance))
        });
    }
    group.finish();
}

fn bench_two_opt(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_opt_solution");
    for n in [30, 100] {
        let instance = random_instance(n, 3);
        let dm = DistanceMatrix::from_instance(&instance);
        let genes = Chromosome::random(instance.customers(), &mut StdRng::seed_from_u64(4));
        let solution = decode(genes.genes(), &instance).expect("permutation");
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| two_opt_solution(black_box(&solution), &dm))
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let instance = random_instance(50, 5);
    let dm = DistanceMatrix::from_instance(&instance);
    let evaluator = Evaluator::new(&instance, &dm, LocalSearch::default());
    let genes = Chromosome::random(instance.customers(), &mut StdRng::seed_from_u64(6));
    let mut rng = StdRng::seed_from_u64(7);

    c.bench_function("evaluate_50", |b| {
        b.iter(|| evaluator.evaluate(black_box(genes.genes()), &mut rng))
    });
}

fn bench_memetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("memetic_run");
    group.sample_size(10);
    for n in [20, 50] {
        let instance = random_instance(n, 8);
        let config = MemeticConfig::default()
            .with_pop_size(30)
            .with_generations(20)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| MemeticRunner::run(black_box(&instance), &config))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_two_opt,
    bench_evaluate,
    bench_memetic
);
criterion_main!(benches);
