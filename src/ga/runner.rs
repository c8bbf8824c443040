//! Memetic evolutionary loop.
//!
//! [`MemeticRunner`] orchestrates the complete process:
//! initialization → decode + local search + cost → elitism → selection →
//! crossover → mutation → repair → repeat, for a fixed number of
//! generations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::chromosome::Chromosome;
use super::config::MemeticConfig;
use super::types::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::evaluation::{decode, gap_percent, Evaluator};
use crate::models::{ProblemInstance, Solution};

/// Cost assigned to a chromosome whose evaluation failed.
///
/// Finite, so fitness stays well defined; large enough never to be chosen
/// as an elite over a real solution.
pub const PENALTY_COST: f64 = 1e12;

/// Added to the cost before inverting it into a fitness.
pub const FITNESS_EPS: f64 = 1e-9;

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Chromosomes evaluated (decode + local search + cost).
    pub evaluations: usize,
    /// Evaluations that failed and were charged [`PENALTY_COST`].
    pub evaluation_failures: usize,
    /// Offspring replaced by a fresh random permutation.
    pub repairs: usize,
}

/// Result of a memetic run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Chromosome that produced the best cost.
    pub best_chromosome: Chromosome,

    /// Lowest cost seen during the run (after local search).
    ///
    /// `f64::INFINITY` if the run was cancelled before the first generation.
    pub best_cost: f64,

    /// The locally improved solution whose cost is `best_cost`.
    ///
    /// `None` if no evaluation ever succeeded.
    pub best_solution: Option<Solution>,

    /// Minimum cost of each evaluated generation.
    pub history: Vec<f64>,

    /// Best cost so far after each evaluated generation (non-increasing).
    pub best_history: Vec<f64>,

    /// Wall-clock time of the run.
    pub elapsed: Duration,

    /// Number of generations evaluated.
    pub generations: usize,

    /// Whether the run was stopped through the cancellation flag.
    pub cancelled: bool,

    /// Seed the run's RNG was created from.
    pub seed: u64,

    /// Diagnostic counters.
    pub stats: RunStats,
}

impl RunResult {
    /// Decodes the best chromosome without local search.
    ///
    /// The result may cost more than [`best_cost`](Self::best_cost), which
    /// includes the local search improvements; see
    /// [`best_solution`](Self::best_solution) for the improved routes.
    ///
    /// # Errors
    ///
    /// Returns [`CvrpError::InvalidChromosome`](crate::CvrpError::InvalidChromosome)
    /// if `instance` is not the one the run was made on.
    pub fn decode_best(&self, instance: &ProblemInstance) -> Result<Solution> {
        decode(self.best_chromosome.genes(), instance)
    }

    /// Percentage gap of `best_cost` above `reference`.
    ///
    /// Returns `None` when `reference` is not positive.
    pub fn gap_to(&self, reference: f64) -> Option<f64> {
        gap_percent(self.best_cost, reference)
    }
}

/// Executes the memetic loop.
///
/// # Usage
///
/// ```
/// use u_cvrp::models::{Node, ProblemInstance};
/// use u_cvrp::ga::{MemeticConfig, MemeticRunner};
///
/// let instance = ProblemInstance::new(
///     1,
///     6,
///     vec![
///         Node::depot(1, 0.0, 0.0),
///         Node::new(2, 1.0, 0.0, 3),
///         Node::new(3, 2.0, 0.0, 3),
///         Node::new(4, 3.0, 0.0, 3),
///         Node::new(5, 4.0, 0.0, 3),
///     ],
/// )
/// .unwrap();
///
/// let config = MemeticConfig::default()
///     .with_pop_size(10)
///     .with_generations(20)
///     .with_seed(42);
/// let result = MemeticRunner::run(&instance, &config).unwrap();
/// assert!((result.best_cost - 12.0).abs() < 1e-9);
/// assert_eq!(result.history.len(), 20);
/// ```
pub struct MemeticRunner;

impl MemeticRunner {
    /// Runs the memetic algorithm with the operators named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CvrpError::InvalidConfig`](crate::CvrpError::InvalidConfig)
    /// if [`MemeticConfig::validate`] fails.
    pub fn run(instance: &ProblemInstance, config: &MemeticConfig) -> Result<RunResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation and returns the best solution found so
    /// far with `cancelled` set.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_with_cancel(
        instance: &ProblemInstance,
        config: &MemeticConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult> {
        Self::run_with_operators(
            instance,
            config,
            &config.selection,
            &config.crossover,
            &config.mutation,
            cancel,
        )
    }

    /// Runs with caller-supplied operators.
    ///
    /// The `selection`, `crossover` and `mutation` fields of `config` are
    /// ignored; every other field applies.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_with_operators<S, C, M>(
        instance: &ProblemInstance,
        config: &MemeticConfig,
        selection: &S,
        crossover: &C,
        mutation: &M,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult>
    where
        S: SelectionOperator,
        C: CrossoverOperator,
        M: MutationOperator,
    {
        config.validate()?;

        let start = Instant::now();
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let distances = DistanceMatrix::from_instance(instance);
        let evaluator = Evaluator::new(instance, &distances, config.local_search);
        let customers = instance.customers();
        let elite_count = config.elite_count();

        info!(
            "Starting memetic run: {} customers, pop_size={}, generations={}, seed={}",
            customers.len(),
            config.pop_size,
            config.generations,
            seed
        );

        // 1. Initialize population
        let mut population: Vec<Chromosome> = (0..config.pop_size)
            .map(|_| Chromosome::random(customers, &mut rng))
            .collect();

        let mut best_chromosome = population[0].clone();
        let mut best_cost = f64::INFINITY;
        let mut best_solution: Option<Solution> = None;
        let mut history = Vec::with_capacity(config.generations);
        let mut best_history = Vec::with_capacity(config.generations);
        let mut stats = RunStats::default();
        let mut cancelled = false;

        // 2. Evolutionary loop
        for gen in 0..config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Evaluation
            let mut costs = Vec::with_capacity(population.len());
            let mut fitnesses = Vec::with_capacity(population.len());
            for chrom in &population {
                let (cost, solution) = score(&evaluator, chrom, &mut rng, &mut stats);

                if cost < best_cost {
                    best_cost = cost;
                    best_chromosome = chrom.clone();
                    best_solution = solution;
                }
                costs.push(cost);
                fitnesses.push(1.0 / (cost + FITNESS_EPS));
            }

            let gen_min = costs.iter().copied().fold(f64::INFINITY, f64::min);
            history.push(gen_min);
            best_history.push(best_cost);
            debug!(
                "Generation {}: min cost {:.3}, best cost {:.3}",
                gen + 1,
                gen_min,
                best_cost
            );

            if gen + 1 == config.generations {
                break;
            }

            // Elitism: stable sort keeps earlier individuals first on ties
            let mut order: Vec<usize> = (0..population.len()).collect();
            order.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));
            let mut next_gen: Vec<Chromosome> = order[..elite_count]
                .iter()
                .map(|&i| population[i].clone())
                .collect();

            // Reproduction
            while next_gen.len() < config.pop_size {
                let p1 = selection.select(&population, &fitnesses, &mut rng);
                let p2 = selection.select(&population, &fitnesses, &mut rng);

                let mut child = if rng.random_range(0.0..1.0) < config.px {
                    crossover.cross(&population[p1], &population[p2], &mut rng)
                } else {
                    population[p1].clone()
                };

                if rng.random_range(0.0..1.0) < config.pm {
                    child = mutation.mutate(&child, &mut rng);
                }

                if !child.is_valid_for(instance) {
                    stats.repairs += 1;
                    warn!(
                        "Offspring is not a permutation of the customers, replacing it (generation {})",
                        gen + 1
                    );
                    child = Chromosome::random(customers, &mut rng);
                }

                next_gen.push(child);
            }

            population = next_gen;
        }

        let elapsed = start.elapsed();
        let generations = history.len();
        info!(
            "Memetic run finished: best cost {:.3} after {} generations in {:.2?} ({} repairs{})",
            best_cost,
            generations,
            elapsed,
            stats.repairs,
            if cancelled { ", cancelled" } else { "" }
        );

        Ok(RunResult {
            best_chromosome,
            best_cost,
            best_solution,
            history,
            best_history,
            elapsed,
            generations,
            cancelled,
            seed,
            stats,
        })
    }
}

/// Evaluates one chromosome, charging [`PENALTY_COST`] on failure.
///
/// Offspring are repaired before they get here, so failures only occur
/// when the chromosome and the evaluator disagree on the instance.
fn score<R: Rng>(
    evaluator: &Evaluator<'_>,
    chrom: &Chromosome,
    rng: &mut R,
    stats: &mut RunStats,
) -> (f64, Option<Solution>) {
    stats.evaluations += 1;
    match evaluator.evaluate(chrom.genes(), rng) {
        Ok(eval) => (eval.cost, Some(eval.solution)),
        Err(e) => {
            stats.evaluation_failures += 1;
            warn!("Evaluation failed, charging penalty cost: {e}");
            (PENALTY_COST, None)
        }
    }
}
