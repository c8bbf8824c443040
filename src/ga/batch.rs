//! Independent seeded runs and their summary statistics.
//!
//! Each run owns its population, distance matrix, and RNG; nothing is shared
//! mutably between runs. With the `parallel` feature the runs execute on the
//! rayon thread pool, otherwise sequentially. Results are returned in seed
//! order and are identical either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::config::MemeticConfig;
use super::runner::{MemeticRunner, RunResult};
use crate::error::Result;
use crate::evaluation::gap_percent;
use crate::models::ProblemInstance;

/// Runs the memetic algorithm once per seed.
///
/// The `seed` field of `config` is overridden by each entry of `seeds`.
///
/// # Errors
///
/// Returns [`CvrpError::InvalidConfig`](crate::CvrpError::InvalidConfig) if
/// the configuration is invalid; no run is started in that case.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, ProblemInstance};
/// use u_cvrp::ga::{batch, MemeticConfig};
///
/// let instance = ProblemInstance::new(
///     0,
///     10,
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::new(1, 1.0, 1.0, 4),
///         Node::new(2, -1.0, 1.0, 4),
///         Node::new(3, 0.0, -2.0, 4),
///     ],
/// )
/// .unwrap();
/// let config = MemeticConfig::fast().with_pop_size(10).with_generations(5);
///
/// let results = batch::run_seeds(&instance, &config, &[1, 2, 3]).unwrap();
/// assert_eq!(results.len(), 3);
/// assert_eq!(results[1].seed, 2);
/// ```
pub fn run_seeds(
    instance: &ProblemInstance,
    config: &MemeticConfig,
    seeds: &[u64],
) -> Result<Vec<RunResult>> {
    config.validate()?;

    let run_one = |&seed: &u64| MemeticRunner::run(instance, &config.clone().with_seed(seed));

    #[cfg(feature = "parallel")]
    let results = seeds.par_iter().map(run_one).collect();
    #[cfg(not(feature = "parallel"))]
    let results = seeds.iter().map(run_one).collect();

    results
}

/// Aggregate statistics over several runs on the same instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of runs summarized.
    pub runs: usize,
    /// Lowest best cost across runs.
    pub best_cost: f64,
    /// Highest best cost across runs.
    pub worst_cost: f64,
    /// Mean of the best costs.
    pub mean_cost: f64,
    /// Population standard deviation of the best costs.
    pub std_cost: f64,
    /// Mean wall-clock time per run.
    pub mean_elapsed: Duration,
    /// Gap of `best_cost` above the known optimum, in percent.
    pub gap_percent: Option<f64>,
}

/// Summarizes a set of runs.
///
/// Returns `None` for an empty slice. Pass
/// [`ProblemInstance::known_optimum`] as `known_optimum` to get a gap.
pub fn summarize(results: &[RunResult], known_optimum: Option<f64>) -> Option<BatchSummary> {
    if results.is_empty() {
        return None;
    }

    let n = results.len() as f64;
    let costs: Vec<f64> = results.iter().map(|r| r.best_cost).collect();
    let best_cost = costs.iter().copied().fold(f64::INFINITY, f64::min);
    let worst_cost = costs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean_cost = costs.iter().sum::<f64>() / n;
    let variance = costs.iter().map(|c| (c - mean_cost).powi(2)).sum::<f64>() / n;
    let total: Duration = results.iter().map(|r| r.elapsed).sum();

    Some(BatchSummary {
        runs: results.len(),
        best_cost,
        worst_cost,
        mean_cost,
        std_cost: variance.sqrt(),
        mean_elapsed: total / results.len() as u32,
        gap_percent: known_optimum.and_then(|opt| gap_percent(best_cost, opt)),
    })
}
