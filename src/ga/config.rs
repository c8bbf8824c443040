//! Memetic algorithm configuration.
//!
//! [`MemeticConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use super::crossover::Crossover;
use super::mutation::Mutation;
use super::selection::Selection;
use crate::error::{CvrpError, Result};
use crate::local_search::LocalSearch;

/// Configuration for the memetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_cvrp::ga::MemeticConfig;
///
/// let config = MemeticConfig::default();
/// assert_eq!(config.pop_size, 80);
/// assert_eq!(config.generations, 300);
/// assert_eq!(config.px, 0.9);
/// assert_eq!(config.pm, 0.25);
/// assert_eq!(config.elite_count(), 4);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_cvrp::ga::{Crossover, MemeticConfig, Mutation, Selection};
///
/// let config = MemeticConfig::default()
///     .with_pop_size(120)
///     .with_selection(Selection::Rank)
///     .with_crossover(Crossover::PartiallyMapped)
///     .with_mutation(Mutation::Inversion)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemeticConfig {
    /// Number of individuals in the population (at least 2).
    pub pop_size: usize,

    /// Number of generations to run. There is no early stop.
    pub generations: usize,

    /// Probability of applying crossover to a pair of parents.
    ///
    /// When crossover is not applied, a clone of the first parent is used.
    pub px: f64,

    /// Probability of mutating an offspring.
    pub pm: f64,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Mutation operator.
    pub mutation: Mutation,

    /// Fraction of the population carried over unchanged, in `[0, 1)`.
    ///
    /// At least one elite is always kept, see [`elite_count`](Self::elite_count).
    pub elite_ratio: f64,

    /// Local search applied to every decoded chromosome.
    pub local_search: LocalSearch,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for MemeticConfig {
    fn default() -> Self {
        Self {
            pop_size: 80,
            generations: 300,
            px: 0.9,
            pm: 0.25,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            elite_ratio: 0.05,
            local_search: LocalSearch::default(),
            seed: None,
        }
    }
}

impl MemeticConfig {
    /// Sets the population size.
    pub fn with_pop_size(mut self, n: usize) -> Self {
        self.pop_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover probability.
    pub fn with_px(mut self, p: f64) -> Self {
        self.px = p;
        self
    }

    /// Sets the mutation probability.
    pub fn with_pm(mut self, p: f64) -> Self {
        self.pm = p;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, op: Crossover) -> Self {
        self.crossover = op;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, op: Mutation) -> Self {
        self.mutation = op;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio;
        self
    }

    /// Sets the local search policy.
    pub fn with_local_search(mut self, ls: LocalSearch) -> Self {
        self.local_search = ls;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Preset for quick runs: small population, few generations.
    ///
    /// - Population: 30, Generations: 50
    pub fn fast() -> Self {
        Self {
            pop_size: 30,
            generations: 50,
            ..Self::default()
        }
    }

    /// Preset for quality runs: large population, many generations.
    ///
    /// - Population: 150, Generations: 1000
    pub fn thorough() -> Self {
        Self {
            pop_size: 150,
            generations: 1000,
            ..Self::default()
        }
    }

    /// Number of elites kept each generation: `max(1, ⌊pop_size · elite_ratio⌋)`,
    /// capped at `pop_size`.
    pub fn elite_count(&self) -> usize {
        let n = (self.pop_size as f64 * self.elite_ratio).floor();
        let n = if n.is_finite() && n > 0.0 { n as usize } else { 0 };
        n.max(1).min(self.pop_size.max(1))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CvrpError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.pop_size < 2 {
            return Err(CvrpError::InvalidConfig(format!(
                "pop_size must be >= 2, got {}",
                self.pop_size
            )));
        }
        if self.generations == 0 {
            return Err(CvrpError::InvalidConfig(
                "generations must be >= 1".to_string(),
            ));
        }
        for (name, p) in [("px", self.px), ("pm", self.pm)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CvrpError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {p}"
                )));
            }
        }
        if !(0.0..1.0).contains(&self.elite_ratio) {
            return Err(CvrpError::InvalidConfig(format!(
                "elite_ratio must be in [0, 1), got {}",
                self.elite_ratio
            )));
        }
        if let Selection::Tournament(0) = self.selection {
            return Err(CvrpError::InvalidConfig(
                "tournament size must be >= 1".to_string(),
            ));
        }
        self.local_search.validate()
    }
}
