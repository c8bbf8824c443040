//! Parent selection strategies.
//!
//! All strategies **maximize** fitness: the loop assigns
//! `fitness = 1 / (cost + 1e-9)`, so shorter solutions weigh more. Each
//! strategy copes with all-equal, zero-total, and non-finite fitness
//! vectors without panicking.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization and
//!   Machine Learning*, ch. 4 (stochastic remainder selection)

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use super::types::SelectionOperator;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::ga::{Chromosome, Selection, SelectionOperator};
///
/// let population = vec![
///     Chromosome::new(vec![1, 2]),
///     Chromosome::new(vec![2, 1]),
/// ];
/// let fitnesses = [0.5, 2.0];
/// let mut rng = StdRng::seed_from_u64(0);
///
/// assert_eq!(Selection::Deterministic.select(&population, &fitnesses, &mut rng), 1);
/// let idx = Selection::default().select(&population, &fitnesses, &mut rng);
/// assert!(idx < population.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Sample `k` distinct individuals uniformly, keep the fittest.
    ///
    /// `k` is clamped to `[1, population size]`.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Falls back to uniform when the fitness total is not a positive
    /// finite number.
    ///
    /// # Complexity
    /// O(n) per selection
    Roulette,

    /// Linear ranking: the best individual weighs `n`, the worst `1`.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,

    /// Always the fittest individual (first on ties).
    Deterministic,

    /// Uniformly random individual, ignoring fitness.
    Uniform,

    /// Stochastic remainder selection.
    ///
    /// Individual `i` expects `e_i = n · f_i / Σf` copies. The integer parts
    /// `⌊e_i⌋` form a deterministic pool; one draw weighted by the
    /// fractional parts `e_i - ⌊e_i⌋` adds one more entry. The result is a
    /// uniform pick from that pool.
    ///
    /// # Complexity
    /// O(n) per selection
    StochasticRemainder,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl SelectionOperator for Selection {
    /// # Panics
    ///
    /// Panics if `population` is empty or `fitnesses` has a different length.
    fn select<R: Rng>(&self, population: &[Chromosome], fitnesses: &[f64], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );
        assert_eq!(
            population.len(),
            fitnesses.len(),
            "one fitness value per individual"
        );

        match self {
            Selection::Tournament(k) => tournament(fitnesses, *k, rng),
            Selection::Roulette => roulette(fitnesses, rng),
            Selection::Rank => rank(fitnesses, rng),
            Selection::Deterministic => fittest(fitnesses),
            Selection::Uniform => rng.random_range(0..fitnesses.len()),
            Selection::StochasticRemainder => stochastic_remainder(fitnesses, rng),
        }
    }
}

/// Non-negative selection weight; NaN, infinite, and negative values weigh 0.
fn weight(f: f64) -> f64 {
    if f.is_finite() && f > 0.0 {
        f
    } else {
        0.0
    }
}

/// Index of the largest fitness, first on ties. NaN never wins.
fn fittest(fitnesses: &[f64]) -> usize {
    let mut best = 0;
    for (i, &f) in fitnesses.iter().enumerate().skip(1) {
        if f > fitnesses[best] || fitnesses[best].is_nan() {
            best = i;
        }
    }
    best
}

/// Tournament without replacement.
fn tournament<R: Rng>(fitnesses: &[f64], k: usize, rng: &mut R) -> usize {
    let n = fitnesses.len();
    let k = k.clamp(1, n);

    let mut best: Option<usize> = None;
    for idx in index::sample(rng, n, k) {
        let better = match best {
            None => true,
            Some(b) => fitnesses[idx] > fitnesses[b] || fitnesses[b].is_nan(),
        };
        if better {
            best = Some(idx);
        }
    }
    best.unwrap_or(0)
}

/// Draws an index with probability proportional to `weights`.
///
/// Returns `None` when the total weight is not positive and finite.
fn weighted_pick<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return None;
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return Some(i);
        }
    }

    // floating-point fallback
    weights.iter().rposition(|&w| w > 0.0)
}

fn roulette<R: Rng>(fitnesses: &[f64], rng: &mut R) -> usize {
    let weights: Vec<f64> = fitnesses.iter().map(|&f| weight(f)).collect();
    weighted_pick(&weights, rng).unwrap_or_else(|| rng.random_range(0..fitnesses.len()))
}

fn rank<R: Rng>(fitnesses: &[f64], rng: &mut R) -> usize {
    let n = fitnesses.len();
    if n == 1 {
        return 0;
    }

    // Best first; NaN sorts last.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        let (fa, fb) = (fitnesses[a], fitnesses[b]);
        match (fa.is_nan(), fb.is_nan()) {
            (false, false) => fb.total_cmp(&fa),
            (a_nan, b_nan) => a_nan.cmp(&b_nan),
        }
    });

    let weights: Vec<f64> = (0..n).map(|r| (n - r) as f64).collect();
    let r = weighted_pick(&weights, rng).unwrap_or(0);
    order[r]
}

fn stochastic_remainder<R: Rng>(fitnesses: &[f64], rng: &mut R) -> usize {
    let n = fitnesses.len();
    let weights: Vec<f64> = fitnesses.iter().map(|&f| weight(f)).collect();
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return rng.random_range(0..n);
    }

    let mut copies = vec![0usize; n];
    let mut remainders = vec![0.0; n];
    for (i, &w) in weights.iter().enumerate() {
        let expected = n as f64 * w / total;
        let whole = expected.floor();
        copies[i] = whole as usize;
        remainders[i] = expected - whole;
    }

    if let Some(extra) = weighted_pick(&remainders, rng) {
        copies[extra] += 1;
    }

    let pool: usize = copies.iter().sum();
    if pool == 0 {
        return rng.random_range(0..n);
    }

    let mut pick = rng.random_range(0..pool);
    for (i, &c) in copies.iter().enumerate() {
        if pick < c {
            return i;
        }
        pick -= c;
    }
    n - 1
}
