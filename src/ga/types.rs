//! Operator contracts for the memetic loop.
//!
//! The loop is generic over these three traits. The closed enums
//! [`Selection`](super::Selection), [`Crossover`](super::Crossover) and
//! [`Mutation`](super::Mutation) implement them and are what
//! [`MemeticConfig`](super::MemeticConfig) stores; custom operators can be
//! plugged in through [`MemeticRunner::run_with_operators`](super::MemeticRunner::run_with_operators).

use rand::Rng;

use super::chromosome::Chromosome;

/// Chooses a parent from the current population.
///
/// `fitnesses[i]` belongs to `population[i]`; higher is better.
pub trait SelectionOperator {
    /// Returns an index into `population`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `population` is empty.
    fn select<R: Rng>(&self, population: &[Chromosome], fitnesses: &[f64], rng: &mut R) -> usize;
}

/// Recombines two parents into one child.
///
/// For permutation parents the child must be a permutation of the same
/// genes. Parents are never modified.
pub trait CrossoverOperator {
    /// Builds a child from `a` and `b`.
    fn cross<R: Rng>(&self, a: &Chromosome, b: &Chromosome, rng: &mut R) -> Chromosome;
}

/// Perturbs a chromosome.
///
/// The result must be a permutation of the input's genes.
pub trait MutationOperator {
    /// Returns a mutated copy of `c`.
    fn mutate<R: Rng>(&self, c: &Chromosome, rng: &mut R) -> Chromosome;
}
