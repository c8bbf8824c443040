//! Memetic genetic algorithm for the CVRP.
//!
//! - [`Chromosome`]: permutation of all customer ids
//! - [`Selection`], [`Crossover`], [`Mutation`]: configurable operators,
//!   behind the [`SelectionOperator`], [`CrossoverOperator`] and
//!   [`MutationOperator`] traits
//! - [`MemeticConfig`]: run parameters with builder and presets
//! - [`MemeticRunner`]: the evolutionary loop, producing a [`RunResult`]
//! - [`batch`]: independent seeded runs and summary statistics
//!
//! # Reference
//!
//! Moscato, P. (1989). "On Evolution, Search, Optimization, Genetic
//! Algorithms and Martial Arts: Towards Memetic Algorithms". Caltech
//! Concurrent Computation Program, Report 826.

pub mod batch;
mod chromosome;
mod config;
mod crossover;
mod mutation;
mod runner;
mod selection;
mod types;

pub use chromosome::Chromosome;
pub use config::MemeticConfig;
pub use crossover::Crossover;
pub use mutation::Mutation;
pub use runner::{MemeticRunner, RunResult, RunStats, FITNESS_EPS, PENALTY_COST};
pub use selection::Selection;
pub use types::{CrossoverOperator, MutationOperator, SelectionOperator};
