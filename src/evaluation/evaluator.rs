//! Chromosome evaluator: decode, improve, then cost.

use rand::Rng;

use super::{decode, solution_cost};
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::local_search::LocalSearch;
use crate::models::{ProblemInstance, Solution};

/// An evaluated chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The decoded and locally improved solution.
    pub solution: Solution,
    /// Its total travel distance.
    pub cost: f64,
}

/// Turns chromosomes into costed solutions for one problem instance.
///
/// Holds borrowed problem data, so it is cheap to build per run.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::models::{Node, ProblemInstance};
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::evaluation::Evaluator;
/// use u_cvrp::local_search::LocalSearch;
///
/// let instance = ProblemInstance::new(
///     0,
///     10,
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::new(1, 3.0, 4.0, 5),
///         Node::new(2, 6.0, 8.0, 5),
///     ],
/// )
/// .unwrap();
/// let dm = DistanceMatrix::from_instance(&instance);
/// let evaluator = Evaluator::new(&instance, &dm, LocalSearch::disabled());
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let eval = evaluator.evaluate(&[1, 2], &mut rng).unwrap();
/// assert!((eval.cost - 20.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    instance: &'a ProblemInstance,
    distances: &'a DistanceMatrix,
    local_search: LocalSearch,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator for the given problem data and policy.
    pub fn new(
        instance: &'a ProblemInstance,
        distances: &'a DistanceMatrix,
        local_search: LocalSearch,
    ) -> Self {
        Self {
            instance,
            distances,
            local_search,
        }
    }

    /// The problem instance.
    pub fn instance(&self) -> &'a ProblemInstance {
        self.instance
    }

    /// The distance matrix.
    pub fn distances(&self) -> &'a DistanceMatrix {
        self.distances
    }

    /// Decodes `genes`, applies the local search policy, and costs the result.
    ///
    /// # Errors
    ///
    /// Propagates [`decode`] and cost lookup failures.
    pub fn evaluate<R: Rng>(&self, genes: &[usize], rng: &mut R) -> Result<Evaluation> {
        let decoded = decode(genes, self.instance)?;
        let solution = self
            .local_search
            .improve(&decoded, self.instance, self.distances, rng)?;
        let cost = solution_cost(&solution, self.distances)?;
        Ok(Evaluation { solution, cost })
    }

    /// Decodes and costs `genes` without local search.
    ///
    /// # Errors
    ///
    /// Propagates [`decode`] and cost lookup failures.
    pub fn evaluate_plain(&self, genes: &[usize]) -> Result<Evaluation> {
        let solution = decode(genes, self.instance)?;
        let cost = solution_cost(&solution, self.distances)?;
        Ok(Evaluation { solution, cost })
    }
}
