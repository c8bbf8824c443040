//! Local search policy applied to every decoded solution.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{exchange, relocate, two_opt_solution};
use crate::distance::DistanceMatrix;
use crate::error::{CvrpError, Result};
use crate::models::{ProblemInstance, Solution};

/// Which improvement moves run, and how often.
///
/// [`improve`](Self::improve) runs, in order: a relocate trial with
/// probability `relocate_prob`, an exchange trial with probability
/// `exchange_prob`, then 2-opt to a fixpoint on every route if `two_opt`
/// is set. Both Bernoulli draws are taken on every call, so the random
/// stream does not depend on the outcome of the first draw.
///
/// # Examples
///
/// ```
/// use u_cvrp::local_search::LocalSearch;
///
/// let ls = LocalSearch::default();
/// assert_eq!(ls.relocate_prob, 0.7);
/// assert_eq!(ls.exchange_prob, 0.4);
/// assert!(ls.two_opt);
///
/// let off = LocalSearch::disabled();
/// assert!(!off.two_opt);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalSearch {
    /// Probability of attempting one inter-route relocation.
    pub relocate_prob: f64,
    /// Probability of attempting one inter-route exchange.
    pub exchange_prob: f64,
    /// Whether to run intra-route 2-opt on every route.
    pub two_opt: bool,
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self {
            relocate_prob: 0.7,
            exchange_prob: 0.4,
            two_opt: true,
        }
    }
}

impl LocalSearch {
    /// No moves at all: solutions pass through unchanged.
    pub fn disabled() -> Self {
        Self {
            relocate_prob: 0.0,
            exchange_prob: 0.0,
            two_opt: false,
        }
    }

    /// 2-opt only, no inter-route perturbation.
    pub fn two_opt_only() -> Self {
        Self {
            relocate_prob: 0.0,
            exchange_prob: 0.0,
            two_opt: true,
        }
    }

    /// Sets the relocation probability.
    pub fn with_relocate_prob(mut self, p: f64) -> Self {
        self.relocate_prob = p;
        self
    }

    /// Sets the exchange probability.
    pub fn with_exchange_prob(mut self, p: f64) -> Self {
        self.exchange_prob = p;
        self
    }

    /// Enables or disables 2-opt.
    pub fn with_two_opt(mut self, enabled: bool) -> Self {
        self.two_opt = enabled;
        self
    }

    /// Checks that both probabilities lie in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`CvrpError::InvalidConfig`] naming the bad field.
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("relocate_prob", self.relocate_prob),
            ("exchange_prob", self.exchange_prob),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CvrpError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }

    /// Applies the policy to a solution and returns the improved copy.
    ///
    /// Relocation and exchange keep every route within capacity; 2-opt never
    /// moves customers between routes. A feasible input therefore stays
    /// feasible.
    ///
    /// # Errors
    ///
    /// Returns [`CvrpError::UnknownNode`] if 2-opt meets a node the matrix
    /// does not know.
    pub fn improve<R: Rng>(
        &self,
        solution: &Solution,
        instance: &ProblemInstance,
        distances: &DistanceMatrix,
        rng: &mut R,
    ) -> Result<Solution> {
        let do_relocate = rng.random_bool(bernoulli_p(self.relocate_prob));
        let mut current = if do_relocate {
            relocate(solution, instance, rng)
        } else {
            solution.clone()
        };

        let do_exchange = rng.random_bool(bernoulli_p(self.exchange_prob));
        if do_exchange {
            current = exchange(&current, instance, rng);
        }

        if self.two_opt {
            current = two_opt_solution(&current, distances)?;
        }
        Ok(current)
    }
}

/// Clamps a probability into `[0, 1]`, mapping NaN to 0.
pub(crate) fn bernoulli_p(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
