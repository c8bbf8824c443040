//! Permutation mutation operators.
//!
//! - [`Mutation::Swap`]: exchange two distinct random positions, O(1)
//! - [`Mutation::Inversion`]: reverse a random segment (a 2-opt move on the
//!   chromosome), O(n)
//!
//! Both return a fresh chromosome; fewer than two genes yields a clone.

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use super::types::MutationOperator;

/// Mutation strategy.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::ga::{Chromosome, Mutation, MutationOperator};
///
/// let c = Chromosome::new(vec![1, 2, 3, 4]);
/// let mut rng = StdRng::seed_from_u64(0);
/// let m = Mutation::Swap.mutate(&c, &mut rng);
/// assert_ne!(m, c);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    /// Swap two distinct positions.
    #[default]
    Swap,
    /// Reverse `[i..=j]` for random `i < j`.
    Inversion,
}

impl MutationOperator for Mutation {
    fn mutate<R: Rng>(&self, c: &Chromosome, rng: &mut R) -> Chromosome {
        let n = c.len();
        if n < 2 {
            return c.clone();
        }

        let picks = index::sample(rng, n, 2);
        let (x, y) = (picks.index(0), picks.index(1));
        let mut genes = c.genes().to_vec();
        match self {
            Mutation::Swap => genes.swap(x, y),
            Mutation::Inversion => genes[x.min(y)..=x.max(y)].reverse(),
        }
        Chromosome::new(genes)
    }
}
