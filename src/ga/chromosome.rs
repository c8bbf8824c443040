//! Permutation chromosome for the memetic algorithm.
//!
//! A chromosome encodes a CVRP solution as a single permutation of all
//! customer IDs (excluding depot). The [`decode`](crate::evaluation::decode)
//! step converts this permutation into capacity-feasible routes.
//!
//! # Reference
//!
//! Prins, C. (2004). "A simple and effective evolutionary algorithm for the
//! vehicle routing problem", *Computers & Operations Research* 31(12), 1985-2002.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::ProblemInstance;

/// An ordered sequence of customer IDs, each expected exactly once.
///
/// Operators always build fresh chromosomes; validity against an instance
/// is checked with [`is_valid_for`](Self::is_valid_for).
///
/// # Examples
///
/// ```
/// use u_cvrp::ga::Chromosome;
///
/// let c = Chromosome::new(vec![3, 1, 2]);
/// assert_eq!(c.genes(), &[3, 1, 2]);
/// assert_eq!(c.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome {
    genes: Vec<usize>,
}

impl Chromosome {
    /// Wraps a gene sequence without validation.
    pub fn new(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    /// A uniformly random permutation of `customers`.
    pub fn random<R: Rng>(customers: &[usize], rng: &mut R) -> Self {
        let mut genes = customers.to_vec();
        genes.shuffle(rng);
        Self { genes }
    }

    /// Returns the gene sequence.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Returns the number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns true if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns true if the genes are a permutation of the instance's customers.
    pub fn is_valid_for(&self, instance: &ProblemInstance) -> bool {
        instance.is_permutation(&self.genes)
    }

    /// Consumes the chromosome, returning the genes.
    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }
}

impl From<Vec<usize>> for Chromosome {
    fn from(genes: Vec<usize>) -> Self {
        Self::new(genes)
    }
}
