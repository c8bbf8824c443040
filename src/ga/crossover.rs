//! Permutation crossover operators.
//!
//! Both operators copy a random slice `[a, b)` (with `a < b`) from parent A
//! into the child at the same positions and differ in how the remaining
//! positions are filled from parent B.
//!
//! - [`Crossover::Order`] (OX): Davis (1985), preserves relative order
//! - [`Crossover::PartiallyMapped`] (PMX): Goldberg & Lingle (1985),
//!   preserves absolute position
//!
//! Parents with fewer than two genes yield a clone of parent A. Parents
//! that are not permutations of each other may yield a child that is not a
//! permutation; the loop detects and repairs those.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use std::collections::{HashMap, HashSet};

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use super::types::CrossoverOperator;

/// Crossover strategy.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::ga::{Chromosome, Crossover, CrossoverOperator};
///
/// let a = Chromosome::new(vec![1, 2, 3, 4, 5]);
/// let b = Chromosome::new(vec![5, 3, 1, 4, 2]);
/// let mut rng = StdRng::seed_from_u64(3);
///
/// let child = Crossover::PartiallyMapped.cross(&a, &b, &mut rng);
/// let mut genes = child.into_genes();
/// genes.sort_unstable();
/// assert_eq!(genes, vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crossover {
    /// Order crossover (OX).
    #[default]
    Order,
    /// Partially mapped crossover (PMX).
    PartiallyMapped,
}

impl CrossoverOperator for Crossover {
    fn cross<R: Rng>(&self, a: &Chromosome, b: &Chromosome, rng: &mut R) -> Chromosome {
        let (pa, pb) = (a.genes(), b.genes());
        if pa.len() < 2 {
            return a.clone();
        }

        let (start, end) = random_cut(pa.len(), rng);
        let genes = match self {
            Crossover::Order => ox_child(pa, pb, start, end),
            Crossover::PartiallyMapped => pmx_child(pa, pb, start, end),
        };
        Chromosome::new(genes)
    }
}

/// Two distinct sorted positions `start < end` in `0..n`.
fn random_cut<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let picks = index::sample(rng, n, 2);
    let (x, y) = (picks.index(0), picks.index(1));
    (x.min(y), x.max(y))
}

/// OX child: `pa[start..end]` in place, other slots left to right in `pb` order.
fn ox_child(pa: &[usize], pb: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = pa.len();
    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut placed = HashSet::with_capacity(end - start);
    for i in start..end {
        child[i] = Some(pa[i]);
        placed.insert(pa[i]);
    }

    let mut fill = pb.iter().filter(|v| !placed.contains(*v));
    for slot in child.iter_mut().filter(|s| s.is_none()) {
        match fill.next() {
            Some(&v) => *slot = Some(v),
            None => break,
        }
    }

    child.into_iter().flatten().collect()
}

/// PMX child: `pa[start..end]` in place, displaced `pb` values routed
/// through the mapping chain, other slots copied from `pb`.
///
/// The chain looks up the A-value at the current position in B:
/// `pos <- position_in_b(pa[pos])`, until it reaches an empty slot.
fn pmx_child(pa: &[usize], pb: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = pa.len();
    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut placed = HashSet::with_capacity(n);
    for i in start..end {
        child[i] = Some(pa[i]);
        placed.insert(pa[i]);
    }

    let pos_in_b: HashMap<usize, usize> = pb.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    for i in start..end.min(pb.len()) {
        let val = pb[i];
        if placed.contains(&val) {
            continue;
        }

        let mut pos = i;
        // A valid chain visits each slot at most once
        for _ in 0..n {
            let Some(&next) = pos_in_b.get(&pa[pos]) else {
                break;
            };
            if next >= n {
                break;
            }
            pos = next;
            if child[pos].is_none() {
                child[pos] = Some(val);
                placed.insert(val);
                break;
            }
        }
    }

    for (i, slot) in child.iter_mut().enumerate() {
        if slot.is_none() {
            *slot = pb.get(i).copied();
        }
    }

    child.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const A: [usize; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
    const B: [usize; 8] = [3, 7, 5, 1, 6, 8, 2, 4];

    fn is_perm_of(child: &[usize], parent: &[usize]) -> bool {
        let mut x = child.to_vec();
        let mut y = parent.to_vec();
        x.sort_unstable();
        y.sort_unstable();
        x == y
    }

    #[test]
    fn test_ox_known_output() {
        // Slice [3, 6) = 4 5 6; fill from B skipping those: 3 7 1 8 2
        assert_eq!(ox_child(&A, &B, 3, 6), vec![3, 7, 1, 4, 5, 6, 8, 2]);
    }

    #[test]
    fn test_ox_fills_from_start() {
        assert_eq!(ox_child(&A, &B, 0, 2), vec![1, 2, 3, 7, 5, 6, 8, 4]);
    }

    #[test]
    fn test_pmx_known_output() {
        // Slice [3, 6) = 4 5 6.
        // B[3] = 1: A[3] = 4 sits at B[7], free -> child[7] = 1.
        // B[4] = 6: already placed.
        // B[5] = 8: A[5] = 6 at B[4] (taken), A[4] = 5 at B[2], free -> child[2] = 8.
        assert_eq!(pmx_child(&A, &B, 3, 6), vec![3, 7, 8, 4, 5, 6, 2, 1]);
    }

    #[test]
    fn test_pmx_identical_parents() {
        assert_eq!(pmx_child(&A, &A, 2, 5), A.to_vec());
    }

    #[test]
    fn test_crossover_closure() {
        let a = Chromosome::new(A.to_vec());
        let b = Chromosome::new(B.to_vec());
        let mut rng = StdRng::seed_from_u64(17);
        for op in [Crossover::Order, Crossover::PartiallyMapped] {
            for _ in 0..200 {
                let child = op.cross(&a, &b, &mut rng);
                assert!(is_perm_of(child.genes(), &A), "{op:?}: {child:?}");
            }
        }
    }

    #[test]
    fn test_short_parents_clone_a() {
        let mut rng = StdRng::seed_from_u64(0);
        for op in [Crossover::Order, Crossover::PartiallyMapped] {
            let a = Chromosome::new(vec![9]);
            let b = Chromosome::new(vec![9]);
            assert_eq!(op.cross(&a, &b, &mut rng), a);
            let empty = Chromosome::new(vec![]);
            assert_eq!(op.cross(&empty, &empty, &mut rng), empty);
        }
    }

    #[test]
    fn test_two_gene_parents() {
        let a = Chromosome::new(vec![1, 2]);
        let b = Chromosome::new(vec![2, 1]);
        let mut rng = StdRng::seed_from_u64(1);
        for op in [Crossover::Order, Crossover::PartiallyMapped] {
            for _ in 0..20 {
                let child = op.cross(&a, &b, &mut rng);
                // The only cut is [0, 1): child starts with A's first gene
                assert_eq!(child.genes(), &[1, 2]);
            }
        }
    }

    #[test]
    fn test_parents_not_modified() {
        let a = Chromosome::new(A.to_vec());
        let b = Chromosome::new(B.to_vec());
        let mut rng = StdRng::seed_from_u64(2);
        let _ = Crossover::PartiallyMapped.cross(&a, &b, &mut rng);
        assert_eq!(a.genes(), &A);
        assert_eq!(b.genes(), &B);
    }

    #[test]
    fn test_mismatched_parents_do_not_panic() {
        let a = Chromosome::new(vec![1, 2, 3, 4]);
        let b = Chromosome::new(vec![1, 1, 9]);
        let mut rng = StdRng::seed_from_u64(4);
        for op in [Crossover::Order, Crossover::PartiallyMapped] {
            for _ in 0..50 {
                let _ = op.cross(&a, &b, &mut rng);
            }
        }
    }
}
