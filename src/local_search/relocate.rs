//! Inter-route customer relocation.
//!
//! # Algorithm
//!
//! Picks two distinct routes uniformly at random, a random customer of the
//! first and a random insertion position among the customers of the second.
//! The move is applied iff the destination load stays within capacity. A
//! source route left without customers is dropped from the solution.
//!
//! This is a perturbation move: it is accepted on capacity alone, not on
//! distance. The intra-route 2-opt pass that follows repairs the sequencing.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use rand::Rng;

use crate::models::{ProblemInstance, Route, Solution};

/// Draws two distinct route indices out of `n >= 2`.
pub(super) fn pick_two_routes<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

/// Sum of customer demands on a route, widened to avoid overflow.
pub(super) fn route_load(customers: &[usize], instance: &ProblemInstance) -> u64 {
    customers
        .iter()
        .filter_map(|&c| instance.demand(c))
        .map(u64::from)
        .sum()
}

/// Moves one random customer to a random position in another route.
///
/// Returns a clone of `solution` when it has fewer than two routes, when the
/// chosen source route is empty, or when the move would overload the
/// destination.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::models::{Node, ProblemInstance, Route, Solution};
/// use u_cvrp::local_search::relocate;
///
/// let instance = ProblemInstance::new(
///     0,
///     10,
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::new(1, 1.0, 0.0, 2),
///         Node::new(2, 2.0, 0.0, 2),
///         Node::new(3, 3.0, 0.0, 2),
///     ],
/// )
/// .unwrap();
/// let solution = Solution::from_routes(vec![
///     Route::from_customers(0, &[1, 2]),
///     Route::from_customers(0, &[3]),
/// ]);
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let moved = relocate(&solution, &instance, &mut rng);
/// assert_eq!(moved.num_served(), 3);
/// ```
pub fn relocate<R: Rng>(solution: &Solution, instance: &ProblemInstance, rng: &mut R) -> Solution {
    let n = solution.num_routes();
    if n < 2 {
        return solution.clone();
    }

    let (from, to) = pick_two_routes(n, rng);
    let source = solution.routes()[from].customers();
    if source.is_empty() {
        return solution.clone();
    }

    let pos = rng.random_range(0..source.len());
    let customer = source[pos];
    let demand = u64::from(instance.demand(customer).unwrap_or(0));

    let dest = solution.routes()[to].customers();
    if route_load(dest, instance) + demand > u64::from(instance.capacity()) {
        return solution.clone();
    }

    let insert_at = rng.random_range(0..=dest.len());
    let depot = instance.depot();

    let mut new_source = source.to_vec();
    new_source.remove(pos);
    let mut new_dest = dest.to_vec();
    new_dest.insert(insert_at, customer);

    let routes = solution
        .routes()
        .iter()
        .enumerate()
        .filter_map(|(idx, route)| {
            if idx == from {
                (!new_source.is_empty()).then(|| Route::from_customers(depot, &new_source))
            } else if idx == to {
                Some(Route::from_customers(depot, &new_dest))
            } else {
                Some(route.clone())
            }
        })
        .collect();

    Solution::from_routes(routes)
}
