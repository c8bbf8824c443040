//! Inter-route customer exchange (swap).
//!
//! Picks two distinct routes and one random customer of each, then swaps
//! them iff both resulting loads stay within capacity. Like
//! [`relocate`](super::relocate), the move is accepted on capacity alone.

use rand::Rng;

use super::relocate::{pick_two_routes, route_load};
use crate::models::{ProblemInstance, Route, Solution};

/// Swaps one random customer between two distinct random routes.
///
/// Returns a clone of `solution` when it has fewer than two routes, when
/// either chosen route is empty, or when the swap would overload a route.
pub fn exchange<R: Rng>(solution: &Solution, instance: &ProblemInstance, rng: &mut R) -> Solution {
    let n = solution.num_routes();
    if n < 2 {
        return solution.clone();
    }

    let (a, b) = pick_two_routes(n, rng);
    let ra = solution.routes()[a].customers();
    let rb = solution.routes()[b].customers();
    if ra.is_empty() || rb.is_empty() {
        return solution.clone();
    }

    let ia = rng.random_range(0..ra.len());
    let ib = rng.random_range(0..rb.len());
    let (ca, cb) = (ra[ia], rb[ib]);

    let da = u64::from(instance.demand(ca).unwrap_or(0));
    let db = u64::from(instance.demand(cb).unwrap_or(0));
    let capacity = u64::from(instance.capacity());
    let load_a = route_load(ra, instance) - da + db;
    let load_b = route_load(rb, instance) - db + da;
    if load_a > capacity || load_b > capacity {
        return solution.clone();
    }

    let depot = instance.depot();
    let mut new_a = ra.to_vec();
    new_a[ia] = cb;
    let mut new_b = rb.to_vec();
    new_b[ib] = ca;

    let mut routes = solution.routes().to_vec();
    routes[a] = Route::from_customers(depot, &new_a);
    routes[b] = Route::from_customers(depot, &new_b);
    Solution::from_routes(routes)
}
