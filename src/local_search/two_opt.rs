//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For a route `[depot, c1, ..., ck, depot]` and every interior segment
//! `[i..=j]`, compute the change in distance from reversing it:
//!
//! ```text
//! delta = d(r[i-1], r[j]) + d(r[i], r[j+1]) - d(r[i-1], r[i]) - d(r[j], r[j+1])
//! ```
//!
//! Each pass scans all segments and applies the single best reversal with
//! `delta < 0`. Passes repeat until no improving reversal exists
//! (best-improvement strategy). Routes of four nodes or fewer are returned
//! unchanged. The delta formula assumes symmetric distances.
//!
//! Customers never change route, so capacity is preserved.
//!
//! # Complexity
//!
//! O(k²) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;
use crate::error::{CvrpError, Result};
use crate::models::{Route, Solution};

/// Minimum decrease for a reversal to count as an improvement.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Applies 2-opt to a single route until no reversal shortens it.
///
/// # Errors
///
/// Returns [`CvrpError::UnknownNode`] if a node has no row in the matrix.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, Route};
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::evaluation::route_cost;
/// use u_cvrp::local_search::two_opt_route;
///
/// let dm = DistanceMatrix::from_nodes(&[
///     Node::depot(0, 0.0, 0.0),
///     Node::new(1, 1.0, 0.0, 1),
///     Node::new(2, 2.0, 0.0, 1),
///     Node::new(3, 3.0, 0.0, 1),
/// ]);
///
/// let route = Route::from_customers(0, &[1, 3, 2]);
/// let improved = two_opt_route(&route, &dm).unwrap();
/// assert!((route_cost(improved.nodes(), &dm).unwrap() - 6.0).abs() < 1e-10);
/// ```
pub fn two_opt_route(route: &Route, distances: &DistanceMatrix) -> Result<Route> {
    if let Some(&unknown) = route.nodes().iter().find(|&&n| !distances.contains(n)) {
        return Err(CvrpError::UnknownNode(unknown));
    }
    if route.nodes().len() <= 4 {
        return Ok(route.clone());
    }

    let mut nodes = route.nodes().to_vec();
    let n = nodes.len();

    loop {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 1..n - 2 {
            for j in i + 1..n - 1 {
                let delta = two_opt_delta(&nodes, distances, i, j);
                if delta < -IMPROVEMENT_EPS && best.is_none_or(|(_, _, d)| delta < d) {
                    best = Some((i, j, delta));
                }
            }
        }

        match best {
            Some((i, j, _)) => nodes[i..=j].reverse(),
            None => break,
        }
    }

    Ok(Route::new(nodes))
}

/// Applies [`two_opt_route`] to every route of a solution.
///
/// # Errors
///
/// Returns [`CvrpError::UnknownNode`] if a node has no row in the matrix.
pub fn two_opt_solution(solution: &Solution, distances: &DistanceMatrix) -> Result<Solution> {
    let routes = solution
        .routes()
        .iter()
        .map(|r| two_opt_route(r, distances))
        .collect::<Result<Vec<_>>>()?;
    Ok(Solution::from_routes(routes))
}

/// Distance change from reversing `nodes[i..=j]`.
fn two_opt_delta(nodes: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let prev = nodes[i - 1];
    let next = nodes[j + 1];

    let old_cost = distances.get(prev, nodes[i]) + distances.get(nodes[j], next);
    let new_cost = distances.get(prev, nodes[j]) + distances.get(nodes[i], next);

    new_cost - old_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::route_cost;
    use crate::models::Node;

    fn line_matrix() -> DistanceMatrix {
        DistanceMatrix::from_nodes(&[
            Node::depot(0, 0.0, 0.0),
            Node::new(1, 1.0, 0.0, 10),
            Node::new(2, 2.0, 0.0, 10),
            Node::new(3, 3.0, 0.0, 10),
        ])
    }

    fn square_matrix() -> DistanceMatrix {
        DistanceMatrix::from_nodes(&[
            Node::depot(0, 5.0, 5.0),
            Node::new(1, 0.0, 0.0, 5),
            Node::new(2, 10.0, 0.0, 5),
            Node::new(3, 0.0, 10.0, 5),
            Node::new(4, 10.0, 10.0, 5),
        ])
    }

    fn cost(route: &Route, dm: &DistanceMatrix) -> f64 {
        route_cost(route.nodes(), dm).expect("known nodes")
    }

    #[test]
    fn test_2opt_already_optimal() {
        let dm = line_matrix();
        let route = Route::from_customers(0, &[1, 2, 3]);
        let improved = two_opt_route(&route, &dm).expect("known nodes");
        assert_eq!(improved, route);
        assert!((cost(&improved, &dm) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_fixes_detour() {
        let dm = line_matrix();
        // 0→2→1→3→0 = 2 + 1 + 2 + 3 = 8
        let route = Route::from_customers(0, &[2, 1, 3]);
        let improved = two_opt_route(&route, &dm).expect("known nodes");
        assert!((cost(&improved, &dm) - 6.0).abs() < 1e-10);
        assert_eq!(improved.nodes()[0], 0);
        assert_eq!(*improved.nodes().last().expect("non-empty"), 0);
    }

    #[test]
    fn test_2opt_reverses_segment_ending_at_last_customer() {
        let dm = DistanceMatrix::from_nodes(&[
            Node::depot(0, 0.0, 0.0),
            Node::new(1, 0.0, 10.0, 1),
            Node::new(2, 10.0, 0.0, 1),
            Node::new(3, 10.0, 10.0, 1),
        ]);
        // Only reversing [2, 3] improves: 0→1→3→2→0 = 40
        let route = Route::from_customers(0, &[1, 2, 3]);
        let improved = two_opt_route(&route, &dm).expect("known nodes");
        assert_eq!(improved.customers(), &[1, 3, 2]);
        assert!((cost(&improved, &dm) - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_uncrosses_square() {
        let dm = square_matrix();
        // 1(0,0) → 4(10,10) → 2(10,0) → 3(0,10) crosses itself
        let route = Route::from_customers(0, &[1, 4, 2, 3]);
        let before = cost(&route, &dm);
        let improved = two_opt_route(&route, &dm).expect("known nodes");
        assert!(cost(&improved, &dm) < before - 1e-6);
    }

    #[test]
    fn test_2opt_short_routes_unchanged() {
        let dm = line_matrix();
        for route in [
            Route::empty(0),
            Route::from_customers(0, &[2]),
            Route::from_customers(0, &[3, 1]),
        ] {
            assert_eq!(two_opt_route(&route, &dm).expect("known nodes"), route);
        }
    }

    #[test]
    fn test_2opt_idempotent() {
        let dm = square_matrix();
        let route = Route::from_customers(0, &[4, 1, 3, 2]);
        let once = two_opt_route(&route, &dm).expect("known nodes");
        let twice = two_opt_route(&once, &dm).expect("known nodes");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_2opt_preserves_customers() {
        let dm = square_matrix();
        let route = Route::from_customers(0, &[3, 1, 4, 2]);
        let improved = two_opt_route(&route, &dm).expect("known nodes");
        let mut ids = improved.customers().to_vec();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_2opt_unknown_node() {
        let dm = line_matrix();
        let route = Route::from_customers(0, &[1, 9, 2, 3]);
        assert_eq!(two_opt_route(&route, &dm), Err(CvrpError::UnknownNode(9)));
    }

    #[test]
    fn test_2opt_solution() {
        let dm = line_matrix();
        let sol = Solution::from_routes(vec![
            Route::from_customers(0, &[2, 1, 3]),
            Route::from_customers(0, &[1]),
        ]);
        let improved = two_opt_solution(&sol, &dm).expect("known nodes");
        assert_eq!(improved.num_routes(), 2);
        assert_eq!(improved.routes()[1].customers(), &[1]);
        assert!((cost(&improved.routes()[0], &dm) - 6.0).abs() < 1e-10);
    }
}
