//! Distance-based cost of routes and solutions.

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::Solution;

/// Sum of consecutive-node distances along `nodes` (depot legs included
/// when the sequence carries them).
///
/// # Errors
///
/// Returns [`CvrpError::UnknownNode`](crate::CvrpError::UnknownNode) if a
/// node has no row in the matrix.
pub fn route_cost(nodes: &[usize], distances: &DistanceMatrix) -> Result<f64> {
    nodes
        .windows(2)
        .try_fold(0.0, |acc, leg| Ok(acc + distances.distance(leg[0], leg[1])?))
}

/// Total travel distance of a solution.
///
/// # Errors
///
/// Returns [`CvrpError::UnknownNode`](crate::CvrpError::UnknownNode) if a
/// node has no row in the matrix.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, Route, Solution};
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::evaluation::solution_cost;
///
/// let dm = DistanceMatrix::from_nodes(&[
///     Node::depot(0, 0.0, 0.0),
///     Node::new(1, 3.0, 4.0, 1),
/// ]);
/// let sol = Solution::from_routes(vec![Route::from_customers(0, &[1])]);
/// assert!((solution_cost(&sol, &dm).unwrap() - 10.0).abs() < 1e-10);
/// ```
pub fn solution_cost(solution: &Solution, distances: &DistanceMatrix) -> Result<f64> {
    solution
        .routes()
        .iter()
        .try_fold(0.0, |acc, r| Ok(acc + route_cost(r.nodes(), distances)?))
}

/// Relative gap to a reference cost, in percent.
///
/// Returns `None` when the reference is not positive.
pub fn gap_percent(cost: f64, reference: f64) -> Option<f64> {
    (reference > 0.0).then(|| 100.0 * (cost - reference) / reference)
}
