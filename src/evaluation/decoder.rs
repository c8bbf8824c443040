//! Greedy first-fit decoding of a chromosome into routes.
//!
//! # Algorithm
//!
//! Walk the chromosome in order, accumulating demand into the open route.
//! When the next customer would push the load above capacity, close the
//! route at the depot and open a new one. The open route is always closed
//! after the last customer.
//!
//! The decoder never reorders and never looks ahead, so it runs in O(n) and
//! is deterministic; the chromosome order is the only lever the search has
//! over the route partition. It may use more routes than an optimal split.

use crate::error::{CvrpError, Result};
use crate::models::{ProblemInstance, Route, Solution};

/// Decodes a customer permutation into depot-anchored routes.
///
/// An empty chromosome decodes to a single `[depot, depot]` route.
///
/// # Errors
///
/// Returns [`CvrpError::InvalidChromosome`] if `genes` is not a permutation
/// of the instance's customers. Entries are never skipped.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, ProblemInstance};
/// use u_cvrp::evaluation::decode;
///
/// let instance = ProblemInstance::new(
///     1,
///     6,
///     vec![
///         Node::depot(1, 0.0, 0.0),
///         Node::new(2, 1.0, 0.0, 3),
///         Node::new(3, 2.0, 0.0, 3),
///         Node::new(4, 3.0, 0.0, 3),
///         Node::new(5, 4.0, 0.0, 3),
///     ],
/// )
/// .unwrap();
///
/// let solution = decode(&[2, 3, 4, 5], &instance).unwrap();
/// assert_eq!(solution.routes()[0].nodes(), &[1, 2, 3, 1]);
/// assert_eq!(solution.routes()[1].nodes(), &[1, 4, 5, 1]);
/// ```
pub fn decode(genes: &[usize], instance: &ProblemInstance) -> Result<Solution> {
    instance.check_permutation(genes)?;

    let depot = instance.depot();
    let capacity = u64::from(instance.capacity());

    let mut routes = Vec::new();
    let mut current = vec![depot];
    let mut load = 0u64;

    for &cid in genes {
        let demand = instance
            .demand(cid)
            .map(u64::from)
            .ok_or_else(|| CvrpError::InvalidChromosome(format!("{cid} is not a customer")))?;

        if load + demand > capacity && current.len() > 1 {
            current.push(depot);
            routes.push(Route::new(std::mem::replace(&mut current, vec![depot])));
            load = 0;
        }

        current.push(cid);
        load += demand;
    }

    current.push(depot);
    routes.push(Route::new(current));

    Ok(Solution::from_routes(routes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn line_instance(capacity: u32) -> ProblemInstance {
        ProblemInstance::new(
            1,
            capacity,
            vec![
                Node::depot(1, 0.0, 0.0),
                Node::new(2, 1.0, 0.0, 3),
                Node::new(3, 2.0, 0.0, 3),
                Node::new(4, 3.0, 0.0, 3),
                Node::new(5, 4.0, 0.0, 3),
            ],
        )
        .expect("valid instance")
    }

    #[test]
    fn test_decode_splits_on_capacity() {
        let inst = line_instance(6);
        let sol = decode(&[2, 3, 4, 5], &inst).expect("valid chromosome");
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.routes()[0].nodes(), &[1, 2, 3, 1]);
        assert_eq!(sol.routes()[1].nodes(), &[1, 4, 5, 1]);
    }

    #[test]
    fn test_decode_single_route() {
        let inst = line_instance(100);
        let sol = decode(&[5, 3, 2, 4], &inst).expect("valid chromosome");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].nodes(), &[1, 5, 3, 2, 4, 1]);
    }

    #[test]
    fn test_decode_one_customer_per_route() {
        let inst = line_instance(3);
        let sol = decode(&[4, 2, 5, 3], &inst).expect("valid chromosome");
        assert_eq!(sol.num_routes(), 4);
        let firsts: Vec<usize> = sol.routes().iter().map(|r| r.customers()[0]).collect();
        assert_eq!(firsts, vec![4, 2, 5, 3]);
    }

    #[test]
    fn test_decode_is_greedy_not_optimal() {
        // Demands 4, 3, 3, 4 with capacity 7: greedy gives [4,3] [3,4]
        let inst = ProblemInstance::new(
            0,
            7,
            vec![
                Node::depot(0, 0.0, 0.0),
                Node::new(1, 1.0, 0.0, 4),
                Node::new(2, 2.0, 0.0, 3),
                Node::new(3, 3.0, 0.0, 3),
                Node::new(4, 4.0, 0.0, 4),
            ],
        )
        .expect("valid");
        let sol = decode(&[1, 2, 3, 4], &inst).expect("valid chromosome");
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.routes()[0].customers(), &[1, 2]);
        assert_eq!(sol.routes()[1].customers(), &[3, 4]);

        // Same customers, order [2, 3, 1, 4]: 3+3, then 4, then 4
        let sol = decode(&[2, 3, 1, 4], &inst).expect("valid chromosome");
        assert_eq!(sol.routes()[0].customers(), &[2, 3]);
        assert_eq!(sol.routes()[1].customers(), &[1]);
        assert_eq!(sol.routes()[2].customers(), &[4]);
    }

    #[test]
    fn test_decode_empty_chromosome() {
        let inst = ProblemInstance::new(1, 5, vec![Node::depot(1, 0.0, 0.0)]).expect("valid");
        let sol = decode(&[], &inst).expect("empty permutation is valid");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].nodes(), &[1, 1]);
    }

    #[test]
    fn test_decode_rejects_non_permutation() {
        let inst = line_instance(6);
        assert!(matches!(
            decode(&[2, 3, 4], &inst),
            Err(CvrpError::InvalidChromosome(_))
        ));
        assert!(matches!(
            decode(&[2, 3, 4, 4], &inst),
            Err(CvrpError::InvalidChromosome(_))
        ));
        assert!(matches!(
            decode(&[1, 3, 4, 5], &inst),
            Err(CvrpError::InvalidChromosome(_))
        ));
    }
}
