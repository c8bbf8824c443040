//! Route type.

use serde::{Deserialize, Serialize};

use super::ProblemInstance;

/// A depot-anchored round trip: `[depot, c1, c2, ..., ck, depot]`.
///
/// The full node sequence is stored, depot legs included, so feasibility
/// checks can verify both ends.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Route;
///
/// let route = Route::from_customers(1, &[4, 2]);
/// assert_eq!(route.nodes(), &[1, 4, 2, 1]);
/// assert_eq!(route.customers(), &[4, 2]);
/// assert_eq!(route.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    nodes: Vec<usize>,
}

impl Route {
    /// Wraps a raw node sequence without validation.
    pub fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// Builds `[depot, customers..., depot]`.
    pub fn from_customers(depot: usize, customers: &[usize]) -> Self {
        let mut nodes = Vec::with_capacity(customers.len() + 2);
        nodes.push(depot);
        nodes.extend_from_slice(customers);
        nodes.push(depot);
        Self { nodes }
    }

    /// The trivial route `[depot, depot]`.
    pub fn empty(depot: usize) -> Self {
        Self::from_customers(depot, &[])
    }

    /// Full node sequence including both depot visits.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Interior nodes (the customers), in visit order.
    pub fn customers(&self) -> &[usize] {
        if self.nodes.len() < 2 {
            return &[];
        }
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Number of customers on this route.
    pub fn len(&self) -> usize {
        self.customers().len()
    }

    /// Returns `true` if the route visits no customer.
    pub fn is_empty(&self) -> bool {
        self.customers().is_empty()
    }

    /// Sum of interior demands. Unknown ids contribute nothing.
    pub fn load(&self, instance: &ProblemInstance) -> u32 {
        self.customers()
            .iter()
            .filter_map(|&c| instance.demand(c))
            .sum()
    }

    /// Consumes the route, returning the node sequence.
    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    #[test]
    fn test_route_empty() {
        let r = Route::empty(1);
        assert_eq!(r.nodes(), &[1, 1]);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn test_route_from_customers() {
        let r = Route::from_customers(0, &[5, 3]);
        assert_eq!(r.nodes(), &[0, 5, 3, 0]);
        assert_eq!(r.customers(), &[5, 3]);
        assert_eq!(r.into_nodes(), vec![0, 5, 3, 0]);
    }

    #[test]
    fn test_route_degenerate_sequences() {
        assert!(Route::new(vec![]).customers().is_empty());
        assert!(Route::new(vec![0]).customers().is_empty());
    }

    #[test]
    fn test_route_load() {
        let inst = ProblemInstance::new(
            0,
            20,
            vec![
                Node::depot(0, 0.0, 0.0),
                Node::new(1, 1.0, 0.0, 7),
                Node::new(2, 2.0, 0.0, 5),
            ],
        )
        .expect("valid");
        let r = Route::from_customers(0, &[1, 2]);
        assert_eq!(r.load(&inst), 12);
    }
}
