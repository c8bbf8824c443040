//! Structural feasibility checks for solutions.

use std::fmt;

use crate::models::{ProblemInstance, Solution};

/// The first constraint a solution was found to break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The route does not start and end at the depot.
    DepotMismatch {
        /// Route index in the solution.
        route_index: usize,
    },
    /// An interior node is not a customer of the instance.
    UnknownCustomer {
        /// Route index in the solution.
        route_index: usize,
        /// Offending node id.
        node: usize,
    },
    /// A customer is visited more than once across the solution.
    DuplicateCustomer {
        /// Route index of the second visit.
        route_index: usize,
        /// Customer id.
        customer_id: usize,
    },
    /// Interior demand exceeds the vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load of the route.
        load: u64,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// Some customers are not visited at all.
    MissingCustomers {
        /// Number of unvisited customers.
        count: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DepotMismatch { route_index } => {
                write!(f, "route {route_index} does not start and end at the depot")
            }
            Violation::UnknownCustomer { route_index, node } => {
                write!(f, "route {route_index} visits non-customer node {node}")
            }
            Violation::DuplicateCustomer {
                route_index,
                customer_id,
            } => write!(f, "customer {customer_id} visited again in route {route_index}"),
            Violation::CapacityExceeded {
                route_index,
                load,
                capacity,
            } => write!(f, "route {route_index} load {load} exceeds capacity {capacity}"),
            Violation::MissingCustomers { count } => write!(f, "{count} customers not served"),
        }
    }
}

/// Checks a solution against the instance, stopping at the first violation.
///
/// For every route: both ends are the depot, interior nodes are customers
/// not seen in any earlier route, and the interior demand fits the
/// capacity. Finally every customer must have been visited.
pub fn check_feasibility(
    solution: &Solution,
    instance: &ProblemInstance,
) -> Result<(), Violation> {
    let depot = instance.depot();
    let capacity = instance.capacity();
    let mut served = vec![false; instance.nodes().last().map_or(0, |n| n.id() + 1)];
    let mut num_served = 0usize;

    for (route_index, route) in solution.routes().iter().enumerate() {
        let nodes = route.nodes();
        if nodes.len() < 2 || nodes[0] != depot || nodes[nodes.len() - 1] != depot {
            return Err(Violation::DepotMismatch { route_index });
        }

        let mut load = 0u64;
        for &node in route.customers() {
            if !instance.is_customer(node) {
                return Err(Violation::UnknownCustomer { route_index, node });
            }
            if std::mem::replace(&mut served[node], true) {
                return Err(Violation::DuplicateCustomer {
                    route_index,
                    customer_id: node,
                });
            }
            num_served += 1;
            load += u64::from(instance.demand(node).unwrap_or(0));
        }

        if load > u64::from(capacity) {
            return Err(Violation::CapacityExceeded {
                route_index,
                load,
                capacity,
            });
        }
    }

    if num_served != instance.num_customers() {
        return Err(Violation::MissingCustomers {
            count: instance.num_customers() - num_served,
        });
    }
    Ok(())
}

/// Returns `true` if the solution passes [`check_feasibility`].
pub fn is_feasible(solution: &Solution, instance: &ProblemInstance) -> bool {
    check_feasibility(solution, instance).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Route};

    fn instance() -> ProblemInstance {
        ProblemInstance::new(
            1,
            6,
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

    fn routes(seqs: &[&[usize]]) -> Solution {
        Solution::from_routes(seqs.iter().map(|s| Route::new(s.to_vec())).collect())
    }

    #[test]
    fn test_feasible_solution() {
        let sol = routes(&[&[1, 2, 3, 1], &[1, 4, 5, 1]]);
        assert!(is_feasible(&sol, &instance()));
    }

    #[test]
    fn test_depot_mismatch() {
        let sol = routes(&[&[2, 3, 1], &[1, 4, 5, 1]]);
        assert_eq!(
            check_feasibility(&sol, &instance()),
            Err(Violation::DepotMismatch { route_index: 0 })
        );
        let sol = routes(&[&[1, 2, 3, 1], &[1, 4, 5]]);
        assert_eq!(
            check_feasibility(&sol, &instance()),
            Err(Violation::DepotMismatch { route_index: 1 })
        );
        let sol = routes(&[&[1]]);
        assert!(!is_feasible(&sol, &instance()));
    }

    #[test]
    fn test_duplicate_across_routes() {
        let sol = routes(&[&[1, 2, 3, 1], &[1, 3, 4, 5, 1]]);
        assert_eq!(
            check_feasibility(&sol, &instance()),
            Err(Violation::DuplicateCustomer {
                route_index: 1,
                customer_id: 3
            })
        );
    }

    #[test]
    fn test_capacity_exceeded() {
        let sol = routes(&[&[1, 2, 3, 4, 1], &[1, 5, 1]]);
        assert_eq!(
            check_feasibility(&sol, &instance()),
            Err(Violation::CapacityExceeded {
                route_index: 0,
                load: 9,
                capacity: 6
            })
        );
    }

    #[test]
    fn test_missing_customer() {
        let sol = routes(&[&[1, 2, 3, 1], &[1, 4, 1]]);
        assert_eq!(
            check_feasibility(&sol, &instance()),
            Err(Violation::MissingCustomers { count: 1 })
        );
    }

    #[test]
    fn test_depot_in_interior() {
        let sol = routes(&[&[1, 2, 1, 3, 1], &[1, 4, 5, 1]]);
        assert_eq!(
            check_feasibility(&sol, &instance()),
            Err(Violation::UnknownCustomer {
                route_index: 0,
                node: 1
            })
        );
    }

    #[test]
    fn test_unknown_node() {
        let sol = routes(&[&[1, 2, 3, 1], &[1, 4, 5, 99, 1]]);
        assert!(matches!(
            check_feasibility(&sol, &instance()),
            Err(Violation::UnknownCustomer { node: 99, .. })
        ));
    }

    #[test]
    fn test_empty_route_is_allowed() {
        let sol = routes(&[&[1, 2, 3, 1], &[1, 1], &[1, 4, 5, 1]]);
        assert!(is_feasible(&sol, &instance()));
    }

    #[test]
    fn test_violation_display() {
        let v = Violation::CapacityExceeded {
            route_index: 2,
            load: 9,
            capacity: 6,
        };
        assert_eq!(v.to_string(), "route 2 load 9 exceeds capacity 6");
    }
}
