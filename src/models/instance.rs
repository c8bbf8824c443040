//! CVRP problem instance.

use std::collections::BTreeMap;

use crate::error::{CvrpError, Result};

use super::Node;

/// Largest node id accepted by [`ProblemInstance`].
///
/// Lookups go through dense tables indexed by node id, so ids must stay
/// reasonably small (benchmark instances number nodes `1..=n`).
pub const MAX_NODE_ID: usize = 1 << 20;

/// An immutable CVRP instance: one depot, customers with demands, a single
/// vehicle capacity and Euclidean coordinates.
///
/// Construction validates the data and refuses inconsistent instances, so
/// every customer is guaranteed to have a coordinate and a demand that fits
/// in an empty vehicle.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, ProblemInstance};
///
/// let instance = ProblemInstance::new(
///     1,
///     6,
///     vec![
///         Node::depot(1, 0.0, 0.0),
///         Node::new(2, 1.0, 0.0, 3),
///         Node::new(3, 2.0, 0.0, 3),
///     ],
/// )
/// .unwrap();
/// assert_eq!(instance.customers(), &[2, 3]);
/// assert_eq!(instance.demand(3), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    name: Option<String>,
    depot: usize,
    capacity: u32,
    customers: Vec<usize>,
    nodes: Vec<Node>,
    slots: Vec<Option<usize>>,
    known_optimum: Option<f64>,
}

impl ProblemInstance {
    /// Builds an instance from a list of nodes.
    ///
    /// Every node other than `depot` is a customer.
    ///
    /// # Errors
    ///
    /// Returns [`CvrpError::InvalidInstance`] if the capacity is zero, the
    /// depot is missing, ids repeat or exceed [`MAX_NODE_ID`], a coordinate
    /// is not finite, or a customer demand exceeds the capacity.
    pub fn new(depot: usize, capacity: u32, nodes: Vec<Node>) -> Result<Self> {
        if capacity == 0 {
            return Err(CvrpError::InvalidInstance(
                "capacity must be positive".into(),
            ));
        }

        let mut nodes = nodes;
        nodes.sort_by_key(|n| n.id());

        let max_id = nodes.last().map_or(0, |n| n.id());
        if max_id > MAX_NODE_ID {
            return Err(CvrpError::InvalidInstance(format!(
                "node id {max_id} exceeds the maximum of {MAX_NODE_ID}"
            )));
        }

        let mut slots = vec![None; max_id + 1];
        for (idx, node) in nodes.iter().enumerate() {
            if slots[node.id()].is_some() {
                return Err(CvrpError::InvalidInstance(format!(
                    "duplicate node id {}",
                    node.id()
                )));
            }
            if !node.x().is_finite() || !node.y().is_finite() {
                return Err(CvrpError::InvalidInstance(format!(
                    "node {} has a non-finite coordinate",
                    node.id()
                )));
            }
            slots[node.id()] = Some(idx);
        }

        if slots.get(depot).copied().flatten().is_none() {
            return Err(CvrpError::InvalidInstance(format!(
                "depot {depot} has no coordinate"
            )));
        }

        let mut customers = Vec::with_capacity(nodes.len().saturating_sub(1));
        for node in nodes.iter().filter(|n| n.id() != depot) {
            if node.demand() > capacity {
                return Err(CvrpError::InvalidInstance(format!(
                    "customer {} demand {} exceeds capacity {capacity}",
                    node.id(),
                    node.demand()
                )));
            }
            customers.push(node.id());
        }

        Ok(Self {
            name: None,
            depot,
            capacity,
            customers,
            nodes,
            slots,
            known_optimum: None,
        })
    }

    /// Builds an instance from demand and coordinate mappings.
    ///
    /// Customers are `keys(demands) \ {depot}`. Coordinates of nodes that are
    /// neither the depot nor a customer are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CvrpError::InvalidInstance`] if a customer or the depot has
    /// no coordinate, or for any reason listed on [`ProblemInstance::new`].
    pub fn from_maps(
        depot: usize,
        capacity: u32,
        demands: &BTreeMap<usize, u32>,
        coords: &BTreeMap<usize, (f64, f64)>,
    ) -> Result<Self> {
        let (dx, dy) = coords.get(&depot).copied().ok_or_else(|| {
            CvrpError::InvalidInstance(format!("depot {depot} has no coordinate"))
        })?;

        let mut nodes = Vec::with_capacity(demands.len() + 1);
        nodes.push(Node::new(
            depot,
            dx,
            dy,
            demands.get(&depot).copied().unwrap_or(0),
        ));

        for (&id, &demand) in demands.iter().filter(|(id, _)| **id != depot) {
            let (x, y) = coords.get(&id).copied().ok_or_else(|| {
                CvrpError::InvalidInstance(format!("customer {id} has no coordinate"))
            })?;
            nodes.push(Node::new(id, x, y, demand));
        }

        Self::new(depot, capacity, nodes)
    }

    /// Attaches an instance name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches the best known (or optimal) solution cost.
    pub fn with_known_optimum(mut self, cost: f64) -> Self {
        self.known_optimum = Some(cost);
        self
    }

    /// Instance name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Best known solution cost, if any.
    pub fn known_optimum(&self) -> Option<f64> {
        self.known_optimum
    }

    /// Depot node id.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Customer ids in ascending order.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// All nodes (depot included) in ascending id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Looks up a node by id.
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.slots
            .get(id)
            .copied()
            .flatten()
            .map(|idx| &self.nodes[idx])
    }

    /// Demand of node `id`, or `None` if the id is unknown.
    pub fn demand(&self, id: usize) -> Option<u32> {
        self.node(id).map(Node::demand)
    }

    /// Coordinates of node `id`, or `None` if the id is unknown.
    pub fn coord(&self, id: usize) -> Option<(f64, f64)> {
        self.node(id).map(Node::coord)
    }

    /// Returns `true` if `id` is a customer of this instance.
    pub fn is_customer(&self, id: usize) -> bool {
        id != self.depot && self.node(id).is_some()
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> u64 {
        self.customers
            .iter()
            .filter_map(|&c| self.demand(c))
            .map(u64::from)
            .sum()
    }

    /// Lower bound on the number of routes: `ceil(total_demand / capacity)`.
    pub fn min_routes(&self) -> usize {
        self.total_demand().div_ceil(u64::from(self.capacity)) as usize
    }

    /// Verifies that `genes` is a permutation of the customers.
    ///
    /// # Errors
    ///
    /// Returns [`CvrpError::InvalidChromosome`] naming the first problem
    /// found: wrong length, a non-customer entry, or a duplicate.
    pub fn check_permutation(&self, genes: &[usize]) -> Result<()> {
        if genes.len() != self.customers.len() {
            return Err(CvrpError::InvalidChromosome(format!(
                "expected {} customers, got {}",
                self.customers.len(),
                genes.len()
            )));
        }

        // Indexed by node slot
        let mut seen = vec![false; self.nodes.len()];
        for &gene in genes {
            let slot = match self.slots.get(gene).copied().flatten() {
                Some(slot) if gene != self.depot => slot,
                _ => {
                    return Err(CvrpError::InvalidChromosome(format!(
                        "{gene} is not a customer"
                    )))
                }
            };
            if std::mem::replace(&mut seen[slot], true) {
                return Err(CvrpError::InvalidChromosome(format!(
                    "customer {gene} appears twice"
                )));
            }
        }
        Ok(())
    }

    /// Returns `true` if `genes` is a permutation of the customers.
    pub fn is_permutation(&self, genes: &[usize]) -> bool {
        self.check_permutation(genes).is_ok()
    }
}
