//! Node type: the depot or a customer location.

use serde::{Deserialize, Serialize};

/// A location in a CVRP instance.
///
/// The depot is an ordinary node whose demand is ignored when loads are
/// computed. Ids are arbitrary but must be unique within an instance.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Node;
///
/// let depot = Node::depot(1, 35.0, 35.0);
/// assert_eq!(depot.id(), 1);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Node::new(2, 41.0, 49.0, 10);
/// assert_eq!(c.demand(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
    demand: u32,
}

impl Node {
    /// Creates a new node.
    pub fn new(id: usize, x: f64, y: f64, demand: u32) -> Self {
        Self { id, x, y, demand }
    }

    /// Creates a depot node (demand 0).
    pub fn depot(id: usize, x: f64, y: f64) -> Self {
        Self::new(id, x, y, 0)
    }

    /// Node id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Coordinates as an `(x, y)` pair.
    pub fn coord(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Demand at this node.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_new() {
        let n = Node::new(4, 10.0, 20.0, 5);
        assert_eq!(n.id(), 4);
        assert_eq!(n.x(), 10.0);
        assert_eq!(n.y(), 20.0);
        assert_eq!(n.coord(), (10.0, 20.0));
        assert_eq!(n.demand(), 5);
    }

    #[test]
    fn test_node_depot() {
        let d = Node::depot(1, 35.0, 35.0);
        assert_eq!(d.id(), 1);
        assert_eq!(d.demand(), 0);
    }

    #[test]
    fn test_node_distance() {
        let a = Node::depot(1, 0.0, 0.0);
        let b = Node::new(2, 3.0, 4.0, 0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_node_serde() {
        let n = Node::new(7, 1.5, -2.0, 4);
        let json = serde_json::to_string(&n).expect("serialize");
        assert_eq!(json, r#"{"id":7,"x":1.5,"y":-2.0,"demand":4}"#);
        let back: Node = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, n);
    }
}
