//! Dense distance matrix.

use crate::error::{CvrpError, Result};
use crate::models::{Node, ProblemInstance, MAX_NODE_ID};

/// Tolerance used by [`DistanceMatrix::from_data`] when checking symmetry.
pub const SYMMETRY_TOL: f64 = 1e-9;

/// A dense n×n distance matrix stored in row-major order.
///
/// Rows and columns are addressed by node id through a slot table, so
/// lookups stay O(1) even when ids do not start at zero (benchmark
/// instances usually number the depot `1`).
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Node;
/// use u_cvrp::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::depot(1, 0.0, 0.0),
///     Node::new(2, 3.0, 4.0, 10),
///     Node::new(3, 6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(1, 2) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
    slots: Vec<Option<usize>>,
}

impl DistanceMatrix {
    /// Computes the Euclidean matrix of an instance (depot included).
    pub fn from_instance(instance: &ProblemInstance) -> Self {
        Self::from_nodes(instance.nodes())
    }

    /// Computes a Euclidean distance matrix from node coordinates.
    ///
    /// If an id occurs twice, the later node wins.
    ///
    /// # Panics
    ///
    /// Panics if a node id exceeds [`MAX_NODE_ID`]. Nodes taken from a
    /// [`ProblemInstance`] always satisfy this.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let ids: Vec<usize> = nodes.iter().map(Node::id).collect();
        let slots = match build_slots(&ids) {
            Some(slots) => slots,
            None => panic!("node id exceeds the maximum of {MAX_NODE_ID}"),
        };
        let n = nodes.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self {
            data,
            size: n,
            slots,
        }
    }

    /// Creates a distance matrix from an explicit n×n grid whose rows and
    /// columns follow the order of `ids`.
    ///
    /// Returns `None` if the data length doesn't match `ids.len()²`, an id
    /// repeats or exceeds [`MAX_NODE_ID`], an entry is negative or not
    /// finite, a diagonal entry is not zero, or the grid is not symmetric
    /// within [`SYMMETRY_TOL`].
    pub fn from_data(ids: &[usize], data: Vec<f64>) -> Option<Self> {
        let n = ids.len();
        if data.len() != n * n {
            return None;
        }
        if data.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return None;
        }
        if (0..n).any(|i| data[i * n + i] != 0.0) {
            return None;
        }
        let slots = build_slots(ids)?;
        if slots.iter().flatten().count() != n {
            return None;
        }
        let matrix = Self {
            data,
            size: n,
            slots,
        };
        matrix.is_symmetric(SYMMETRY_TOL).then_some(matrix)
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either id has no row in the matrix. Use
    /// [`try_get`](Self::try_get) or [`distance`](Self::distance) when the
    /// ids are not known to be valid.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        match self.try_get(from, to) {
            Some(d) => d,
            None => panic!("distance lookup for unknown node: {from} -> {to}"),
        }
    }

    /// Returns the distance from `from` to `to`, or `None` for unknown ids.
    pub fn try_get(&self, from: usize, to: usize) -> Option<f64> {
        let i = self.slots.get(from).copied().flatten()?;
        let j = self.slots.get(to).copied().flatten()?;
        Some(self.data[i * self.size + j])
    }

    /// Returns the distance from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`CvrpError::UnknownNode`] naming the first unknown id.
    pub fn distance(&self, from: usize, to: usize) -> Result<f64> {
        self.try_get(from, to).ok_or_else(|| {
            let unknown = if self.contains(from) { to } else { from };
            CvrpError::UnknownNode(unknown)
        })
    }

    /// Returns `true` if node `id` has a row in this matrix.
    pub fn contains(&self, id: usize) -> bool {
        self.slots.get(id).copied().flatten().is_some()
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let a = self.data[i * self.size + j];
                let b = self.data[j * self.size + i];
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

/// Maps node ids to matrix rows. `None` if an id exceeds [`MAX_NODE_ID`].
fn build_slots(ids: &[usize]) -> Option<Vec<Option<usize>>> {
    let len = match ids.iter().copied().max() {
        Some(m) if m > MAX_NODE_ID => return None,
        Some(m) => m.checked_add(1)?,
        None => 0,
    };
    let mut slots = vec![None; len];
    for (idx, &id) in ids.iter().enumerate() {
        slots[id] = Some(idx);
    }
    Some(slots)
}
