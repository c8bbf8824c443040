//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides the core abstractions: nodes with coordinates and demands, an
//! immutable problem instance, depot-anchored routes, and solutions as
//! ordered sets of routes.

mod instance;
mod node;
mod route;
mod solution;

pub use instance::{ProblemInstance, MAX_NODE_ID};
pub use node::Node;
pub use route::Route;
pub use solution::Solution;
