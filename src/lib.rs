//! # u-cvrp
//!
//! Capacitated vehicle routing (CVRP) with a memetic algorithm: a genetic
//! algorithm over customer permutations whose individuals are decoded into
//! routes and improved by local search before being costed.
//!
//! ## Modules
//!
//! - [`models`]: domain types (Node, ProblemInstance, Route, Solution)
//! - [`distance`]: precomputed Euclidean distance matrix
//! - [`evaluation`]: greedy decoding, feasibility checks, and cost
//! - [`local_search`]: 2-opt, relocate, exchange, and the combined policy
//! - [`ga`]: chromosome, operators, configuration, and the memetic loop
//!
//! ## Example
//!
//! ```
//! use u_cvrp::models::{Node, ProblemInstance};
//! use u_cvrp::ga::{MemeticConfig, MemeticRunner};
//! use u_cvrp::evaluation::is_feasible;
//!
//! let instance = ProblemInstance::new(
//!     0,
//!     10,
//!     vec![
//!         Node::depot(0, 0.0, 0.0),
//!         Node::new(1, 2.0, 1.0, 4),
//!         Node::new(2, -1.0, 3.0, 5),
//!         Node::new(3, 4.0, -2.0, 3),
//!         Node::new(4, -3.0, -3.0, 6),
//!     ],
//! )
//! .unwrap();
//!
//! let config = MemeticConfig::fast().with_seed(1);
//! let result = MemeticRunner::run(&instance, &config).unwrap();
//! let routes = result.best_solution.expect("at least one evaluation");
//! assert!(is_feasible(&routes, &instance));
//! ```
//!
//! ## Logging
//!
//! The solver emits [`tracing`] events (run start and end at `info`,
//! per-generation progress at `debug`, repairs at `warn`). Install a
//! subscriber in the application to see them.

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod local_search;
pub mod models;

pub use error::{CvrpError, Result};
