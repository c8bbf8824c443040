//! Local search operators for improving CVRP solutions.
//!
//! - [`two_opt_route`] / [`two_opt_solution`]: intra-route 2-opt edge reversal
//! - [`relocate`]: move one customer to another route
//! - [`exchange`]: swap one customer between two routes
//! - [`LocalSearch`]: the policy combining them inside the memetic loop
//!
//! All operators take their input by reference and return a new solution.

mod exchange;
mod policy;
mod relocate;
mod two_opt;

pub use exchange::exchange;
pub use policy::LocalSearch;
pub use relocate::relocate;
pub use two_opt::{two_opt_route, two_opt_solution};
