//! Solution evaluation.
//!
//! - [`decode`]: chromosome to routes, greedy first-fit on capacity
//! - [`check_feasibility`] / [`is_feasible`]: structural checks
//! - [`solution_cost`] / [`route_cost`]: travel distance
//! - [`Evaluator`]: decode, local search, and cost in one call

mod cost;
mod decoder;
mod evaluator;
mod feasibility;

pub use cost::{gap_percent, route_cost, solution_cost};
pub use decoder::decode;
pub use evaluator::{Evaluation, Evaluator};
pub use feasibility::{check_feasibility, is_feasible, Violation};
