//! Distance oracle.
//!
//! Provides a dense, precomputed Euclidean distance matrix. It is built once
//! per instance and read-only afterwards.

mod matrix;

pub use matrix::{DistanceMatrix, SYMMETRY_TOL};
