//! Crate error type.

use std::fmt;

/// Errors raised by the core.
///
/// Instance and configuration errors are fatal: a run refuses to start.
/// Chromosome and node errors indicate a caller bug (a non-permutation
/// reached the decoder, or a distance was requested for an unknown node).
#[derive(Debug, Clone, PartialEq)]
pub enum CvrpError {
    /// The problem instance is inconsistent or incomplete.
    InvalidInstance(String),
    /// The run configuration is out of range.
    InvalidConfig(String),
    /// A chromosome is not a permutation of the instance's customers.
    InvalidChromosome(String),
    /// A node id has no entry in the distance matrix.
    UnknownNode(usize),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CvrpError>;

impl fmt::Display for CvrpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CvrpError::InvalidInstance(msg) => write!(f, "invalid instance: {msg}"),
            CvrpError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            CvrpError::InvalidChromosome(msg) => write!(f, "invalid chromosome: {msg}"),
            CvrpError::UnknownNode(id) => write!(f, "unknown node: {id}"),
        }
    }
}

impl std::error::Error for CvrpError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CvrpError::InvalidConfig("pop_size must be at least 2".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: pop_size must be at least 2"
        );
        assert_eq!(CvrpError::UnknownNode(7).to_string(), "unknown node: 7");
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(CvrpError::InvalidInstance("capacity must be positive".into()));
        assert!(err.to_string().contains("capacity"));
    }
}
