use thiserror::Error;

/// Errors that can occur when operating on a HashRing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A target with this name is already registered.
    #[error("target '{0}' already exists")]
    DuplicateTarget(String),
    /// No target with this name is registered.
    #[error("target '{0}' does not exist")]
    TargetNotFound(String),
    /// A single-target lookup was made on a ring with no targets.
    #[error("no targets exist")]
    EmptyRing,
    /// The requested number of targets was zero.
    #[error("invalid count requested")]
    InvalidCount,
    /// The weight is negative, infinite or NaN, or gives a target more
    /// replicas than `MAX_REPLICAS`.
    #[error("invalid weight {0}: must be finite, non-negative and give at most 2^32 - 1 replicas")]
    InvalidWeight(f64),
    /// The base replica count is invalid (must be in `1..=MAX_REPLICAS`).
    #[error("replica count must be between 1 and 2^32 - 1")]
    InvalidReplicaCount,
    /// The hasher can only be replaced while no targets are registered.
    #[error("cannot replace the hasher of a ring that has targets")]
    RingNotEmpty,
}
