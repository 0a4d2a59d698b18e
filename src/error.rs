use thiserror::Error;

/// Failure to build a merkle tree.
///
/// Construction is never retried internally; a caller that wants to retry
/// after a `HashFailure` simply builds again.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// No leaves were supplied.
    #[error("no leaves to build the tree")]
    EmptyInput,

    /// The hash algorithm failed while hashing leaf data or a node pair.
    #[error("failed to hash node at layer {layer}")]
    HashFailure {
        /// Layer being built when the failure happened. Layer 0 covers leaf
        /// data hashed by `from_data` and the pairs of leaves.
        layer: usize,
        /// Error reported by the hash algorithm.
        #[source]
        source: anyhow::Error,
    },
}
