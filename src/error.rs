use thiserror::Error;

/// Errors surfaced by the mining engine and its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinerError {
    /// A submitted field is not valid hex or has the wrong length.
    #[error("malformed submission: {0}")]
    MalformedSubmission(String),
    /// The epoch is past the end of the cache/dataset size table.
    #[error("unsupported epoch {0}")]
    UnsupportedEpoch(u64),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
