use thiserror::Error;

/// Errors raised while setting up a JOIN computation.
///
/// Every operation after construction is total, so setup is the only place a
/// caller has to handle failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// The modulus that partitions integers into groups must be strictly
    /// positive.
    #[error("modulus must be positive, got {modulus}")]
    InvalidModulus { modulus: i64 },

    #[error("unknown closure strategy {0:?}, expected `fixpoint` or `propagation`")]
    UnknownStrategy(String),
}
