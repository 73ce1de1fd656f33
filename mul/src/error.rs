use alloc::string::String;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MulError {
    /// The shared dimension disagrees: `A` has `a_width` columns but `B` has `b_height` rows.
    #[error("cannot multiply: A has {a_width} columns but B has {b_height} rows")]
    DimensionMismatch { a_width: usize, b_height: usize },

    #[error("cache block size must be at least 1")]
    ZeroBlockSize,

    /// The worker threads could not be started. No output was produced.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}
