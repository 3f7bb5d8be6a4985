//! Error types for batch planning and rod cutting.

use thiserror::Error;

/// Errors that abort a planning or cutting call.
///
/// Jobs rejected by the admission filter are not errors; they are
/// reported on the resulting [`Plan`](crate::models::Plan).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// `max_volume` or `max_items` is not positive.
    #[error("invalid constraints: {0}")]
    InvalidConstraints(String),
    /// A job or constraints descriptor is missing fields or carries bad values.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// Summed batch times do not fit in a `u64`.
    #[error("total time overflows at batch {batch_number}")]
    TimeOverflow {
        /// Batch whose time could not be added.
        batch_number: usize,
    },
    /// The price table does not cover the requested rod length.
    #[error("price table covers lengths up to {available}, but length {length} was requested")]
    PriceTableTooShort {
        /// Requested rod length.
        length: usize,
        /// Number of entries in the price table.
        available: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedInput(err.to_string())
    }
}
