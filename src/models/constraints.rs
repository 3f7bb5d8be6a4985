//! Batch capacity constraints.

use serde::{Deserialize, Serialize};

/// Global capacity limits applied to every batch of a run.
///
/// Both limits must be positive; see
/// [`validate_constraints`](crate::validation::validate_constraints).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Constraints {
    /// Ceiling on the summed volume of one batch.
    pub max_volume: f64,
    /// Ceiling on the number of jobs in one batch.
    pub max_items: usize,
}

impl Constraints {
    /// Creates a new constraints value.
    pub fn new(max_volume: f64, max_items: usize) -> Self {
        Self {
            max_volume,
            max_items,
        }
    }

    /// Whether a batch currently holding `volume` across `items` jobs can
    /// admit one more job of `job_volume`.
    #[inline]
    pub fn admits(&self, volume: f64, items: usize, job_volume: f64) -> bool {
        volume + job_volume <= self.max_volume && items < self.max_items
    }
}
