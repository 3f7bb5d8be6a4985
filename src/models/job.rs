//! Job model.
//!
//! A job is one unit of work competing for a slot in a batch. It carries
//! a resource cost (volume), a priority class, and a processing duration.

use serde::{Deserialize, Serialize};

/// A job to be batched.
///
/// Jobs are immutable once built. Identity within a run is positional:
/// two jobs with identical fields are still distinct jobs.
///
/// # Priority Convention
/// Lower `priority` values are scheduled first (1 before 2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    /// Unique job identifier. Uniqueness is the caller's responsibility.
    pub id: String,
    /// Resource cost consumed from a batch's volume budget.
    pub volume: f64,
    /// Scheduling priority (lower = more important).
    pub priority: i32,
    /// Processing duration in abstract time units.
    pub print_time: u64,
}

impl Job {
    /// Creates a new job.
    pub fn new(id: impl Into<String>, volume: f64, priority: i32, print_time: u64) -> Self {
        Self {
            id: id.into(),
            volume,
            priority,
            print_time,
        }
    }

    /// Whether this job can ever fit under the given volume ceiling.
    #[inline]
    pub fn fits_within(&self, max_volume: f64) -> bool {
        self.volume <= max_volume
    }
}
