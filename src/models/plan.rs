//! Batch plan (solution) model.
//!
//! A plan is the ordered sequence of batches produced by one scheduling
//! run, plus the flattened job order, the aggregate elapsed time, and
//! the jobs the admission filter turned away.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A group of jobs executed concurrently.
///
/// All members start together and the batch completes when its slowest
/// member completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// 1-based position in emission order.
    pub batch_number: usize,
    /// Member job IDs in admission order.
    pub jobs: Vec<String>,
    /// Summed member volume, rounded to 2 decimal places.
    pub total_volume: f64,
    /// Longest member `print_time`.
    pub batch_time: u64,
}

/// A job excluded before packing because it can never fit in any batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedJob {
    /// Rejected job ID.
    pub job_id: String,
    /// The job's volume.
    pub volume: f64,
    /// The volume ceiling it exceeded.
    pub max_volume: f64,
}

/// Result of a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Every scheduled job ID, batch by batch, in admission order.
    pub print_order: Vec<String>,
    /// Emitted batches in order.
    pub grouped_order: Vec<Batch>,
    /// Sum of every batch's `batch_time`.
    pub total_time: u64,
    /// Jobs excluded by the admission filter, in input order.
    #[serde(default)]
    pub rejected: Vec<RejectedJob>,
}

impl Batch {
    /// Creates a batch record. `total_volume` is rounded to 2 decimals.
    pub fn new(
        batch_number: usize,
        jobs: Vec<String>,
        total_volume: f64,
        batch_time: u64,
    ) -> Self {
        Self {
            batch_number,
            jobs,
            total_volume: round_volume(total_volume),
            batch_time,
        }
    }

    /// Number of member jobs.
    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the batch has no members. Emitted batches never are.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Whether the batch contains the given job.
    pub fn contains(&self, job_id: &str) -> bool {
        self.jobs.iter().any(|j| j == job_id)
    }
}

impl RejectedJob {
    /// Creates a rejection record.
    pub fn new(job_id: impl Into<String>, volume: f64, max_volume: f64) -> Self {
        Self {
            job_id: job_id.into(),
            volume,
            max_volume,
        }
    }
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch, extending `print_order` and `total_time`.
    ///
    /// # Errors
    /// [`Error::TimeOverflow`] if `total_time` would exceed `u64::MAX`;
    /// the plan is left unchanged.
    pub fn add_batch(&mut self, batch: Batch) -> Result<()> {
        self.total_time = self
            .total_time
            .checked_add(batch.batch_time)
            .ok_or(Error::TimeOverflow {
                batch_number: batch.batch_number,
            })?;
        self.print_order.extend(batch.jobs.iter().cloned());
        self.grouped_order.push(batch);
        Ok(())
    }

    /// Records a job turned away by the admission filter.
    pub fn add_rejection(&mut self, rejected: RejectedJob) {
        self.rejected.push(rejected);
    }

    /// Number of batches.
    pub fn batch_count(&self) -> usize {
        self.grouped_order.len()
    }

    /// Number of scheduled jobs.
    pub fn scheduled_count(&self) -> usize {
        self.print_order.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.grouped_order.is_empty()
    }

    /// Finds the batch holding a given job.
    pub fn batch_for_job(&self, job_id: &str) -> Option<&Batch> {
        self.grouped_order.iter().find(|b| b.contains(job_id))
    }

    /// Whether the given job was turned away by the admission filter.
    pub fn is_rejected(&self, job_id: &str) -> bool {
        self.rejected.iter().any(|r| r.job_id == job_id)
    }
}

/// Rounds a volume to 2 decimal places for reporting, ties to even.
#[inline]
fn round_volume(volume: f64) -> f64 {
    (volume * 100.0).round_ties_even() / 100.0
}
