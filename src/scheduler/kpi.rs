//! Batch plan quality metrics (KPIs).
//!
//! Computes packing and timing indicators from a finished plan and its
//! input jobs.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Time | Sum of per-batch maxima |
//! | Serial Time | Sum of every scheduled job's time |
//! | Time Saved | Serial time - total time |
//! | Avg Fill Ratio | Mean of batch volume / max volume |
//! | Avg Items | Mean jobs per batch |

use std::collections::HashMap;

use crate::models::{Constraints, Job, Plan};

/// Plan performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanKpi {
    /// Number of batches.
    pub batch_count: usize,
    /// Number of jobs placed in a batch.
    pub scheduled_count: usize,
    /// Number of jobs turned away by the admission filter.
    pub rejected_count: usize,
    /// Elapsed time with intra-batch parallelism.
    pub total_time: u64,
    /// Elapsed time if every scheduled job ran one after another.
    pub serial_time: u64,
    /// `serial_time - total_time`.
    pub time_saved: u64,
    /// Mean volume utilization per batch (0.0..=1.0).
    pub avg_fill_ratio: f64,
    /// Mean number of jobs per batch.
    pub avg_items_per_batch: f64,
}

impl PlanKpi {
    /// Computes KPIs from a plan and its input jobs.
    ///
    /// # Arguments
    /// * `plan` - The finished plan.
    /// * `jobs` - The input jobs (for per-job times).
    /// * `constraints` - The limits the plan was built under.
    ///
    /// Jobs are matched to plan entries by ID, in input order, so repeated
    /// IDs are each counted once per occurrence in the plan.
    pub fn calculate(plan: &Plan, jobs: &[Job], constraints: &Constraints) -> Self {
        let mut times: HashMap<&str, Vec<u64>> = HashMap::new();
        for job in jobs.iter().rev() {
            times.entry(job.id.as_str()).or_default().push(job.print_time);
        }

        let mut serial_time: u64 = 0;
        for id in &plan.print_order {
            if let Some(t) = times.get_mut(id.as_str()).and_then(Vec::pop) {
                serial_time = serial_time.saturating_add(t);
            }
        }

        let batch_count = plan.batch_count();
        let (avg_fill_ratio, avg_items_per_batch) = if batch_count == 0 {
            (0.0, 0.0)
        } else {
            let fill: f64 = plan
                .grouped_order
                .iter()
                .map(|b| b.total_volume / constraints.max_volume)
                .sum();
            (
                fill / batch_count as f64,
                plan.scheduled_count() as f64 / batch_count as f64,
            )
        };

        Self {
            batch_count,
            scheduled_count: plan.scheduled_count(),
            rejected_count: plan.rejected.len(),
            total_time: plan.total_time,
            serial_time,
            time_saved: serial_time.saturating_sub(plan.total_time),
            avg_fill_ratio,
            avg_items_per_batch,
        }
    }

    /// Whether the plan meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_total_time: u64, min_fill_ratio: f64) -> bool {
        self.total_time <= max_total_time && self.avg_fill_ratio >= min_fill_ratio
    }
}
