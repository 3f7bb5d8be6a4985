//! Greedy batch scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `BatchScheduler` packs jobs into batches with a priority-ordered,
//! first-fit, single-pass heuristic under two simultaneous limits
//! (summed volume and job count). It is not optimal, but it is fast and
//! fully deterministic.
//!
//! # KPI
//!
//! `PlanKpi` computes packing and timing metrics: batch count, fill
//! ratio, and time saved by running batch members in parallel.
//!
//! # References
//!
//! - Coffman et al. (2013), "Bin Packing Approximation Algorithms: Survey and Classification"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod batch;
mod kpi;
mod order;

pub use batch::{optimize, BatchRequest, BatchScheduler};
pub use kpi::PlanKpi;
pub use order::{admission_order, compare_jobs, sort_by_admission};
