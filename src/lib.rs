//! Capacity-constrained batch scheduling for the U-Engine ecosystem.
//!
//! Partitions discrete jobs into an ordered sequence of batches. Each
//! batch respects a cumulative volume limit and a maximum job count;
//! members of a batch run in parallel, so a batch takes as long as its
//! slowest member.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `Constraints`, `Batch`, `Plan`, `RejectedJob`
//! - **`descriptor`**: JSON job and constraints descriptors
//! - **`validation`**: Input integrity checks (constraint limits, job fields)
//! - **`scheduler`**: `BatchScheduler` (greedy first-fit packing) and `PlanKpi`
//! - **`cutting`**: Rod cutting dynamic program (memoized and tabulated)
//! - **`error`**: Crate error type
//!
//! # Logging
//!
//! Diagnostics go through `tracing`. Jobs too large to ever fit are
//! reported at `warn`; batch formation at `debug`. No subscriber is
//! installed by this crate.
//!
//! # Example
//!
//! ```
//! use u_batch::descriptor::{constraints_from_json, jobs_from_json};
//! use u_batch::scheduler::BatchScheduler;
//!
//! let jobs = jobs_from_json(r#"[
//!     {"id": "A", "volume": 600, "priority": 1, "print_time": 120},
//!     {"id": "B", "volume": 500, "priority": 1, "print_time": 90},
//!     {"id": "C", "volume": 1500, "priority": 2, "print_time": 60}
//! ]"#).unwrap();
//! let constraints = constraints_from_json(r#"{"max_volume": 1000, "max_items": 4}"#).unwrap();
//!
//! let plan = BatchScheduler::new(constraints).optimize(&jobs).unwrap();
//! assert_eq!(plan.print_order, vec!["A", "B"]);
//! assert_eq!(plan.total_time, 210);
//! assert_eq!(plan.rejected[0].job_id, "C");
//! ```
//!
//! # References
//!
//! - Coffman et al. (2013), "Bin Packing Approximation Algorithms: Survey and Classification"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 15

pub mod cutting;
pub mod descriptor;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};
