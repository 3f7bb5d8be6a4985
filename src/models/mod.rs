//! Batch scheduling domain models.
//!
//! Provides the value types for describing a batching problem and its
//! solution. All types are plain data: built once per run, never shared
//! between runs.
//!
//! # Domain Mappings
//!
//! | u-batch | 3D Printing | Laundry | Kiln Firing |
//! |---------|-------------|---------|-------------|
//! | Job | Print Job | Load Item | Piece |
//! | volume | Material (cm³) | Weight | Shelf Area |
//! | Constraints | Printer Bed | Machine Drum | Kiln Chamber |
//! | Batch | Print Run | Wash Cycle | Firing |

mod constraints;
mod job;
mod plan;

pub use constraints::Constraints;
pub use job::Job;
pub use plan::{Batch, Plan, RejectedJob};
