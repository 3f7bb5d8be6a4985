//! Admission ordering.
//!
//! Jobs are considered for batches by ascending priority value, then by
//! descending volume so that hard-to-fit jobs are placed before small
//! fillers. Jobs equal on both keys keep their input order.

use std::cmp::Ordering;

use crate::models::Job;

/// Compares two jobs by admission precedence.
///
/// `Less` means `a` is considered before `b`. Volumes are compared in
/// IEEE total order, so the comparison is a total order even for
/// unvalidated input.
pub fn compare_jobs(a: &Job, b: &Job) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| b.volume.total_cmp(&a.volume))
}

/// Sorts indices into `jobs` by admission precedence.
///
/// The sort is stable: indices whose jobs compare equal keep their
/// relative order.
pub fn sort_by_admission(jobs: &[Job], indices: &mut [usize]) {
    indices.sort_by(|&a, &b| compare_jobs(&jobs[a], &jobs[b]));
}

/// Returns all job indices in admission order.
pub fn admission_order(jobs: &[Job]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..jobs.len()).collect();
    sort_by_admission(jobs, &mut indices);
    indices
}
