//! Capacity-constrained greedy batch scheduler.
//!
//! # Algorithm
//!
//! 1. Reject every job whose volume alone exceeds `max_volume`.
//! 2. Sort survivors by priority (ascending), then volume (descending),
//!    keeping input order for exact ties.
//! 3. Repeatedly open an empty batch and scan the pending jobs in sorted
//!    order, admitting each job that still fits under both the volume and
//!    item limits. A job that does not fit is skipped, not revisited, and
//!    the scan continues with later jobs (first-fit, single pass).
//! 4. A batch runs its members in parallel, so its time is the longest
//!    member time; the plan's time is the sum over batches.
//!
//! The packing is a heuristic and is intentionally not optimal.
//!
//! # Complexity
//! O(B * N) where B = batches and N = admitted jobs; O(N²) worst case.

use serde_json::Value;
use tracing::{debug, warn};

use super::order::sort_by_admission;
use crate::descriptor::{constraints_from_value, jobs_from_value};
use crate::error::{Error, Result};
use crate::models::{Batch, Constraints, Job, Plan, RejectedJob};
use crate::validation::validate_input;

/// Input container for a batching run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    /// Jobs to batch.
    pub jobs: Vec<Job>,
    /// Capacity limits.
    pub constraints: Constraints,
}

impl BatchRequest {
    /// Creates a new batch request.
    pub fn new(jobs: Vec<Job>, constraints: Constraints) -> Self {
        Self { jobs, constraints }
    }

    /// Adds a job.
    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Parses a request document of the form
    /// `{ "jobs": [...], "constraints": {...} }`.
    pub fn from_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Converts a parsed request document.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(Error::MalformedInput(
                "request must be an object with `jobs` and `constraints`".into(),
            ));
        };

        let jobs = fields
            .remove("jobs")
            .ok_or_else(|| Error::MalformedInput("request: missing field `jobs`".into()))?;
        let constraints = fields
            .remove("constraints")
            .ok_or_else(|| Error::MalformedInput("request: missing field `constraints`".into()))?;

        if let Some(unknown) = fields.keys().next() {
            return Err(Error::MalformedInput(format!(
                "request: unknown field `{unknown}`"
            )));
        }

        Ok(Self {
            jobs: jobs_from_value(jobs)?,
            constraints: constraints_from_value(constraints)?,
        })
    }
}

/// Greedy first-fit batch scheduler.
///
/// Holds no state between runs; one scheduler can serve any number of
/// [`optimize`](Self::optimize) calls, including concurrent ones.
///
/// # Example
///
/// ```
/// use u_batch::models::{Constraints, Job};
/// use u_batch::scheduler::BatchScheduler;
///
/// let jobs = vec![
///     Job::new("P1", 700.0, 1, 300),
///     Job::new("P2", 400.0, 2, 200),
///     Job::new("P3", 250.0, 1, 150),
/// ];
/// let scheduler = BatchScheduler::new(Constraints::new(1000.0, 4));
/// let plan = scheduler.optimize(&jobs).unwrap();
///
/// assert_eq!(plan.print_order, vec!["P1", "P3", "P2"]);
/// assert_eq!(plan.total_time, 300 + 200);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BatchScheduler {
    constraints: Constraints,
}

impl BatchScheduler {
    /// Creates a scheduler for the given capacity limits.
    pub fn new(constraints: Constraints) -> Self {
        Self { constraints }
    }

    /// The capacity limits applied to every batch.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Partitions jobs into an ordered sequence of batches.
    ///
    /// Jobs that can never fit are excluded, logged at `warn`, and listed
    /// in [`Plan::rejected`].
    ///
    /// # Errors
    /// - [`Error::InvalidConstraints`] if either limit is not positive.
    /// - [`Error::MalformedInput`] if a job has an empty ID or a negative
    ///   or non-finite volume.
    /// - [`Error::TimeOverflow`] if the summed batch times exceed `u64::MAX`.
    ///
    /// No partial plan is produced on error.
    pub fn optimize(&self, jobs: &[Job]) -> Result<Plan> {
        validate_input(jobs, &self.constraints)?;

        let mut plan = Plan::new();
        let mut order = self.admit(jobs, &mut plan);
        sort_by_admission(jobs, &mut order);
        self.pack(jobs, &order, &mut plan)?;

        debug!(
            batches = plan.batch_count(),
            scheduled = plan.scheduled_count(),
            rejected = plan.rejected.len(),
            total_time = plan.total_time,
            "batch plan complete"
        );

        Ok(plan)
    }

    /// Schedules from a request, using the request's own constraints.
    pub fn optimize_request(request: &BatchRequest) -> Result<Plan> {
        Self::new(request.constraints).optimize(&request.jobs)
    }

    /// Admission filter: returns the indices of jobs that can ever fit,
    /// recording the rest on the plan.
    fn admit(&self, jobs: &[Job], plan: &mut Plan) -> Vec<usize> {
        let max_volume = self.constraints.max_volume;
        let mut admitted = Vec::with_capacity(jobs.len());

        for (index, job) in jobs.iter().enumerate() {
            if job.fits_within(max_volume) {
                admitted.push(index);
                continue;
            }

            warn!(
                job_id = %job.id,
                volume = job.volume,
                max_volume,
                "job '{}' has volume {} exceeding the limit of {}; it will be skipped",
                job.id,
                job.volume,
                max_volume
            );
            plan.add_rejection(RejectedJob::new(&job.id, job.volume, max_volume));
        }

        admitted
    }

    /// Greedy packing loop over jobs already in admission order.
    fn pack(&self, jobs: &[Job], order: &[usize], plan: &mut Plan) -> Result<()> {
        let max_items = self.constraints.max_items;
        // pending[slot] tracks order[slot]; admitted slots are cleared
        let mut pending = vec![true; order.len()];
        let mut remaining = order.len();

        while remaining > 0 {
            let mut volume = 0.0;
            let mut members: Vec<&Job> = Vec::new();

            for (slot, &index) in order.iter().enumerate() {
                if members.len() == max_items {
                    break;
                }
                if !pending[slot] {
                    continue;
                }

                let job = &jobs[index];
                if self.constraints.admits(volume, members.len(), job.volume) {
                    volume += job.volume;
                    members.push(job);
                    pending[slot] = false;
                }
            }

            if members.is_empty() {
                break;
            }
            remaining -= members.len();

            let batch_time = members.iter().map(|j| j.print_time).max().unwrap_or(0);
            let batch = Batch::new(
                plan.batch_count() + 1,
                members.iter().map(|j| j.id.clone()).collect(),
                volume,
                batch_time,
            );

            debug!(
                batch_number = batch.batch_number,
                jobs = batch.len(),
                total_volume = batch.total_volume,
                batch_time = batch.batch_time,
                "batch formed"
            );
            plan.add_batch(batch)?;
        }

        Ok(())
    }
}

/// Convenience wrapper: builds a scheduler and runs it once.
pub fn optimize(jobs: &[Job], constraints: Constraints) -> Result<Plan> {
    BatchScheduler::new(constraints).optimize(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn printer() -> Constraints {
        Constraints::new(1000.0, 4)
    }

    fn mixed_priority_jobs() -> Vec<Job> {
        vec![
            Job::new("P1", 700.0, 1, 300),
            Job::new("P2", 400.0, 2, 200),
            Job::new("P3", 350.0, 2, 180),
            Job::new("P4", 250.0, 1, 150),
            Job::new("P5", 200.0, 3, 120),
            Job::new("P6", 150.0, 3, 90),
        ]
    }

    fn batch_ids(batch: &Batch) -> Vec<&str> {
        batch.jobs.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_mixed_priorities() {
        let plan = optimize(&mixed_priority_jobs(), printer()).unwrap();

        assert_eq!(plan.batch_count(), 3);
        let b1 = &plan.grouped_order[0];
        assert_eq!(b1.batch_number, 1);
        assert_eq!(batch_ids(b1), vec!["P1", "P4"]);
        assert!((b1.total_volume - 950.0).abs() < 1e-10);
        assert_eq!(b1.batch_time, 300);

        let b2 = &plan.grouped_order[1];
        assert_eq!(batch_ids(b2), vec!["P2", "P3", "P5"]);
        assert!((b2.total_volume - 950.0).abs() < 1e-10);
        assert_eq!(b2.batch_time, 200);

        let b3 = &plan.grouped_order[2];
        assert_eq!(batch_ids(b3), vec!["P6"]);
        assert_eq!(b3.batch_time, 90);

        assert_eq!(plan.total_time, 590);
        assert_eq!(plan.print_order, vec!["P1", "P4", "P2", "P3", "P5", "P6"]);
        assert!(plan.rejected.is_empty());
    }

    #[test]
    fn test_oversized_job_rejected() {
        let jobs = vec![
            Job::new("L1-Big", 800.0, 1, 400),
            Job::new("L2-Medium", 250.0, 2, 150),
            Job::new("L3-Small1", 50.0, 2, 30),
            Job::new("L4-Small2", 50.0, 2, 30),
            Job::new("L5-Small3", 50.0, 2, 30),
            Job::new("L6-Small4", 50.0, 2, 30),
            Job::new("L7-TooBig", 1200.0, 1, 600),
        ];
        let plan = optimize(&jobs, printer()).unwrap();

        assert_eq!(plan.print_order.len(), jobs.len() - 1);
        assert!(!plan.print_order.iter().any(|id| id == "L7-TooBig"));
        assert_eq!(
            plan.rejected,
            vec![RejectedJob::new("L7-TooBig", 1200.0, 1000.0)]
        );

        // L2 does not fit beside L1 but the scan keeps going to the small jobs.
        assert_eq!(
            batch_ids(&plan.grouped_order[0]),
            vec!["L1-Big", "L3-Small1", "L4-Small2", "L5-Small3"]
        );
        assert_eq!(
            batch_ids(&plan.grouped_order[1]),
            vec!["L2-Medium", "L6-Small4"]
        );
        assert_eq!(plan.total_time, 400 + 150);
    }

    #[test]
    fn test_empty_input() {
        let plan = optimize(&[], printer()).unwrap();
        assert!(plan.print_order.is_empty());
        assert!(plan.grouped_order.is_empty());
        assert_eq!(plan.total_time, 0);
        assert!(plan.rejected.is_empty());
    }

    #[test]
    fn test_all_rejected() {
        let jobs = vec![Job::new("A", 5000.0, 1, 10), Job::new("B", 1000.01, 2, 10)];
        let plan = optimize(&jobs, printer()).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.total_time, 0);
        assert_eq!(plan.rejected.len(), 2);
        assert_eq!(plan.rejected[0].job_id, "A");
        assert_eq!(plan.rejected[1].job_id, "B");
    }

    #[test]
    fn test_exact_fit_is_admitted() {
        let jobs = vec![Job::new("full", 1000.0, 1, 10), Job::new("zero", 0.0, 1, 5)];
        let plan = optimize(&jobs, printer()).unwrap();
        assert!(plan.rejected.is_empty());
        assert_eq!(batch_ids(&plan.grouped_order[0]), vec!["full", "zero"]);
        assert_eq!(plan.total_time, 10);
    }

    #[test]
    fn test_item_limit() {
        let jobs: Vec<Job> = (0..5).map(|i| Job::new(format!("J{i}"), 1.0, 1, 10)).collect();
        let plan = optimize(&jobs, Constraints::new(1000.0, 2)).unwrap();
        let sizes: Vec<usize> = plan.grouped_order.iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(plan.total_time, 30);
    }

    #[test]
    fn test_first_fit_skips_without_backtracking() {
        // 600 does not fit after 700, 300 does; 600 waits for batch 2 even
        // though it outranks the job that took its place.
        let jobs = vec![
            Job::new("A1", 700.0, 1, 10),
            Job::new("A2", 600.0, 1, 10),
            Job::new("B", 300.0, 2, 10),
        ];
        let plan = optimize(&jobs, printer()).unwrap();
        assert_eq!(batch_ids(&plan.grouped_order[0]), vec!["A1", "B"]);
        assert_eq!(batch_ids(&plan.grouped_order[1]), vec!["A2"]);
    }

    #[test]
    fn test_duplicate_fields_are_distinct_jobs() {
        let jobs = vec![Job::new("X", 600.0, 1, 10), Job::new("X", 600.0, 1, 20)];
        let plan = optimize(&jobs, printer()).unwrap();
        assert_eq!(plan.batch_count(), 2);
        assert_eq!(plan.print_order, vec!["X", "X"]);
        assert_eq!(plan.total_time, 30);
    }

    #[test]
    fn test_fractional_volume_rounding() {
        let jobs = vec![
            Job::new("a", 0.105, 1, 1),
            Job::new("b", 0.2, 1, 1),
            Job::new("c", 100.0 / 3.0, 1, 1),
        ];
        let plan = optimize(&jobs, Constraints::new(50.0, 4)).unwrap();
        assert!((plan.grouped_order[0].total_volume - 33.64).abs() < 1e-10);
    }

    #[test]
    fn test_total_time_overflow_fails_whole_call() {
        let jobs = vec![Job::new("a", 600.0, 1, u64::MAX), Job::new("b", 600.0, 1, 1)];
        assert_eq!(
            optimize(&jobs, printer()),
            Err(Error::TimeOverflow { batch_number: 2 })
        );

        // A single batch at the limit still succeeds.
        let plan = optimize(&jobs[..1], printer()).unwrap();
        assert_eq!(plan.total_time, u64::MAX);
    }

    #[test]
    fn test_rejection_warning_is_logged() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = {
            let buffer = Arc::clone(&buffer);
            move || LogBuffer(Arc::clone(&buffer))
        };
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let jobs = vec![
            Job::new("L1-Big", 800.0, 1, 400),
            Job::new("L7-TooBig", 1200.0, 1, 600),
        ];
        let plan =
            tracing::subscriber::with_default(subscriber, || optimize(&jobs, printer())).unwrap();
        assert_eq!(plan.rejected.len(), 1);

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "{output}");
        assert!(warnings[0].contains("L7-TooBig"));
        assert!(warnings[0].contains("1200"));
        assert!(warnings[0].contains("1000"));
        assert!(!output.contains("L1-Big"));
    }

    #[test]
    fn test_invalid_constraints_fail_fast() {
        let jobs = mixed_priority_jobs();
        assert!(matches!(
            optimize(&jobs, Constraints::new(0.0, 4)),
            Err(Error::InvalidConstraints(_))
        ));
        assert!(matches!(
            optimize(&jobs, Constraints::new(-1.0, 4)),
            Err(Error::InvalidConstraints(_))
        ));
        assert!(matches!(
            optimize(&jobs, Constraints::new(1000.0, 0)),
            Err(Error::InvalidConstraints(_))
        ));
    }

    #[test]
    fn test_malformed_job_fails_whole_call() {
        let mut jobs = mixed_priority_jobs();
        jobs.push(Job::new("bad", f64::NAN, 1, 10));
        assert!(matches!(
            optimize(&jobs, printer()),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_request_from_json() {
        let request = BatchRequest::from_json(
            r#"{
                "jobs": [
                    {"id": "M1", "volume": 200, "priority": 3, "print_time": 120},
                    {"id": "M3", "volume": 700, "priority": 1, "print_time": 300}
                ],
                "constraints": {"max_volume": 1000.0, "max_items": 4}
            }"#,
        )
        .unwrap();
        assert_eq!(request.jobs.len(), 2);

        let plan = BatchScheduler::optimize_request(&request).unwrap();
        assert_eq!(plan.print_order, vec!["M3", "M1"]);
        assert_eq!(plan.total_time, 300);
    }

    #[test]
    fn test_request_missing_or_unknown_fields() {
        assert!(matches!(
            BatchRequest::from_json(r#"{"jobs": []}"#),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            BatchRequest::from_json(
                r#"{"jobs": [], "constraints": {"max_volume": 1, "max_items": 1}, "extra": 1}"#
            ),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            BatchRequest::from_json("[]"),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_request_builder() {
        let request = BatchRequest::new(Vec::new(), printer())
            .with_job(Job::new("A", 10.0, 1, 5))
            .with_job(Job::new("B", 10.0, 1, 7));
        let plan = BatchScheduler::optimize_request(&request).unwrap();
        assert_eq!(plan.batch_count(), 1);
        assert_eq!(plan.total_time, 7);
    }

    fn random_jobs(rng: &mut StdRng, count: usize) -> Vec<Job> {
        (0..count)
            .map(|i| {
                Job::new(
                    format!("J{i}"),
                    f64::from(rng.random_range(0..1300u32)),
                    rng.random_range(1..=4),
                    rng.random_range(1..500),
                )
            })
            .collect()
    }

    #[test]
    fn test_random_plan_invariants() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let count = rng.random_range(0..40);
            let jobs = random_jobs(&mut rng, count);
            let constraints = Constraints::new(1000.0, rng.random_range(1..=6));
            let plan = optimize(&jobs, constraints).unwrap();

            let by_id: HashMap<&str, &Job> = jobs.iter().map(|j| (j.id.as_str(), j)).collect();

            // Capacity and time aggregation
            let mut time_sum = 0;
            for (i, batch) in plan.grouped_order.iter().enumerate() {
                assert_eq!(batch.batch_number, i + 1);
                assert!(!batch.is_empty());
                assert!(batch.len() <= constraints.max_items);
                assert!(batch.total_volume <= constraints.max_volume);
                let longest = batch.jobs.iter().map(|id| by_id[id.as_str()].print_time).max();
                assert_eq!(Some(batch.batch_time), longest);
                time_sum += batch.batch_time;
            }
            assert_eq!(plan.total_time, time_sum);

            // Completeness and exclusion
            let flattened: Vec<&String> =
                plan.grouped_order.iter().flat_map(|b| b.jobs.iter()).collect();
            assert_eq!(flattened, plan.print_order.iter().collect::<Vec<_>>());
            for job in &jobs {
                let occurrences = plan.print_order.iter().filter(|id| **id == job.id).count();
                if job.volume > constraints.max_volume {
                    assert_eq!(occurrences, 0);
                    assert!(plan.is_rejected(&job.id));
                } else {
                    assert_eq!(occurrences, 1);
                }
            }
            assert_eq!(plan.print_order.len() + plan.rejected.len(), jobs.len());

            // Every batch opens with the most urgent job still pending.
            for (i, batch) in plan.grouped_order.iter().enumerate() {
                let lead = by_id[batch.jobs[0].as_str()].priority;
                for later in &plan.grouped_order[i..] {
                    for id in &later.jobs {
                        assert!(lead <= by_id[id.as_str()].priority);
                    }
                }
            }

            // Idempotence
            assert_eq!(optimize(&jobs, constraints).unwrap(), plan);
        }
    }
}
