//! Input validation for batching problems.
//!
//! Checks structural integrity of jobs and constraints before packing.
//! Detects:
//! - Non-positive or non-finite constraint limits
//! - Empty job IDs
//! - Negative or non-finite job volumes
//!
//! Duplicate job IDs are deliberately not checked; identity within a run
//! is positional.

use std::fmt;

use crate::error::Error;
use crate::models::{Constraints, Job};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `max_volume` is zero, negative, or not finite.
    NonPositiveVolumeLimit,
    /// `max_items` is zero.
    NonPositiveItemLimit,
    /// A job has an empty ID.
    EmptyJobId,
    /// A job volume is negative or not finite.
    InvalidVolume,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether this error concerns the constraints rather than a job.
    pub fn is_constraint_error(&self) -> bool {
        matches!(
            self.kind,
            ValidationErrorKind::NonPositiveVolumeLimit | ValidationErrorKind::NonPositiveItemLimit
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates batch constraints.
///
/// Both limits must be strictly positive and `max_volume` must be finite.
pub fn validate_constraints(constraints: &Constraints) -> ValidationResult {
    let mut errors = Vec::new();

    if !(constraints.max_volume.is_finite() && constraints.max_volume > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveVolumeLimit,
            format!(
                "max_volume must be a positive finite number, got {}",
                constraints.max_volume
            ),
        ));
    }

    if constraints.max_items == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveItemLimit,
            "max_items must be greater than 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates job descriptors.
///
/// Checks:
/// 1. Every job has a non-empty ID
/// 2. Every volume is finite and non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();

    for (index, job) in jobs.iter().enumerate() {
        if job.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyJobId,
                format!("Job at position {index} has an empty ID"),
            ));
        }

        if !(job.volume.is_finite() && job.volume >= 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidVolume,
                format!(
                    "Job '{}' has invalid volume {} (must be finite and non-negative)",
                    job.id, job.volume
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a whole run's input and folds all problems into one [`Error`].
///
/// Constraint problems take precedence and yield
/// [`Error::InvalidConstraints`]; job problems yield
/// [`Error::MalformedInput`].
pub fn validate_input(jobs: &[Job], constraints: &Constraints) -> Result<(), Error> {
    if let Err(errors) = validate_constraints(constraints) {
        return Err(Error::InvalidConstraints(join_messages(&errors)));
    }
    if let Err(errors) = validate_jobs(jobs) {
        return Err(Error::MalformedInput(join_messages(&errors)));
    }
    Ok(())
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
