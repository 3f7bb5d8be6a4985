//! JSON job and constraints descriptors.
//!
//! Callers that hold their input as JSON (or as an already-parsed
//! [`serde_json::Value`]) convert it here. Any missing, wrong-typed, or
//! unknown field fails the whole conversion with
//! [`Error::MalformedInput`]; nothing is partially accepted.
//!
//! # Formats
//!
//! ```text
//! job:         { "id": string, "volume": number, "priority": integer, "print_time": integer }
//! constraints: { "max_volume": number, "max_items": integer }
//! ```

use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{Constraints, Job};

/// Parses a JSON array of job descriptors.
pub fn jobs_from_json(input: &str) -> Result<Vec<Job>> {
    let value: Value = serde_json::from_str(input)?;
    jobs_from_value(value)
}

/// Converts a parsed JSON array of job descriptors.
///
/// Errors name the offending position so a caller can find the bad entry.
pub fn jobs_from_value(value: Value) -> Result<Vec<Job>> {
    let Value::Array(items) = value else {
        return Err(Error::MalformedInput(format!(
            "expected an array of jobs, got {}",
            kind_of(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Job>(item)
                .map_err(|e| Error::MalformedInput(format!("job at position {index}: {e}")))
        })
        .collect()
}

/// Parses a JSON constraints descriptor.
pub fn constraints_from_json(input: &str) -> Result<Constraints> {
    let value: Value = serde_json::from_str(input)?;
    constraints_from_value(value)
}

/// Converts a parsed JSON constraints descriptor.
pub fn constraints_from_value(value: Value) -> Result<Constraints> {
    serde_json::from_value(value).map_err(|e| Error::MalformedInput(format!("constraints: {e}")))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
