//! Error types for trajectory loading and field configuration.
//!
//! Only construction can fail. Once a `Trajectory` exists, sampling and
//! flipping are total.

use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors produced while turning a trajectory document into a `Trajectory`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("trajectory json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed trajectory document: {reason}")]
    MalformedDocument { reason: String },

    #[error("trajectory document is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("{name}.traj: wrong schema version {actual}, expected {expected}")]
    SchemaVersionMismatch {
        expected: u32,
        actual: JsonValue,
        name: String,
    },

    #[error("sample {index}: field '{field}' is missing or malformed")]
    MalformedSample { index: usize, field: &'static str },

    #[error("split {index} is not a non-negative integer sample index")]
    MalformedSplit { index: usize },

    #[error("{name}.traj: trajectory has no samples")]
    EmptyTrajectory { name: String },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Errors produced while building a `FieldConfig`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("field config parse error: {0}")]
    Parse(String),

    #[error("field dimensions must be finite and positive (length={length}, width={width})")]
    InvalidDimensions { length: f64, width: f64 },

    #[error("default year {year} has no entry in the flip table")]
    MissingDefaultYear { year: i32 },

    #[error("year {year} appears more than once in the flip table")]
    DuplicateYear { year: i32 },
}
