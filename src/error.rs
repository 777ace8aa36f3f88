//! Error types for Synheart Workout

use thiserror::Error;

/// Errors that can occur while building or summarizing workouts
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Unknown workout type: {0}")]
    UnknownWorkoutType(String),

    #[error("Wrong number of readings for {tag}: expected {expected}, got {actual}")]
    ArityMismatch {
        tag: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse sensor package: {0}")]
    ParseError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Invalid package at index {index}: {source}")]
    InvalidPackage {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// Precondition violations reported by `Workout::validate`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}
