//! Summary reporting
//!
//! Renders workout summaries as the fixed-template message line, and wraps them
//! in JSON envelopes carrying producer metadata.

use crate::error::ComputeError;
use crate::types::{SummaryEnvelope, SummaryProducer, WorkoutSummary};
use crate::{PRODUCER_NAME, WORKOUT_VERSION};
use chrono::Utc;
use std::fmt;
use uuid::Uuid;

impl WorkoutSummary {
    /// Human-readable summary line.
    ///
    /// Every number is printed with exactly two decimals.
    pub fn message(&self) -> String {
        format!(
            "Workout type: {}; Duration: {:.2} h.; Distance: {:.2} km; Avg speed: {:.2} km/h; Calories burned: {:.2}",
            self.training_type, self.duration, self.distance, self.speed, self.calories
        )
    }
}

impl fmt::Display for WorkoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Reporter for producing summary lines and JSON envelopes
pub struct Reporter {
    instance_id: String,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    /// Create a new reporter with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a reporter with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Format a summary as its message line
    pub fn format(summary: &WorkoutSummary) -> String {
        summary.message()
    }

    /// Wrap a summary in an envelope
    pub fn encode(&self, summary: &WorkoutSummary) -> SummaryEnvelope {
        SummaryEnvelope {
            producer: SummaryProducer {
                name: PRODUCER_NAME.to_string(),
                version: WORKOUT_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            summary: summary.clone(),
            message: summary.message(),
        }
    }

    /// Encode to JSON string
    pub fn encode_to_json(&self, summary: &WorkoutSummary) -> Result<String, ComputeError> {
        let envelope = self.encode(summary);
        serde_json::to_string(&envelope).map_err(|e| ComputeError::EncodingError(e.to_string()))
    }
}
