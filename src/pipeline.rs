//! Pipeline orchestration
//!
//! This module provides the batch API for Synheart Workout: sensor packages in,
//! one summary per package out, in input order.

use crate::adapter::SensorPackageAdapter;
use crate::error::ComputeError;
use crate::types::{SensorPackage, WorkoutSummary};

/// Summarize a batch of sensor packages.
///
/// Returns one formatted line per package, in input order. The first package
/// that cannot be built aborts the whole batch.
///
/// # Example
/// ```
/// use synheart_workout::{summarize_packages, SensorPackage};
///
/// let lines = summarize_packages(&[SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0])])?;
/// assert!(lines[0].starts_with("Workout type: Running;"));
/// # Ok::<(), synheart_workout::ComputeError>(())
/// ```
pub fn summarize_packages(packages: &[SensorPackage]) -> Result<Vec<String>, ComputeError> {
    let outcome = WorkoutProcessor::new().process(packages)?;
    Ok(outcome.summaries.iter().map(WorkoutSummary::message).collect())
}

/// The three packages recorded by the reference device run
pub fn sample_packages() -> Vec<SensorPackage> {
    vec![
        SensorPackage::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
        SensorPackage::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
    ]
}

/// What to do with a package that cannot be summarized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first bad package and return its error
    #[default]
    Abort,
    /// Record the bad package and continue with the rest
    Skip,
}

/// A package left out of a batch under `ErrorPolicy::Skip`
#[derive(Debug)]
pub struct SkippedPackage {
    pub index: usize,
    pub error: ComputeError,
}

/// Result of processing a batch
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Summaries of the processed packages, in input order
    pub summaries: Vec<WorkoutSummary>,
    /// Packages left out, in input order (always empty under `Abort`)
    pub skipped: Vec<SkippedPackage>,
}

/// Configurable batch processor.
///
/// Defaults to aborting on the first bad package without checking reading
/// preconditions.
#[derive(Debug, Clone, Default)]
pub struct WorkoutProcessor {
    policy: ErrorPolicy,
    validate: bool,
}

impl WorkoutProcessor {
    /// Create a new processor with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error policy
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Also reject packages whose readings break a precondition (e.g. zero duration)
    pub fn with_validation(mut self) -> Self {
        self.validate = true;
        self
    }

    /// Error policy applied to bad packages
    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Process a batch of packages
    pub fn process(&self, packages: &[SensorPackage]) -> Result<BatchOutcome, ComputeError> {
        let mut outcome = BatchOutcome::default();

        for (index, package) in packages.iter().enumerate() {
            match self.summarize(index, package) {
                Ok(summary) => outcome.summaries.push(summary),
                Err(error) => match self.policy {
                    ErrorPolicy::Abort => return Err(error),
                    ErrorPolicy::Skip => {
                        tracing::warn!(index, %error, "skipping sensor package");
                        outcome.skipped.push(SkippedPackage { index, error });
                    }
                },
            }
        }

        tracing::debug!(
            processed = outcome.summaries.len(),
            skipped = outcome.skipped.len(),
            "batch complete"
        );

        Ok(outcome)
    }

    fn summarize(&self, index: usize, package: &SensorPackage) -> Result<WorkoutSummary, ComputeError> {
        let workout = SensorPackageAdapter::from_package(package)?;

        if self.validate {
            workout
                .validate()
                .map_err(|source| ComputeError::InvalidPackage { index, source })?;
        }

        Ok(workout.summary())
    }
}
