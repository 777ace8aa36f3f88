//! Synheart Workout - On-device workout metrics from raw sensor packages
//!
//! Workout computes distance, average speed and calories burned for running,
//! sports walking and swimming, through a short deterministic path:
//! sensor package → workout calculator → summary → message line.
//!
//! ## Modules
//!
//! - **Adapter**: Resolve a sensor tag and readings into a workout calculator
//! - **Calculator**: Per-workout distance, speed and calorie formulas
//! - **Reporter**: Fixed-template summary lines and JSON envelopes

pub mod adapter;
pub mod calculator;
pub mod error;
pub mod pipeline;
pub mod reporter;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use adapter::SensorPackageAdapter;
pub use error::{ComputeError, ValidationError};
pub use pipeline::{sample_packages, summarize_packages, ErrorPolicy, WorkoutProcessor};
pub use reporter::Reporter;
pub use types::{SensorPackage, Workout, WorkoutSummary, WorkoutType};

/// Crate version embedded in JSON summaries
pub const WORKOUT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for JSON summaries
pub const PRODUCER_NAME: &str = "synheart-workout";
