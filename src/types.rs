//! Core types for Synheart Workout
//!
//! This module defines the data that flows through the crate: sensor packages as
//! they arrive from a device, the per-type workout calculators built from them, and
//! the summaries (plus JSON envelopes) produced at the end.

use serde::{Deserialize, Serialize};

/// Workout type, identified on the wire by a short sensor tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Swim,
    Run,
    Walk,
}

impl WorkoutType {
    /// All supported workout types
    pub const ALL: [WorkoutType; 3] = [WorkoutType::Swim, WorkoutType::Run, WorkoutType::Walk];

    /// Resolve a sensor tag ("SWM", "RUN", "WLK"). Matching is exact.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SWM" => Some(WorkoutType::Swim),
            "RUN" => Some(WorkoutType::Run),
            "WLK" => Some(WorkoutType::Walk),
            _ => None,
        }
    }

    /// Sensor tag for this workout type
    pub fn tag(&self) -> &'static str {
        match self {
            WorkoutType::Swim => "SWM",
            WorkoutType::Run => "RUN",
            WorkoutType::Walk => "WLK",
        }
    }

    /// Label used in summaries
    pub fn name(&self) -> &'static str {
        match self {
            WorkoutType::Swim => "Swimming",
            WorkoutType::Run => "Running",
            WorkoutType::Walk => "SportsWalking",
        }
    }

    /// Number of readings a package of this type carries
    pub fn arity(&self) -> usize {
        match self {
            WorkoutType::Run => 3,
            WorkoutType::Walk => 4,
            WorkoutType::Swim => 5,
        }
    }

    /// Reading names in positional order
    pub fn reading_names(&self) -> &'static [&'static str] {
        match self {
            WorkoutType::Run => &["action", "duration", "weight"],
            WorkoutType::Walk => &["action", "duration", "weight", "height"],
            WorkoutType::Swim => &["action", "duration", "weight", "length_pool", "count_pool"],
        }
    }
}

/// Raw package received from a sensor: a type tag plus positional readings.
///
/// Deserializes from either `{"workout_type": "RUN", "data": [...]}` or the
/// pair form `["RUN", [...]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PackageRepr")]
pub struct SensorPackage {
    /// Sensor tag ("SWM", "RUN", "WLK")
    pub workout_type: String,
    /// Readings in constructor order: action, duration, weight[, height | length_pool, count_pool]
    pub data: Vec<f64>,
}

impl SensorPackage {
    pub fn new(workout_type: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            workout_type: workout_type.into(),
            data,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PackageRepr {
    Object { workout_type: String, data: Vec<f64> },
    Pair(String, Vec<f64>),
}

impl From<PackageRepr> for SensorPackage {
    fn from(repr: PackageRepr) -> Self {
        match repr {
            PackageRepr::Object { workout_type, data } => SensorPackage { workout_type, data },
            PackageRepr::Pair(workout_type, data) => SensorPackage { workout_type, data },
        }
    }
}

/// Readings shared by every workout type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Training {
    /// Number of actions performed (steps, or strokes for swimming)
    pub action: f64,
    /// Workout duration (hours)
    pub duration: f64,
    /// Athlete weight (kg)
    pub weight: f64,
}

/// Sports walking readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SportsWalking {
    pub training: Training,
    /// Athlete height (cm)
    pub height: f64,
}

/// Swimming readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swimming {
    pub training: Training,
    /// Pool length (m)
    pub length_pool: f64,
    /// Number of pool lengths swum
    pub count_pool: f64,
}

/// A workout calculator, one variant per supported workout type.
///
/// Built once from a sensor package and never mutated; see `calculator` for the
/// formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Workout {
    Running(Training),
    SportsWalking(SportsWalking),
    Swimming(Swimming),
}

/// Summary of a completed workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Workout label ("Running", "SportsWalking", "Swimming")
    pub training_type: String,
    /// Duration (hours)
    pub duration: f64,
    /// Distance (km)
    pub distance: f64,
    /// Average speed (km/h)
    pub speed: f64,
    /// Calories burned (kcal)
    pub calories: f64,
}

/// Producer metadata attached to JSON summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// JSON envelope around a workout summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEnvelope {
    pub producer: SummaryProducer,
    pub computed_at_utc: String,
    pub summary: WorkoutSummary,
    /// The formatted summary line
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tag_mapping() {
        for workout_type in WorkoutType::ALL {
            assert_eq!(WorkoutType::from_tag(workout_type.tag()), Some(workout_type));
            assert_eq!(workout_type.reading_names().len(), workout_type.arity());
        }
        assert_eq!(WorkoutType::from_tag("XYZ"), None);
        assert_eq!(WorkoutType::from_tag("run"), None);
    }

    #[test]
    fn test_deserialize_object_package() {
        let json = r#"{"workout_type": "RUN", "data": [15000, 1, 75]}"#;
        let package: SensorPackage = serde_json::from_str(json).unwrap();

        assert_eq!(package, SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0]));
    }

    #[test]
    fn test_deserialize_pair_package() {
        let json = r#"["SWM", [720, 1, 80, 25, 40]]"#;
        let package: SensorPackage = serde_json::from_str(json).unwrap();

        assert_eq!(package.workout_type, "SWM");
        assert_eq!(package.data, vec![720.0, 1.0, 80.0, 25.0, 40.0]);
    }

    #[test]
    fn test_serialize_package_as_object() {
        let package = SensorPackage::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]);
        let value = serde_json::to_value(&package).unwrap();

        assert_eq!(value["workout_type"], "WLK");
        assert_eq!(value["data"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_serialize_workout_tagged() {
        let workout = Workout::Running(Training {
            action: 15000.0,
            duration: 1.0,
            weight: 75.0,
        });
        let value = serde_json::to_value(workout).unwrap();

        assert_eq!(value["type"], "running");
        assert_eq!(value["action"], 15000.0);
    }
}
