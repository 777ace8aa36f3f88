//! Sensor package adapter
//!
//! Turns raw sensor packages (a type tag plus positional readings) into workout
//! calculators, and parses packages from JSON or NDJSON.

use crate::error::{ComputeError, ValidationError};
use crate::types::{SensorPackage, SportsWalking, Swimming, Training, Workout, WorkoutType};

/// Adapter for converting sensor packages to workouts
pub struct SensorPackageAdapter;

impl SensorPackageAdapter {
    /// Build the workout calculator for a sensor tag and its readings.
    ///
    /// The tag is resolved first, so an unknown tag is reported as such whatever
    /// the number of readings. Readings are applied positionally and their values
    /// are not checked; see `Workout::validate`.
    pub fn build(tag: &str, readings: &[f64]) -> Result<Workout, ComputeError> {
        let workout_type = WorkoutType::from_tag(tag)
            .ok_or_else(|| ComputeError::UnknownWorkoutType(tag.to_string()))?;

        if readings.len() != workout_type.arity() {
            return Err(ComputeError::ArityMismatch {
                tag: tag.to_string(),
                expected: workout_type.arity(),
                actual: readings.len(),
            });
        }

        let training = Training {
            action: readings[0],
            duration: readings[1],
            weight: readings[2],
        };

        let workout = match workout_type {
            WorkoutType::Run => Workout::Running(training),
            WorkoutType::Walk => Workout::SportsWalking(SportsWalking {
                training,
                height: readings[3],
            }),
            WorkoutType::Swim => Workout::Swimming(Swimming {
                training,
                length_pool: readings[3],
                count_pool: readings[4],
            }),
        };

        tracing::debug!(tag, workout_type = workout_type.name(), "built workout");

        Ok(workout)
    }

    /// Build the workout for a sensor package
    pub fn from_package(package: &SensorPackage) -> Result<Workout, ComputeError> {
        Self::build(&package.workout_type, &package.data)
    }

    /// Parse a JSON string containing an array of sensor packages
    pub fn parse_array(json: &str) -> Result<Vec<SensorPackage>, ComputeError> {
        let packages: Vec<SensorPackage> = serde_json::from_str(json)?;
        Ok(packages)
    }

    /// Parse NDJSON (newline-delimited JSON) containing sensor packages
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<SensorPackage>, ComputeError> {
        let mut packages = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<SensorPackage>(trimmed) {
                Ok(package) => packages.push(package),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(packages)
    }

    /// Validate a batch of packages.
    ///
    /// Returns only the packages that fail, either structurally (unknown tag,
    /// wrong arity) or on reading preconditions.
    pub fn validate_packages(packages: &[SensorPackage]) -> Vec<ValidationResult> {
        packages
            .iter()
            .enumerate()
            .filter_map(|(index, package)| {
                let issue = match Self::from_package(package) {
                    Ok(workout) => workout.validate().err().map(PackageIssue::Invalid),
                    Err(e) => Some(PackageIssue::Malformed(e.to_string())),
                };
                issue.map(|issue| ValidationResult {
                    index,
                    workout_type: package.workout_type.clone(),
                    issue,
                })
            })
            .collect()
    }
}

/// Result of package validation
#[derive(Debug)]
pub struct ValidationResult {
    pub index: usize,
    pub workout_type: String,
    pub issue: PackageIssue,
}

/// Why a package failed validation
#[derive(Debug, Clone, PartialEq)]
pub enum PackageIssue {
    /// The package could not be turned into a workout
    Malformed(String),
    /// The workout was built but its readings break a precondition
    Invalid(ValidationError),
}

impl std::fmt::Display for PackageIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageIssue::Malformed(msg) => write!(f, "{msg}"),
            PackageIssue::Invalid(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_running() {
        let workout = SensorPackageAdapter::build("RUN", &[15000.0, 1.0, 75.0]).unwrap();

        assert_eq!(
            workout,
            Workout::Running(Training {
                action: 15000.0,
                duration: 1.0,
                weight: 75.0,
            })
        );
    }

    #[test]
    fn test_build_walking() {
        let workout = SensorPackageAdapter::build("WLK", &[9000.0, 1.0, 75.0, 180.0]).unwrap();

        match workout {
            Workout::SportsWalking(walk) => {
                assert_eq!(walk.training.action, 9000.0);
                assert_eq!(walk.height, 180.0);
            }
            other => panic!("expected sports walking, got {other:?}"),
        }
    }

    #[test]
    fn test_build_swimming() {
        let workout =
            SensorPackageAdapter::build("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();

        match workout {
            Workout::Swimming(swim) => {
                assert_eq!(swim.training.weight, 80.0);
                assert_eq!(swim.length_pool, 25.0);
                assert_eq!(swim.count_pool, 40.0);
            }
            other => panic!("expected swimming, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag() {
        let result = SensorPackageAdapter::build("XYZ", &[1.0, 1.0, 1.0]);

        match result {
            Err(ComputeError::UnknownWorkoutType(tag)) => assert_eq!(tag, "XYZ"),
            other => panic!("expected unknown workout type, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag_wins_over_arity() {
        let result = SensorPackageAdapter::build("XYZ", &[]);
        assert!(matches!(result, Err(ComputeError::UnknownWorkoutType(_))));
    }

    #[test]
    fn test_arity_mismatch() {
        let cases: [(&str, &[f64]); 3] = [
            ("RUN", &[15000.0, 1.0]),
            ("WLK", &[9000.0, 1.0, 75.0]),
            ("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0, 1.0]),
        ];

        for (tag, readings) in cases {
            match SensorPackageAdapter::build(tag, readings) {
                Err(ComputeError::ArityMismatch {
                    tag: err_tag,
                    expected,
                    actual,
                }) => {
                    assert_eq!(err_tag, tag);
                    assert_eq!(actual, readings.len());
                    assert_ne!(expected, actual);
                }
                other => panic!("expected arity mismatch for {tag}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_build_does_not_check_preconditions() {
        let workout = SensorPackageAdapter::build("RUN", &[15000.0, 0.0, 75.0]);
        assert!(workout.is_ok());
    }

    #[test]
    fn test_parse_ndjson() {
        let ndjson = r#"{"workout_type": "SWM", "data": [720, 1, 80, 25, 40]}

["RUN", [15000, 1, 75]]
{"workout_type": "WLK", "data": [9000, 1, 75, 180]}
"#;

        let packages = SensorPackageAdapter::parse_ndjson(ndjson).unwrap();

        assert_eq!(packages.len(), 3);
        assert_eq!(packages[0].workout_type, "SWM");
        assert_eq!(packages[1].workout_type, "RUN");
        assert_eq!(packages[2].data.len(), 4);
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let ndjson = "[\"RUN\", [15000, 1, 75]]\nnot json\n";

        match SensorPackageAdapter::parse_ndjson(ndjson) {
            Err(ComputeError::ParseError(msg)) => assert!(msg.contains("line 2")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_array() {
        let json = r#"[["RUN", [15000, 1, 75]], {"workout_type": "WLK", "data": [9000, 1, 75, 180]}]"#;

        let packages = SensorPackageAdapter::parse_array(json).unwrap();
        assert_eq!(packages.len(), 2);

        assert!(SensorPackageAdapter::parse_array("{}").is_err());
    }

    #[test]
    fn test_validate_packages() {
        let packages = vec![
            SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
            SensorPackage::new("XYZ", vec![1.0]),
            SensorPackage::new("WLK", vec![9000.0, 1.0, 75.0]),
            SensorPackage::new("SWM", vec![720.0, 0.0, 80.0, 25.0, 40.0]),
        ];

        let results = SensorPackageAdapter::validate_packages(&packages);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].index, 1);
        assert!(matches!(results[0].issue, PackageIssue::Malformed(_)));
        assert_eq!(results[1].index, 2);
        assert_eq!(results[2].index, 3);
        assert_eq!(
            results[2].issue,
            PackageIssue::Invalid(ValidationError::NonPositive {
                field: "duration",
                value: 0.0
            })
        );
    }
}
