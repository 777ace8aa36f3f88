//! Workout metric formulas
//!
//! Each workout type derives three metrics from its readings:
//! - Distance (km) from the action count and a per-type step length
//! - Mean speed (km/h)
//! - Calories burned (kcal)
//!
//! All methods are pure functions of the stored readings. Callers must supply a
//! positive duration; `Workout::validate` checks this and the other preconditions
//! but is never applied implicitly.

use crate::error::ValidationError;
use crate::types::{SportsWalking, Swimming, Training, Workout, WorkoutSummary, WorkoutType};

/// Meters in a kilometer
pub const M_IN_KM: f64 = 1000.0;
/// Minutes in an hour
pub const MIN_IN_H: f64 = 60.0;
/// Step length (m) for running and walking
pub const LEN_STEP: f64 = 0.65;

/// Running calorie coefficients
pub mod running {
    pub const CALORIES_MEAN_SPEED_MULTIPLIER: f64 = 18.0;
    pub const CALORIES_MEAN_SPEED_SHIFT: f64 = 1.79;
}

/// Sports walking calorie coefficients
pub mod walking {
    pub const CALORIES_WEIGHT_MULTIPLIER: f64 = 0.035;
    pub const CALORIES_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;
    /// km/h to m/s (rounded, as used by the calorie model)
    pub const KMH_IN_MSEC: f64 = 0.278;
    pub const CM_IN_M: f64 = 100.0;
}

/// Swimming coefficients
pub mod swimming {
    /// Stroke length (m)
    pub const LEN_STEP: f64 = 1.38;
    pub const CALORIES_MEAN_SPEED_SHIFT: f64 = 1.1;
    pub const CALORIES_WEIGHT_MULTIPLIER: f64 = 2.0;
}

impl Workout {
    /// Workout type of this calculator
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            Workout::Running(_) => WorkoutType::Run,
            Workout::SportsWalking(_) => WorkoutType::Walk,
            Workout::Swimming(_) => WorkoutType::Swim,
        }
    }

    /// Readings shared by every workout type
    pub fn training(&self) -> &Training {
        match self {
            Workout::Running(training) => training,
            Workout::SportsWalking(walk) => &walk.training,
            Workout::Swimming(swim) => &swim.training,
        }
    }

    /// Duration in hours
    pub fn duration(&self) -> f64 {
        self.training().duration
    }

    /// Distance covered (km)
    pub fn distance(&self) -> f64 {
        let len_step = match self {
            Workout::Running(_) | Workout::SportsWalking(_) => LEN_STEP,
            Workout::Swimming(_) => swimming::LEN_STEP,
        };
        self.training().action * len_step / M_IN_KM
    }

    /// Mean speed (km/h).
    ///
    /// Swimming uses pool length and lap count rather than the stroke distance.
    pub fn mean_speed(&self) -> f64 {
        match self {
            Workout::Running(training) => self.distance() / training.duration,
            Workout::SportsWalking(walk) => self.distance() / walk.training.duration,
            Workout::Swimming(swim) => {
                swim.length_pool * swim.count_pool / M_IN_KM / swim.training.duration
            }
        }
    }

    /// Calories burned (kcal)
    pub fn spent_calories(&self) -> f64 {
        match self {
            Workout::Running(training) => running_calories(training, self.mean_speed()),
            Workout::SportsWalking(walk) => walking_calories(walk, self.mean_speed()),
            Workout::Swimming(swim) => swimming_calories(swim, self.mean_speed()),
        }
    }

    /// Summarize the workout
    pub fn summary(&self) -> WorkoutSummary {
        WorkoutSummary {
            training_type: self.workout_type().name().to_string(),
            duration: self.duration(),
            distance: self.distance(),
            speed: self.mean_speed(),
            calories: self.spent_calories(),
        }
    }

    /// Check the preconditions the formulas rely on.
    ///
    /// Not called by `SensorPackageAdapter::build`; callers opt in.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let training = self.training();
        require_non_negative("action", training.action)?;
        require_positive("duration", training.duration)?;
        require_positive("weight", training.weight)?;

        match self {
            Workout::Running(_) => Ok(()),
            Workout::SportsWalking(walk) => require_positive("height", walk.height),
            Workout::Swimming(swim) => {
                require_positive("length_pool", swim.length_pool)?;
                require_non_negative("count_pool", swim.count_pool)
            }
        }
    }
}

fn running_calories(training: &Training, mean_speed: f64) -> f64 {
    (running::CALORIES_MEAN_SPEED_MULTIPLIER * mean_speed + running::CALORIES_MEAN_SPEED_SHIFT)
        * training.weight
        / M_IN_KM
        * training.duration
        * MIN_IN_H
}

fn walking_calories(walk: &SportsWalking, mean_speed: f64) -> f64 {
    let weight = walk.training.weight;
    let speed_sq_msec = (mean_speed * walking::KMH_IN_MSEC).powi(2);
    let height_m = walk.height / walking::CM_IN_M;

    (walking::CALORIES_WEIGHT_MULTIPLIER * weight
        + (speed_sq_msec / height_m) * walking::CALORIES_SPEED_HEIGHT_MULTIPLIER * weight)
        * walk.training.duration
        * MIN_IN_H
}

fn swimming_calories(swim: &Swimming, mean_speed: f64) -> f64 {
    (mean_speed + swimming::CALORIES_MEAN_SPEED_SHIFT)
        * swimming::CALORIES_WEIGHT_MULTIPLIER
        * swim.training.weight
        * swim.training.duration
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_running() -> Workout {
        Workout::Running(Training {
            action: 15000.0,
            duration: 1.0,
            weight: 75.0,
        })
    }

    fn make_walking() -> Workout {
        Workout::SportsWalking(SportsWalking {
            training: Training {
                action: 9000.0,
                duration: 1.0,
                weight: 75.0,
            },
            height: 180.0,
        })
    }

    fn make_swimming() -> Workout {
        Workout::Swimming(Swimming {
            training: Training {
                action: 720.0,
                duration: 1.0,
                weight: 80.0,
            },
            length_pool: 25.0,
            count_pool: 40.0,
        })
    }

    #[test]
    fn test_running_metrics() {
        let workout = make_running();

        assert!((workout.distance() - 9.75).abs() < 1e-9);
        assert!((workout.mean_speed() - 9.75).abs() < 1e-9);
        // (18 * 9.75 + 1.79) * 75 / 1000 * 1 * 60
        assert!((workout.spent_calories() - 797.805).abs() < 1e-6);
    }

    #[test]
    fn test_walking_metrics() {
        let workout = make_walking();

        assert!((workout.distance() - 5.85).abs() < 1e-9);
        assert!((workout.mean_speed() - 5.85).abs() < 1e-9);
        // (0.035 * 75 + ((5.85 * 0.278)^2 / 1.8) * 0.029 * 75) * 60
        assert!((workout.spent_calories() - 349.2517475).abs() < 1e-6);
    }

    #[test]
    fn test_swimming_metrics() {
        let workout = make_swimming();

        // Stroke distance: 720 * 1.38 / 1000
        assert!((workout.distance() - 0.9936).abs() < 1e-9);
        // Speed ignores stroke distance: 25 * 40 / 1000 / 1
        assert!((workout.mean_speed() - 1.0).abs() < 1e-9);
        // (1.0 + 1.1) * 2 * 80 * 1
        assert!((workout.spent_calories() - 336.0).abs() < 1e-9);
    }

    #[test]
    fn test_duration_scales_speed() {
        let workout = Workout::Running(Training {
            action: 12000.0,
            duration: 1.5,
            weight: 70.0,
        });

        assert!((workout.distance() - 7.8).abs() < 1e-9);
        assert!((workout.mean_speed() - 5.2).abs() < 1e-9);
        assert!((workout.spent_calories() - 600.957).abs() < 1e-6);
    }

    #[test]
    fn test_walking_duration_scales() {
        let workout = Workout::SportsWalking(SportsWalking {
            training: Training {
                action: 9000.0,
                duration: 2.0,
                weight: 75.0,
            },
            height: 180.0,
        });

        assert!((workout.distance() - 5.85).abs() < 1e-9);
        assert!((workout.mean_speed() - 2.925).abs() < 1e-9);
        // (0.035 * 75 + ((2.925 * 0.278)^2 / 1.8) * 0.029 * 75) * 2 * 60
        assert!((workout.spent_calories() - 410.8758737625).abs() < 1e-6);
    }

    #[test]
    fn test_swimming_duration_scales() {
        let workout = Workout::Swimming(Swimming {
            training: Training {
                action: 720.0,
                duration: 2.0,
                weight: 80.0,
            },
            length_pool: 25.0,
            count_pool: 40.0,
        });

        // 25 * 40 / 1000 / 2
        assert!((workout.mean_speed() - 0.5).abs() < 1e-9);
        // (0.5 + 1.1) * 2 * 80 * 2
        assert!((workout.spent_calories() - 512.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_is_pure() {
        for workout in [make_running(), make_walking(), make_swimming()] {
            assert_eq!(workout.summary(), workout.summary());
        }
    }

    #[test]
    fn test_summary_fields() {
        let summary = make_walking().summary();

        assert_eq!(summary.training_type, "SportsWalking");
        assert_eq!(summary.duration, 1.0);
        assert!((summary.distance - 5.85).abs() < 1e-9);
        assert!((summary.speed - 5.85).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_are_finite_and_non_negative() {
        for workout in [make_running(), make_walking(), make_swimming()] {
            let summary = workout.summary();
            for value in [summary.distance, summary.speed, summary.calories] {
                assert!(value.is_finite());
                assert!(value >= 0.0);
            }
        }
    }

    #[test]
    fn test_validate_accepts_sample_workouts() {
        for workout in [make_running(), make_walking(), make_swimming()] {
            assert!(workout.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let workout = Workout::Running(Training {
            action: 15000.0,
            duration: 0.0,
            weight: 75.0,
        });

        assert_eq!(
            workout.validate(),
            Err(ValidationError::NonPositive {
                field: "duration",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_variant_fields() {
        let mut walk = make_walking();
        if let Workout::SportsWalking(ref mut w) = walk {
            w.height = -10.0;
        }
        assert!(matches!(
            walk.validate(),
            Err(ValidationError::NonPositive { field: "height", .. })
        ));

        let mut swim = make_swimming();
        if let Workout::Swimming(ref mut s) = swim {
            s.count_pool = f64::NAN;
        }
        assert_eq!(
            swim.validate(),
            Err(ValidationError::NotFinite {
                field: "count_pool"
            })
        );
    }
}
