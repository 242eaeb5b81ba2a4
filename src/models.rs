use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in WGS84 degrees, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords(pub f64, pub f64);

impl Coords {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    #[default]
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }
}

/// Variant payload, including the derived metric computed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        cadence: f64,
        pace: f64,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        speed: f64,
    },
}

impl WorkoutKind {
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// Validated form input for the variant-specific field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantInput {
    Running { cadence: f64 },
    Cycling { elevation_gain: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    pub distance: f64,
    pub duration: f64,
    pub variant: VariantInput,
}

impl WorkoutInput {
    pub fn workout_type(&self) -> WorkoutType {
        match self.variant {
            VariantInput::Running { .. } => WorkoutType::Running,
            VariantInput::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// A logged activity. Everything except `click_count` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub coords: Coords,
    /// Kilometers.
    pub distance: f64,
    /// Minutes.
    pub duration: f64,
    pub date: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub click_count: u32,
    #[serde(flatten)]
    pub kind: WorkoutKind,
}

impl Workout {
    /// Builds a workout from already validated input. Derived fields are
    /// computed here and never again.
    pub fn new(coords: Coords, input: WorkoutInput, date: DateTime<Utc>) -> Self {
        let kind = match input.variant {
            VariantInput::Running { cadence } => WorkoutKind::Running {
                cadence,
                pace: pace(input.duration, cadence),
            },
            VariantInput::Cycling { elevation_gain } => WorkoutKind::Cycling {
                elevation_gain,
                speed: speed(input.distance, input.duration),
            },
        };

        Self {
            id: id_from_date(date),
            coords,
            distance: input.distance,
            duration: input.duration,
            description: describe(kind.workout_type(), date),
            date,
            click_count: 0,
            kind,
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }

    pub fn click(&mut self) {
        self.click_count = self.click_count.saturating_add(1);
    }
}

/// `"<Type> on <Month> <day>"`, e.g. `"Running on April 4"`.
pub fn describe(workout_type: WorkoutType, date: DateTime<Utc>) -> String {
    format!("{} on {}", workout_type.label(), date.format("%B %-d"))
}

/// Minutes per unit of cadence.
pub fn pace(duration: f64, cadence: f64) -> f64 {
    duration / cadence
}

/// Kilometers per hour.
pub fn speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

/// Pace for running, speed for cycling, as stored at construction.
pub fn derived_metric(workout: &Workout) -> f64 {
    match workout.kind {
        WorkoutKind::Running { pace, .. } => pace,
        WorkoutKind::Cycling { speed, .. } => speed,
    }
}

fn id_from_date(date: DateTime<Utc>) -> String {
    let millis = date.timestamp_millis().to_string();
    let start = millis.len().saturating_sub(10);
    millis[start..].to_string()
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GeolocationReport {
    Granted { latitude: f64, longitude: f64 },
    Denied,
}

#[derive(Debug, Deserialize)]
pub struct MapClickRequest {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct TypeChangeRequest {
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
}

/// Raw form values exactly as typed; coercion happens during validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormSubmission {
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub elevation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, month, day, 9, 30, 0).unwrap()
    }

    #[test]
    fn running_pace_is_duration_over_cadence() {
        let input = WorkoutInput {
            distance: 5.0,
            duration: 30.0,
            variant: VariantInput::Running { cadence: 150.0 },
        };
        let workout = Workout::new(Coords(51.5, -0.1), input, at(4, 4));

        assert_eq!(workout.workout_type(), WorkoutType::Running);
        assert!((derived_metric(&workout) - 0.2).abs() < 1e-12);
        assert_eq!(workout.description, "Running on April 4");
        assert_eq!(workout.click_count, 0);
    }

    #[test]
    fn cycling_speed_is_km_per_hour() {
        let input = WorkoutInput {
            distance: 20.0,
            duration: 60.0,
            variant: VariantInput::Cycling { elevation_gain: 400.0 },
        };
        let workout = Workout::new(Coords(0.0, 0.0), input, at(12, 25));

        assert_eq!(derived_metric(&workout), 20.0);
        assert_eq!(workout.description, "Cycling on December 25");
    }

    #[test]
    fn metric_helpers_match_formulas() {
        for (distance, duration, cadence) in [(1.0, 7.5, 170.0), (42.2, 215.0, 180.0), (3.3, 0.5, 90.0)] {
            assert_eq!(pace(duration, cadence), duration / cadence);
            assert_eq!(speed(distance, duration), distance / (duration / 60.0));
        }
    }

    #[test]
    fn id_is_last_ten_timestamp_digits() {
        let date = at(1, 2);
        let workout = Workout::new(
            Coords(1.0, 2.0),
            WorkoutInput {
                distance: 1.0,
                duration: 1.0,
                variant: VariantInput::Running { cadence: 1.0 },
            },
            date,
        );
        let millis = date.timestamp_millis().to_string();
        assert_eq!(workout.id.len(), 10);
        assert!(millis.ends_with(&workout.id));
    }

    #[test]
    fn serialized_record_uses_persisted_field_names() {
        let workout = Workout::new(
            Coords(10.0, 20.0),
            WorkoutInput {
                distance: 20.0,
                duration: 60.0,
                variant: VariantInput::Cycling { elevation_gain: -15.0 },
            },
            at(6, 1),
        );
        let value = serde_json::to_value(&workout).unwrap();

        assert_eq!(value["type"], "cycling");
        assert_eq!(value["coords"], serde_json::json!([10.0, 20.0]));
        assert_eq!(value["elevationGain"], -15.0);
        assert_eq!(value["speed"], 20.0);
        assert_eq!(value["clickCount"], 0);
        assert_eq!(value["description"], "Cycling on June 1");
    }

    #[test]
    fn click_increments_counter_only() {
        let mut workout = Workout::new(
            Coords(1.0, 1.0),
            WorkoutInput {
                distance: 2.0,
                duration: 10.0,
                variant: VariantInput::Running { cadence: 160.0 },
            },
            at(3, 3),
        );
        let before = workout.clone();
        workout.click();
        workout.click();

        assert_eq!(workout.click_count, 2);
        assert_eq!(workout.description, before.description);
        assert_eq!(workout.kind, before.kind);
    }
}
