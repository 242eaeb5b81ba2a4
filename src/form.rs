use crate::errors::ValidationError;
use crate::models::{FormSubmission, VariantInput, WorkoutInput, WorkoutType};
use serde::Serialize;
use std::{fmt, time::Duration};

/// How long the page keeps the form container hidden after a reset.
pub const FORM_RESET_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Distance => "distance",
            FormField::Duration => "duration",
            FormField::Cadence => "cadence",
            FormField::Elevation => "elevation",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormFields {
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub visible: bool,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub fields: FormFields,
    pub secondary: FormField,
    pub focus: Option<FormField>,
    pub reveal_after_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct FormController {
    visible: bool,
    workout_type: WorkoutType,
    fields: FormFields,
    secondary: FormField,
    focus: Option<FormField>,
    reveal_after: Option<Duration>,
}

impl Default for FormController {
    fn default() -> Self {
        Self {
            visible: false,
            workout_type: WorkoutType::default(),
            fields: FormFields::default(),
            secondary: FormField::Cadence,
            focus: None,
            reveal_after: None,
        }
    }
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn open(&mut self) {
        self.visible = true;
        self.focus = Some(FormField::Distance);
        self.reveal_after = None;
    }

    /// Clears every field, resets the type selector and hides the form. The
    /// page keeps the container out of layout for `reset_delay`.
    pub fn close(&mut self, reset_delay: Duration) {
        self.fields = FormFields::default();
        self.workout_type = WorkoutType::default();
        self.toggle_fields_for_type();
        self.visible = false;
        self.focus = None;
        self.reveal_after = Some(reset_delay);
    }

    pub fn select_type(&mut self, workout_type: WorkoutType) {
        self.workout_type = workout_type;
    }

    /// Shows the secondary field that belongs to the selected type.
    pub fn toggle_fields_for_type(&mut self) {
        self.secondary = match self.workout_type {
            WorkoutType::Running => FormField::Cadence,
            WorkoutType::Cycling => FormField::Elevation,
        };
    }

    /// Copies raw input values into the form.
    pub fn fill(&mut self, submission: &FormSubmission) {
        self.select_type(submission.workout_type);
        self.toggle_fields_for_type();
        self.fields = FormFields {
            distance: submission.distance.clone(),
            duration: submission.duration.clone(),
            cadence: submission.cadence.clone(),
            elevation: submission.elevation.clone(),
        };
    }

    /// Distance, duration and cadence must be finite and strictly positive.
    /// Elevation gain is signed, so it only has to be finite.
    pub fn read_and_validate(&self) -> Result<WorkoutInput, ValidationError> {
        let distance = positive(FormField::Distance, &self.fields.distance)?;
        let duration = positive(FormField::Duration, &self.fields.duration)?;

        let variant = match self.workout_type {
            WorkoutType::Running => VariantInput::Running {
                cadence: positive(FormField::Cadence, &self.fields.cadence)?,
            },
            WorkoutType::Cycling => VariantInput::Cycling {
                elevation_gain: finite(FormField::Elevation, &self.fields.elevation)?,
            },
        };

        Ok(WorkoutInput {
            distance,
            duration,
            variant,
        })
    }

    pub fn view(&self) -> FormView {
        FormView {
            visible: self.visible,
            workout_type: self.workout_type,
            fields: self.fields.clone(),
            secondary: self.secondary,
            focus: self.focus,
            reveal_after_ms: self.reveal_after.map(|delay| delay.as_millis() as u64),
        }
    }
}

fn finite(field: FormField, raw: &str) -> Result<f64, ValidationError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    Ok(value)
}

fn positive(field: FormField, raw: &str) -> Result<f64, ValidationError> {
    let value = finite(field, raw)?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(workout_type: WorkoutType, values: [&str; 4]) -> FormSubmission {
        FormSubmission {
            workout_type,
            distance: values[0].to_string(),
            duration: values[1].to_string(),
            cadence: values[2].to_string(),
            elevation: values[3].to_string(),
        }
    }

    fn validate(workout_type: WorkoutType, values: [&str; 4]) -> Result<WorkoutInput, ValidationError> {
        let mut form = FormController::new();
        form.fill(&submission(workout_type, values));
        form.read_and_validate()
    }

    #[test]
    fn valid_running_input() {
        let input = validate(WorkoutType::Running, ["5", " 30 ", "150", ""]).unwrap();
        assert_eq!(input.distance, 5.0);
        assert_eq!(input.duration, 30.0);
        assert_eq!(input.variant, VariantInput::Running { cadence: 150.0 });
    }

    #[test]
    fn zero_distance_is_rejected() {
        let err = validate(WorkoutType::Running, ["0", "30", "150", ""]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotPositive {
                field: FormField::Distance,
                value: 0.0
            }
        );
    }

    #[test]
    fn negative_cadence_is_rejected() {
        let err = validate(WorkoutType::Running, ["5", "30", "-5", ""]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NotPositive {
                field: FormField::Cadence,
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_and_non_finite_are_rejected() {
        assert!(matches!(
            validate(WorkoutType::Running, ["abc", "30", "150", ""]),
            Err(ValidationError::NotANumber { field: FormField::Distance, .. })
        ));
        assert!(matches!(
            validate(WorkoutType::Cycling, ["5", "inf", "", "10"]),
            Err(ValidationError::NotFinite { field: FormField::Duration })
        ));
        assert!(matches!(
            validate(WorkoutType::Cycling, ["5", "30", "", "NaN"]),
            Err(ValidationError::NotFinite { field: FormField::Elevation })
        ));
        assert!(matches!(
            validate(WorkoutType::Cycling, ["5", "30", "", ""]),
            Err(ValidationError::NotANumber { field: FormField::Elevation, .. })
        ));
    }

    #[test]
    fn cycling_elevation_may_be_zero_or_negative() {
        let input = validate(WorkoutType::Cycling, ["20", "60", "", "-35"]).unwrap();
        assert_eq!(input.variant, VariantInput::Cycling { elevation_gain: -35.0 });
        assert!(validate(WorkoutType::Cycling, ["20", "60", "", "0"]).is_ok());
        // Cadence is ignored for cycling.
        assert!(validate(WorkoutType::Cycling, ["20", "60", "-1", "0"]).is_ok());
    }

    #[test]
    fn toggle_follows_selected_type() {
        let mut form = FormController::new();
        assert_eq!(form.view().secondary, FormField::Cadence);

        form.select_type(WorkoutType::Cycling);
        form.toggle_fields_for_type();
        assert_eq!(form.view().secondary, FormField::Elevation);

        // Toggling again without a type change keeps the same field.
        form.toggle_fields_for_type();
        assert_eq!(form.view().secondary, FormField::Elevation);
    }

    #[test]
    fn open_focuses_distance_and_close_resets() {
        let mut form = FormController::new();
        form.open();
        assert!(form.is_open());
        assert_eq!(form.view().focus, Some(FormField::Distance));

        form.fill(&submission(WorkoutType::Cycling, ["20", "60", "", "400"]));
        form.close(FORM_RESET_DELAY);
        let view = form.view();

        assert!(!view.visible);
        assert_eq!(view.fields, FormFields::default());
        assert_eq!(view.workout_type, WorkoutType::Running);
        assert_eq!(view.secondary, FormField::Cadence);
        assert_eq!(view.reveal_after_ms, Some(1000));

        form.open();
        assert_eq!(form.view().reveal_after_ms, None);
    }
}
