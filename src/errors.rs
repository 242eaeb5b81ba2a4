use crate::form::FormField;
use axum::http::StatusCode;

/// Notice shown whenever form input is rejected.
pub const INVALID_INPUT_NOTICE: &str = "Inputs have to be positive numbers!";

/// Notice shown when the browser cannot provide a position.
pub const LOCATION_UNAVAILABLE_NOTICE: &str = "Could not get your position";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: FormField, value: String },

    #[error("{field} must be finite")]
    NotFinite { field: FormField },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: FormField, value: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("map is not loaded")]
    MapNotLoaded,

    #[error("workout form is not open")]
    FormClosed,

    #[error("no map location selected")]
    NoPendingLocation,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::Validation(_) => Self::unprocessable(INVALID_INPUT_NOTICE),
            other => Self::conflict(other.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
