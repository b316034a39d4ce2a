use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("{0} is required")]
    MissingParameter(&'static str),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Slot not found")]
    SlotNotFound(String),

    #[error("Slot already booked")]
    SlotTaken(String),

    #[error("Failed to read frontend file: {0}")]
    Frontend(String),
}

impl BookingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::MissingParameter(_) | BookingError::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            BookingError::SlotNotFound(_) => StatusCode::NOT_FOUND,
            BookingError::SlotTaken(_) => StatusCode::CONFLICT,
            BookingError::Frontend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        if let BookingError::SlotNotFound(id) | BookingError::SlotTaken(id) = &self {
            debug!(slot = %id, "{self}");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

impl From<validator::ValidationErrors> for BookingError {
    fn from(errors: validator::ValidationErrors) -> Self {
        BookingError::InvalidParameter(errors.to_string())
    }
}
