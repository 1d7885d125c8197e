use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cvd_engine::{CvdError, ErrorKind};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Not found")]
    NotFound,

    #[error("Simulation error: {0}")]
    Simulate(#[from] SimulateError),

    #[error("{0}")]
    Schedule(#[from] ScheduleError),
}

impl From<CvdError> for ApiError {
    fn from(e: CvdError) -> Self {
        ApiError::Simulate(SimulateError::Engine(e))
    }
}

/// Refusals from the live frame scheduler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Too many live sources (max {max}); stop one first")]
    TooManySources { max: usize },
}

#[derive(Debug, Error)]
pub enum SimulateError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Image too large: {width}x{height} (max {max_width}x{max_height})")]
    ImageTooLarge {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("{0}")]
    Engine(#[from] CvdError),

    #[error("Simulation task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimulateError {
    /// HTTP status this failure maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            SimulateError::PngDecode(_) => StatusCode::BAD_REQUEST,
            SimulateError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            SimulateError::Engine(e) => match e.kind() {
                ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
                ErrorKind::ComputationFailure => StatusCode::INTERNAL_SERVER_ERROR,
            },
            SimulateError::PngEncode(_) | SimulateError::Task(_) | SimulateError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidParameter(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Simulate(e) => (e.status(), e.to_string()),
            ApiError::Schedule(_) => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
