use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Database(String),
    #[error("{0}")]
    Cors(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
    error: String,
    success: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            ApiError::Cors(_) => (StatusCode::FORBIDDEN, "Not allowed by CORS"),
        };

        let body = ErrorBody {
            message,
            error: self.to_string(),
            success: false,
        };

        (status, Json(body)).into_response()
    }
}
