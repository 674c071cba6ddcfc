use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Plate {0} not found")]
    NotFound(u64),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("No plate ids left to assign")]
    IdsExhausted,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
            AppError::IdsExhausted => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
