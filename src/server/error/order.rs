use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Order with ID {0} not found")]
    NotFound(i32),
    #[error("Submitted order ID {0:?} is not a valid integer")]
    InvalidIdFormat(String),
    #[error("No orders were selected for deletion")]
    NothingSelected,
    #[error("{0}")]
    Validation(String),
    #[error("Failed to generate a unique {kind} after {attempts} attempts")]
    GenerationExhausted { kind: &'static str, attempts: u32 },
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Order not found"),
            Self::InvalidIdFormat(_) => error_response(
                StatusCode::BAD_REQUEST,
                "The submitted record IDs contain an invalid value.",
            ),
            Self::NothingSelected => error_response(
                StatusCode::BAD_REQUEST,
                "No records were selected for deletion.",
            ),
            Self::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
            Self::GenerationExhausted { .. } => InternalServerError(self).into_response(),
        }
    }
}
