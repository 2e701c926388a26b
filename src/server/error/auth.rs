use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Username {0:?} is already taken")]
    UsernameTaken(String),
    #[error("The current password is incorrect")]
    IncorrectPassword,
    #[error("{0}")]
    Validation(String),
    #[error("Failed to hash or verify password: {0}")]
    PasswordHash(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", Self::UserNotInSession);

                error_response(StatusCode::UNAUTHORIZED, "Please log in to access this page.")
            }
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(user_id = %user_id, "{}", self);

                error_response(StatusCode::UNAUTHORIZED, "Please log in to access this page.")
            }
            Self::InvalidCredentials => {
                tracing::debug!("{}", Self::InvalidCredentials);

                error_response(StatusCode::UNAUTHORIZED, "Invalid username or password.")
            }
            Self::UsernameTaken(_) => error_response(
                StatusCode::CONFLICT,
                "That username is already taken, please choose another.",
            ),
            Self::IncorrectPassword => error_response(
                StatusCode::BAD_REQUEST,
                "The current password is incorrect, password was not changed.",
            ),
            Self::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
            Self::PasswordHash(_) => InternalServerError(self).into_response(),
        }
    }
}
