use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{LoginDto, RegisterDto, UserDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::{app::AppState, session::user::SessionOperator},
        service::auth::AuthService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Create a new operator account
///
/// # Responses
/// - 201 (Created): Account created
/// - 400 (Bad Request): Username or password rejected by validation
/// - 409 (Conflict): Username already taken
/// - 500 (Internal Server Error): Database or password hashing failure
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Invalid username or password", body = ErrorDto),
        (status = 409, description = "Username already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db).register(dto).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with username and password
///
/// Stores the user ID in the session on success.
///
/// # Responses
/// - 200 (Success): Logged in, returns the user
/// - 401 (Unauthorized): Unknown username or wrong password
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "Invalid username or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db).login(dto).await?;

    SessionOperator::sign_in(&session, user.id).await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Logs the user out by clearing their session
///
/// # Responses
/// - 204 (No Content): Logged out, or nobody was logged in
/// - 500 (Internal Server Error): There was an issue reading the session
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    SessionOperator::sign_out(&session).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the logged in user
///
/// # Responses
/// - 200 (Success): Returns the user
/// - 401 (Unauthorized): Nobody is logged in, or the session's user no longer exists
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged in user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    Ok((StatusCode::OK, Json(user)))
}
