use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{UpdateProfileDto, UserDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::auth::AuthService,
    },
};

pub static USER_TAG: &str = "user";

/// Change the logged in user's username and/or password
///
/// # Responses
/// - 200 (Success): Profile updated, returns the user
/// - 400 (Bad Request): Validation failed or the current password is incorrect
/// - 401 (Unauthorized): Not logged in
/// - 409 (Conflict): Username already taken
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    put,
    path = "/api/user/profile",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Invalid change or incorrect current password", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 409, description = "Username already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let user = AuthService::new(&state.db)
        .update_profile(user.id, dto)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}
