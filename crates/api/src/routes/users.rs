//! User routes: register, login, get and update profile.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use shared::jwt::{bearer, Permission};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Identity;
use crate::response::{Envelope, UserBody};
use crate::services::users::UserRequest;

/// Unwraps a decoded body, turning any decode failure into a 400.
fn decode(payload: Result<Json<UserRequest>, JsonRejection>) -> Result<UserRequest, ApiError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Register a new user.
///
/// POST /v1/user
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<UserBody>>), ApiError> {
    let request = decode(payload)?;
    let user_id = state.users.register(&request).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::success(UserBody::with_id(user_id))),
    ))
}

/// Log in with phone number and password. The token is returned in the
/// `Authorization` response header.
///
/// POST /v1/user/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = decode(payload)?;
    let result = state.users.login(&request).await?;

    Ok((
        AppendHeaders([(header::AUTHORIZATION, bearer(&result.token))]),
        Json(Envelope::success(UserBody::with_id(result.user_id))),
    ))
}

/// Get the caller's profile.
///
/// GET /v1/user
pub async fn get_profile(
    State(state): State<AppState>,
    Identity(auth): Identity,
) -> Result<Json<Envelope<UserBody>>, ApiError> {
    auth.require(Permission::GetProfile)?;

    let user = state.users.get_profile(auth.user_id).await?;

    Ok(Json(Envelope::success(UserBody {
        full_name: Some(user.full_name),
        phone_number: Some(user.phone_number),
        ..Default::default()
    })))
}

/// Update the caller's full name and/or phone number.
///
/// PUT /v1/user
pub async fn update_profile(
    State(state): State<AppState>,
    Identity(auth): Identity,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<Envelope<UserBody>>, ApiError> {
    let request = decode(payload)?;
    auth.require(Permission::UpdateProfile)?;

    state.users.update_profile(auth.user_id, &request).await?;

    Ok(Json(Envelope::success_empty()))
}
