use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::UserService,
    types::{RegisterUserRequest, RegisterUserResponse, UserResponse},
};
use crate::shared::{AppError, AppJson, AppState};

/// HTTP handler for registering a user
///
/// POST /users
/// Returns the created user and an access token
#[instrument(name = "register_user", skip(state, request))]
pub async fn register_user(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisterUserResponse>), AppError> {
    let service = UserService::new(Arc::clone(&state.user_repository));
    let user = service.register_user(request).await?;
    let access_token = state.token_config.create_token(&user)?;

    info!(user_id = %user.id, "User created successfully");

    Ok((
        StatusCode::CREATED,
        Json(RegisterUserResponse {
            user: UserResponse::from(user),
            access_token,
        }),
    ))
}

/// HTTP handler for fetching a user
///
/// GET /users/:id (authenticated)
#[instrument(name = "get_user", skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let service = UserService::new(Arc::clone(&state.user_repository));
    let user = service.get_user(&user_id).await?;

    Ok(Json(UserResponse::from(user)))
}
