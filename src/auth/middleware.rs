use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use super::types::AuthUser;
use crate::shared::{AppError, AppState};

/// JWT authentication middleware - validates the Authorization Bearer header,
/// checks the user still exists and is active, and adds `AuthUser` to the request.
/// Usage: .route_layer(middleware::from_fn_with_state(app_state.clone(), auth::jwt_auth))
/// Handlers can then extract Extension(user): Extension<AuthUser>.
#[instrument(skip(state, req, next), fields(uri = %req.uri()))]
pub async fn jwt_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header in request");
            AppError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    let claims = state.token_config.validate_token(token).map_err(|e| {
        warn!("JWT authentication failed: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let user = state
        .user_repository
        .find_by_id(&claims.sub)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| {
            warn!(user_id = %claims.sub, "Token subject not found or inactive");
            AppError::Unauthorized("User not found or inactive".to_string())
        })?;

    debug!(user_id = %user.id, "Authentication successful");

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
        roles: user.roles,
    });

    Ok(next.run(req).await)
}
