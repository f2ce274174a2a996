use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::auth::TokenConfig;
use crate::scores::{catalog::GameCatalog, repository::ScoreStore, ScoreError};
use crate::users::{repository::UserRepository, UserError};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository>,
    pub score_store: Arc<dyn ScoreStore>,
    pub game_catalog: GameCatalog,
    pub token_config: TokenConfig,
    pub environment: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        score_store: Arc<dyn ScoreStore>,
        game_catalog: GameCatalog,
        token_config: TokenConfig,
        environment: String,
    ) -> Self {
        Self {
            user_repository,
            score_store,
            game_catalog,
            token_config,
            environment,
            started_at: Instant::now(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("JWT error: {0}")]
    JwtError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::JwtError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

// Malformed bodies and query strings are client errors with the usual JSON body
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// `Json` extractor whose rejection is an [`AppError`]
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Query` extractor whose rejection is an [`AppError`]
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

impl From<ScoreError> for AppError {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::Validation(msg) => AppError::BadRequest(msg),
            ScoreError::NotFound(msg) => AppError::NotFound(msg),
            ScoreError::Store(msg) => AppError::DatabaseError(msg),
            ScoreError::Session(err) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::NotFound(msg) => AppError::NotFound(msg),
            UserError::Conflict(msg) => AppError::Conflict(msg),
            UserError::Store(msg) => AppError::DatabaseError(msg),
        }
    }
}
