use thiserror::Error;

use crate::play::PlayError;
use crate::users::UserError;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Game session error: {0}")]
    Session(#[from] PlayError),
}

impl From<sqlx::Error> for ScoreError {
    fn from(err: sqlx::Error) -> Self {
        ScoreError::Store(err.to_string())
    }
}

impl From<UserError> for ScoreError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(msg) => ScoreError::NotFound(msg),
            other => ScoreError::Store(other.to_string()),
        }
    }
}
