use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{models::UserModel, repository::UserRepository, types::RegisterUserRequest, UserError};

/// Service for handling user business logic
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new user; emails are stored lower-cased and must be unique
    #[instrument(skip(self, request))]
    pub async fn register_user(&self, request: RegisterUserRequest) -> Result<UserModel, UserError> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(UserError::Validation(
                "email must be a valid address".to_string(),
            ));
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "Registration rejected, email already in use");
            return Err(UserError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let user = UserModel::new(
            email,
            normalize_name(request.first_name),
            normalize_name(request.last_name),
        );
        self.repository.create_user(&user).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: &str) -> Result<UserModel, UserError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| UserError::NotFound(user_id.to_string()))
    }
}

fn normalize_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
