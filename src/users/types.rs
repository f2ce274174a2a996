use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::UserModel;

/// Request payload for registering a new user
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Public view of a user
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: String,
    pub roles: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        let display_name = user.display_name();
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            display_name,
            roles: user.roles,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Response for user registration: the user plus a bearer token
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    pub user: UserResponse,
    pub access_token: String,
}
