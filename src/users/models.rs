use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_ROLE: &str = "user";

/// Database model for users table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct UserModel {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub roles: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserModel {
    /// Creates an active user with the default role and a fresh UUID
    pub fn new(email: String, first_name: Option<String>, last_name: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            email,
            first_name,
            last_name,
            roles: vec![DEFAULT_ROLE.to_string()],
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn display_name(&self) -> String {
        display_name(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            &self.email,
        )
    }
}

/// Name shown on leaderboards: "first last" when either part is set,
/// otherwise the local part of the email address.
pub fn display_name(first_name: Option<&str>, last_name: Option<&str>, email: &str) -> String {
    let first = first_name.filter(|s| !s.is_empty());
    let last = last_name.filter(|s| !s.is_empty());

    if first.is_some() || last.is_some() {
        return format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
            .trim()
            .to_string();
    }

    email.split('@').next().unwrap_or_default().to_string()
}
