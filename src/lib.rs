// Library crate for the portfolio scoreboard server
// This file exposes the public API for the binary and integration tests

pub mod auth;
pub mod config;
pub mod db;
pub mod health;
pub mod play;
pub mod routes;
pub mod scores;
pub mod shared;
pub mod users;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use play::{GameEndHandle, GameOutcome, GameSession, PlayError};
pub use routes::build_router;
pub use scores::{ScoreError, ScoreService};
pub use shared::{AppError, AppState};
