pub mod catalog;
pub mod handlers;
pub mod models;
pub mod ranking;
pub mod repository;
pub mod service;
pub mod types;

mod errors;

pub use errors::ScoreError;
pub use handlers::{get_leaderboard, get_user_history, get_user_rank, submit_score};
pub use models::*;
pub use repository::{InMemoryScoreStore, PostgresScoreStore, ScoreStore};
pub use service::ScoreService;

/// Number of most recent plays a user history covers
pub const HISTORY_WINDOW: u32 = 50;

/// Leaderboard size when the caller gives no limit
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;
