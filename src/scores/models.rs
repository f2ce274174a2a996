use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One play of a game. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: String,
    pub user_id: String,
    pub game_id: String,
    pub score: i32,
    pub duration: i32, // Seconds
    pub created_at: DateTime<Utc>,
}

/// Validated submission handed to the store, which assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub user_id: String,
    pub game_id: String,
    pub score: i32,
    pub duration: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub display_name: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub game_id: String,
    pub entries: Vec<LeaderboardEntry>,
    pub total_players: u64,
}

/// Summary over the most recent window of a user's plays
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHistorySummary {
    pub best_score: i32,
    pub total_games: u32,
    pub average_score: i32,
    pub recent_scores: Vec<ScoreRecord>,
}
