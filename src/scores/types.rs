use serde::{Deserialize, Serialize};

use super::models::{ScoreRecord, UserHistorySummary};

/// Request payload for submitting a score
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub game_name: String,
    pub score: i64,
    pub duration: i64, // Seconds
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
}

/// Stored record plus the submitter's rank after the submission
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    #[serde(flatten)]
    pub record: ScoreRecord,
    pub rank: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserHistoryResponse {
    #[serde(flatten)]
    pub history: UserHistorySummary,
    pub rank: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RankResponse {
    pub rank: Option<u32>,
}
