//! Pure reductions behind the leaderboard, rank and history views.
//!
//! Every query recomputes from the records it is handed; nothing here keeps
//! state between calls.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::models::{ScoreRecord, UserHistorySummary};

/// A player's best score for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerBest {
    pub user_id: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

/// Reduces records to one best entry per user, sorted by score descending.
///
/// Single left-to-right scan: a later record replaces the kept one only when
/// its score is strictly greater, so equal scores keep the first-seen record.
/// Users keep their first-seen order, and the sort is stable, so tied users
/// get distinct sequential positions in scan order.
pub fn best_per_user(records: &[ScoreRecord]) -> Vec<PlayerBest> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut bests: Vec<PlayerBest> = Vec::new();

    for record in records {
        match slots.get(record.user_id.as_str()) {
            Some(&slot) => {
                let best = &mut bests[slot];
                if record.score > best.score {
                    best.score = record.score;
                    best.created_at = record.created_at;
                }
            }
            None => {
                slots.insert(record.user_id.as_str(), bests.len());
                bests.push(PlayerBest {
                    user_id: record.user_id.clone(),
                    score: record.score,
                    created_at: record.created_at,
                });
            }
        }
    }

    bests.sort_by(|a, b| b.score.cmp(&a.score));
    bests
}

/// 1-based position of `user_id` in a ranking produced by `best_per_user`
pub fn rank_of(ranking: &[PlayerBest], user_id: &str) -> Option<u32> {
    ranking
        .iter()
        .position(|best| best.user_id == user_id)
        .map(|index| index as u32 + 1)
}

/// Builds the history summary over an already-windowed, newest-first slice
pub fn summarize_history(recent_scores: Vec<ScoreRecord>) -> UserHistorySummary {
    let total_games = recent_scores.len() as u32;
    let best_score = recent_scores.iter().map(|s| s.score).max().unwrap_or(0);
    let sum: i64 = recent_scores.iter().map(|s| i64::from(s.score)).sum();

    UserHistorySummary {
        best_score,
        total_games,
        average_score: rounded_average(sum, total_games),
        recent_scores,
    }
}

/// Integer mean rounded half up; 0 for an empty set
pub fn rounded_average(sum: i64, count: u32) -> i32 {
    if count == 0 {
        return 0;
    }
    let count = i64::from(count);
    ((2 * sum + count) / (2 * count)) as i32
}
