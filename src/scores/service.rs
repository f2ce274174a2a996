use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    catalog::GameCatalog,
    models::{Leaderboard, LeaderboardEntry, NewScore, ScoreRecord, UserHistorySummary},
    ranking::{best_per_user, rank_of, summarize_history, PlayerBest},
    repository::ScoreStore,
    ScoreError, DEFAULT_LEADERBOARD_LIMIT, HISTORY_WINDOW,
};
use crate::play::GameSession;
use crate::users::repository::UserRepository;

/// Score submission and the ranking views derived from stored scores.
/// Holds no state of its own; every query re-reads the store.
pub struct ScoreService {
    store: Arc<dyn ScoreStore>,
    users: Arc<dyn UserRepository>,
    catalog: GameCatalog,
}

impl ScoreService {
    pub fn new(
        store: Arc<dyn ScoreStore>,
        users: Arc<dyn UserRepository>,
        catalog: GameCatalog,
    ) -> Self {
        Self {
            store,
            users,
            catalog,
        }
    }

    /// Validates and appends one play. Duplicate submissions are distinct plays.
    #[instrument(skip(self))]
    pub async fn submit_score(
        &self,
        user_id: &str,
        game_id: &str,
        score: i64,
        duration: i64,
    ) -> Result<ScoreRecord, ScoreError> {
        let new_score = self.validate(user_id, game_id, score, duration)?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ScoreError::NotFound(format!("user {user_id}")));
        }

        let record = self.store.insert_score(&new_score).await?;
        info!(score_id = %record.id, score = record.score, "Score submitted");
        Ok(record)
    }

    /// Awaits a play session and submits its outcome for `user_id`
    #[instrument(skip(self, session), fields(game_id = %session.game_id()))]
    pub async fn record_session(
        &self,
        user_id: &str,
        session: GameSession,
    ) -> Result<ScoreRecord, ScoreError> {
        let outcome = session.outcome().await?;
        self.submit_score(user_id, &outcome.game_id, outcome.score, outcome.duration_secs)
            .await
    }

    /// Top players by best score. Ties take distinct sequential ranks.
    #[instrument(skip(self))]
    pub async fn get_leaderboard(
        &self,
        game_id: &str,
        limit: Option<u32>,
    ) -> Result<Leaderboard, ScoreError> {
        let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
        if limit == 0 {
            return Err(ScoreError::Validation(
                "limit must be a positive integer".to_string(),
            ));
        }

        let records = self.store.scores_for_game(game_id).await?;
        let mut bests = best_per_user(&records);
        bests.truncate(limit as usize);

        let total_players = self.store.count_players(game_id).await?;
        let names = self.display_names(&bests).await?;

        let entries = bests
            .into_iter()
            .enumerate()
            .map(|(index, best)| LeaderboardEntry {
                rank: index as u32 + 1,
                display_name: names
                    .get(&best.user_id)
                    .cloned()
                    .unwrap_or_else(|| best.user_id.clone()),
                user_id: best.user_id,
                score: best.score,
                created_at: best.created_at,
            })
            .collect::<Vec<_>>();

        debug!(
            entries = entries.len(),
            total_players,
            scanned = records.len(),
            "Leaderboard computed"
        );

        Ok(Leaderboard {
            game_id: game_id.to_string(),
            entries,
            total_players,
        })
    }

    /// Summary over the user's most recent `HISTORY_WINDOW` plays
    #[instrument(skip(self))]
    pub async fn get_user_history(
        &self,
        user_id: &str,
        game_id: &str,
    ) -> Result<UserHistorySummary, ScoreError> {
        let recent = self
            .store
            .recent_scores_for_user(user_id, game_id, HISTORY_WINDOW)
            .await?;
        Ok(summarize_history(recent))
    }

    /// 1-based position among every player's best score; `None` when unranked
    #[instrument(skip(self))]
    pub async fn get_user_rank(
        &self,
        user_id: &str,
        game_id: &str,
    ) -> Result<Option<u32>, ScoreError> {
        if self
            .store
            .best_score_for_user(user_id, game_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let records = self.store.scores_for_game(game_id).await?;
        let ranking = best_per_user(&records);
        Ok(rank_of(&ranking, user_id))
    }

    fn validate(
        &self,
        user_id: &str,
        game_id: &str,
        score: i64,
        duration: i64,
    ) -> Result<NewScore, ScoreError> {
        if game_id.trim().is_empty() {
            return Err(ScoreError::Validation("game name is required".to_string()));
        }

        let score = i32::try_from(score)
            .ok()
            .filter(|s| *s >= 0)
            .ok_or_else(|| {
                ScoreError::Validation("score must be a non-negative integer".to_string())
            })?;

        let max_duration = self.catalog.max_duration(game_id);
        let duration = i32::try_from(duration)
            .ok()
            .filter(|d| (1..=max_duration).contains(d))
            .ok_or_else(|| {
                ScoreError::Validation(format!(
                    "duration must be between 1 and {max_duration} seconds"
                ))
            })?;

        Ok(NewScore {
            user_id: user_id.to_string(),
            game_id: game_id.to_string(),
            score,
            duration,
        })
    }

    async fn display_names(
        &self,
        bests: &[PlayerBest],
    ) -> Result<HashMap<String, String>, ScoreError> {
        let ids: Vec<String> = bests.iter().map(|b| b.user_id.clone()).collect();
        let users = self.users.find_by_ids(&ids).await?;

        Ok(users
            .into_iter()
            .map(|user| {
                let name = user.display_name();
                (user.id, name)
            })
            .collect())
    }
}
