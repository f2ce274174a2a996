use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{
    models::{NewScore, ScoreRecord},
    ScoreError,
};

/// Persistence collaborator for score records. Records are append-only.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Stores a new record, assigning its id and creation time
    async fn insert_score(&self, score: &NewScore) -> Result<ScoreRecord, ScoreError>;

    /// Every record of a game, ordered by score descending, then oldest first
    async fn scores_for_game(&self, game_id: &str) -> Result<Vec<ScoreRecord>, ScoreError>;

    /// Up to `limit` of a user's records for a game, newest first
    async fn recent_scores_for_user(
        &self,
        user_id: &str,
        game_id: &str,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, ScoreError>;

    async fn best_score_for_user(
        &self,
        user_id: &str,
        game_id: &str,
    ) -> Result<Option<ScoreRecord>, ScoreError>;

    /// Distinct users with at least one record for the game
    async fn count_players(&self, game_id: &str) -> Result<u64, ScoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryScoreStore {
    records: Arc<RwLock<Vec<ScoreRecord>>>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    #[instrument(skip(self, score), fields(user_id = %score.user_id, game_id = %score.game_id))]
    async fn insert_score(&self, score: &NewScore) -> Result<ScoreRecord, ScoreError> {
        let record = ScoreRecord {
            id: Uuid::new_v4().to_string(),
            user_id: score.user_id.clone(),
            game_id: score.game_id.clone(),
            score: score.score,
            duration: score.duration,
            created_at: Utc::now(),
        };

        self.records.write().await.push(record.clone());
        debug!(score_id = %record.id, "Score stored in memory");

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn scores_for_game(&self, game_id: &str) -> Result<Vec<ScoreRecord>, ScoreError> {
        let records = self.records.read().await;
        let mut scores: Vec<ScoreRecord> = records
            .iter()
            .filter(|r| r.game_id == game_id)
            .cloned()
            .collect();

        // Stable: insertion order breaks exact ties
        scores.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(scores)
    }

    #[instrument(skip(self))]
    async fn recent_scores_for_user(
        &self,
        user_id: &str,
        game_id: &str,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, ScoreError> {
        let records = self.records.read().await;
        let mut scores: Vec<ScoreRecord> = records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id && r.game_id == game_id)
            .cloned()
            .collect();

        // Reverse insertion order first so same-instant records list the latest first
        scores.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        scores.truncate(limit as usize);
        Ok(scores)
    }

    #[instrument(skip(self))]
    async fn best_score_for_user(
        &self,
        user_id: &str,
        game_id: &str,
    ) -> Result<Option<ScoreRecord>, ScoreError> {
        let records = self.records.read().await;
        let best = records
            .iter()
            .filter(|r| r.user_id == user_id && r.game_id == game_id)
            .fold(None::<&ScoreRecord>, |best, r| match best {
                Some(b) if b.score >= r.score => Some(b),
                _ => Some(r),
            });
        Ok(best.cloned())
    }

    #[instrument(skip(self))]
    async fn count_players(&self, game_id: &str) -> Result<u64, ScoreError> {
        let records = self.records.read().await;
        let mut players: Vec<&str> = records
            .iter()
            .filter(|r| r.game_id == game_id)
            .map(|r| r.user_id.as_str())
            .collect();
        players.sort_unstable();
        players.dedup();
        Ok(players.len() as u64)
    }
}

/// PostgreSQL implementation of the score store
pub struct PostgresScoreStore {
    pool: PgPool,
}

impl PostgresScoreStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SCORE_COLUMNS: &str = "id, user_id, game_id, score, duration, created_at";

// `seq` follows insertion order, matching the in-memory store on timestamp ties
const GAME_ORDER: &str = "ORDER BY score DESC, created_at ASC, seq ASC";
const RECENT_ORDER: &str = "ORDER BY created_at DESC, seq DESC";

#[async_trait]
impl ScoreStore for PostgresScoreStore {
    #[instrument(skip(self, score), fields(user_id = %score.user_id, game_id = %score.game_id))]
    async fn insert_score(&self, score: &NewScore) -> Result<ScoreRecord, ScoreError> {
        let query = format!(
            "INSERT INTO game_scores (id, user_id, game_id, score, duration, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {SCORE_COLUMNS}"
        );

        let record = sqlx::query_as::<_, ScoreRecord>(&query)
            .bind(Uuid::new_v4().to_string())
            .bind(&score.user_id)
            .bind(&score.game_id)
            .bind(score.score)
            .bind(score.duration)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to insert score");
                ScoreError::from(e)
            })?;

        debug!(score_id = %record.id, "Score stored in database");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn scores_for_game(&self, game_id: &str) -> Result<Vec<ScoreRecord>, ScoreError> {
        let query = format!(
            "SELECT {SCORE_COLUMNS} FROM game_scores WHERE game_id = $1 {GAME_ORDER}"
        );

        let records = sqlx::query_as::<_, ScoreRecord>(&query)
            .bind(game_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, game_id = %game_id, "Failed to fetch game scores");
                ScoreError::from(e)
            })?;

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn recent_scores_for_user(
        &self,
        user_id: &str,
        game_id: &str,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, ScoreError> {
        let query = format!(
            "SELECT {SCORE_COLUMNS} FROM game_scores WHERE user_id = $1 AND game_id = $2 \
             {RECENT_ORDER} LIMIT $3"
        );

        let records = sqlx::query_as::<_, ScoreRecord>(&query)
            .bind(user_id)
            .bind(game_id)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn best_score_for_user(
        &self,
        user_id: &str,
        game_id: &str,
    ) -> Result<Option<ScoreRecord>, ScoreError> {
        let query = format!(
            "SELECT {SCORE_COLUMNS} FROM game_scores WHERE user_id = $1 AND game_id = $2 \
             {GAME_ORDER} LIMIT 1"
        );

        let record = sqlx::query_as::<_, ScoreRecord>(&query)
            .bind(user_id)
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn count_players(&self, game_id: &str) -> Result<u64, ScoreError> {
        let row = sqlx::query(
            "SELECT COUNT(DISTINCT user_id) AS players FROM game_scores WHERE game_id = $1",
        )
        .bind(game_id)
        .fetch_one(&self.pool)
        .await?;

        let players: i64 = row.get("players");
        Ok(players as u64)
    }
}
