use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY,
    email       TEXT NOT NULL UNIQUE,
    first_name  TEXT,
    last_name   TEXT,
    roles       TEXT[] NOT NULL DEFAULT ARRAY['user'],
    is_active   BOOLEAN NOT NULL DEFAULT TRUE,
    created_at  TIMESTAMPTZ NOT NULL,
    updated_at  TIMESTAMPTZ NOT NULL
)"#;

const CREATE_GAME_SCORES: &str = r#"
CREATE TABLE IF NOT EXISTS game_scores (
    id          TEXT PRIMARY KEY,
    seq         BIGSERIAL NOT NULL,
    user_id     TEXT NOT NULL REFERENCES users (id),
    game_id     TEXT NOT NULL,
    score       INTEGER NOT NULL CHECK (score >= 0),
    duration    INTEGER NOT NULL CHECK (duration > 0),
    created_at  TIMESTAMPTZ NOT NULL
)"#;

// Tables created before `seq` existed
const ADD_GAME_SCORES_SEQ: &str =
    "ALTER TABLE game_scores ADD COLUMN IF NOT EXISTS seq BIGSERIAL NOT NULL";

const CREATE_GAME_SCORES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS game_scores_game_user_idx ON game_scores (game_id, user_id)";

pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Creates the tables the PostgreSQL stores read and write, if missing
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in [
        CREATE_USERS,
        CREATE_GAME_SCORES,
        ADD_GAME_SCORES_SEQ,
        CREATE_GAME_SCORES_INDEX,
    ] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("Database schema ready");
    Ok(())
}
