use std::sync::Arc;

use scoreboard::{
    auth::TokenConfig,
    build_router, db,
    scores::{catalog::GameCatalog, InMemoryScoreStore, PostgresScoreStore, ScoreStore},
    users::{InMemoryUserRepository, PostgresUserRepository, UserRepository},
    AppConfig, AppState,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoreboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting scoreboard server");

    let config = AppConfig::from_env();

    // PostgreSQL when DATABASE_URL is set, otherwise in-memory stores
    let (user_repository, score_store): (Arc<dyn UserRepository>, Arc<dyn ScoreStore>) =
        match &config.database_url {
            Some(database_url) => {
                let pool = db::connect(database_url)
                    .await
                    .expect("Failed to connect to database");
                info!("Using PostgreSQL stores");
                let users: Arc<dyn UserRepository> =
                    Arc::new(PostgresUserRepository::new(pool.clone()));
                let scores: Arc<dyn ScoreStore> = Arc::new(PostgresScoreStore::new(pool));
                (users, scores)
            }
            None => {
                info!("DATABASE_URL not set, using in-memory stores");
                let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
                let scores: Arc<dyn ScoreStore> = Arc::new(InMemoryScoreStore::new());
                (users, scores)
            }
        };

    let app_state = AppState::new(
        user_repository,
        score_store,
        GameCatalog::new(config.max_game_duration_secs),
        TokenConfig::new(config.jwt_secret.clone(), config.jwt_expiration_hours),
        config.environment.clone(),
    );

    let app = build_router(app_state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap();
    info!(port = config.port, environment = %config.environment, "Server running");
    axum::serve(listener, app).await.unwrap();
}
