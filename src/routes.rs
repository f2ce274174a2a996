use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{auth, health, scores, shared::AppState, users};

/// Assembles public and authenticated routes over the shared state
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let public = Router::new()
        .route("/", get(|| async { "Scoreboard API" }))
        .route("/health", get(health::health))
        .route("/health/readiness", get(health::readiness))
        .route("/health/liveness", get(health::liveness))
        .route("/users", post(users::register_user))
        .route(
            "/games/leaderboard/:game_name",
            get(scores::get_leaderboard),
        );

    let protected = Router::new()
        .route("/users/:id", get(users::get_user))
        .route("/games/scores", post(scores::submit_score))
        .route("/games/history/:game_name", get(scores::get_user_history))
        .route("/games/rank/:game_name", get(scores::get_user_rank))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::jwt_auth,
        ));

    public
        .merge(protected)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::list(allowed))
}
