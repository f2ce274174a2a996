use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::Leaderboard,
    service::ScoreService,
    types::{
        LeaderboardQuery, RankResponse, SubmitScoreRequest, SubmitScoreResponse,
        UserHistoryResponse,
    },
};
use crate::auth::AuthUser;
use crate::shared::{AppError, AppJson, AppQuery, AppState};

fn score_service(state: &AppState) -> ScoreService {
    ScoreService::new(
        Arc::clone(&state.score_store),
        Arc::clone(&state.user_repository),
        state.game_catalog.clone(),
    )
}

/// HTTP handler for submitting a score
///
/// POST /games/scores (authenticated)
/// Returns the stored record with the caller's updated rank
#[instrument(name = "submit_score", skip(state, user, request), fields(user_id = %user.id))]
pub async fn submit_score(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppJson(request): AppJson<SubmitScoreRequest>,
) -> Result<(StatusCode, Json<SubmitScoreResponse>), AppError> {
    let service = score_service(&state);
    let record = service
        .submit_score(&user.id, &request.game_name, request.score, request.duration)
        .await?;
    let rank = service.get_user_rank(&user.id, &request.game_name).await?;

    info!(score_id = %record.id, ?rank, "Score accepted");

    Ok((StatusCode::CREATED, Json(SubmitScoreResponse { record, rank })))
}

/// HTTP handler for a game's leaderboard
///
/// GET /games/leaderboard/:game_name?limit=N (public)
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(game_name): Path<String>,
    AppQuery(query): AppQuery<LeaderboardQuery>,
) -> Result<Json<Leaderboard>, AppError> {
    let leaderboard = score_service(&state)
        .get_leaderboard(&game_name, query.limit)
        .await?;
    Ok(Json(leaderboard))
}

/// HTTP handler for the caller's history in a game
///
/// GET /games/history/:game_name (authenticated)
#[instrument(name = "get_user_history", skip(state, user), fields(user_id = %user.id))]
pub async fn get_user_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(game_name): Path<String>,
) -> Result<Json<UserHistoryResponse>, AppError> {
    let service = score_service(&state);
    let history = service.get_user_history(&user.id, &game_name).await?;
    let rank = service.get_user_rank(&user.id, &game_name).await?;

    Ok(Json(UserHistoryResponse { history, rank }))
}

/// HTTP handler for the caller's rank in a game
///
/// GET /games/rank/:game_name (authenticated)
#[instrument(name = "get_user_rank", skip(state, user), fields(user_id = %user.id))]
pub async fn get_user_rank(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(game_name): Path<String>,
) -> Result<Json<RankResponse>, AppError> {
    let rank = score_service(&state)
        .get_user_rank(&user.id, &game_name)
        .await?;
    Ok(Json(RankResponse { rank }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::{NewScore, ScoreStore};
    use crate::shared::test_utils::{AppStateBuilder, FailingScoreStore};
    use crate::users::{UserModel, UserRepository};
    use axum::{
        body::Body,
        http::Request,
        routing::{get, post},
        Router,
    };
    use rstest::rstest;
    use tower::ServiceExt; // for `oneshot`

    // Handlers are mounted without the auth middleware; the extension is
    // injected directly.
    fn app(state: AppState, caller: Option<AuthUser>) -> Router {
        let router = Router::new()
            .route("/games/scores", post(submit_score))
            .route("/games/leaderboard/:game_name", get(get_leaderboard))
            .route("/games/history/:game_name", get(get_user_history))
            .route("/games/rank/:game_name", get(get_user_rank));

        match caller {
            Some(user) => router.layer(Extension(user)).with_state(state),
            None => router.with_state(state),
        }
    }

    async fn state_with_user(user: &UserModel) -> AppState {
        let state = AppStateBuilder::new().build();
        state.user_repository.create_user(user).await.unwrap();
        state
    }

    fn caller(user: &UserModel) -> AuthUser {
        AuthUser {
            id: user.id.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn submit(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/games/scores")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_submit_score_handler() {
        let user = UserModel::new("ada@example.com".to_string(), None, None);
        let state = state_with_user(&user).await;

        let response = app(state, Some(caller(&user)))
            .oneshot(submit(
                r#"{"gameName": "cherry-belly-tap", "score": 42, "duration": 30}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let submitted: SubmitScoreResponse = body_json(response).await;
        assert_eq!(submitted.record.user_id, user.id);
        assert_eq!(submitted.record.score, 42);
        assert_eq!(submitted.rank, Some(1));
    }

    #[tokio::test]
    async fn test_submit_score_handler_rejects_long_duration() {
        let user = UserModel::new("ada@example.com".to_string(), None, None);
        let state = state_with_user(&user).await;

        let response = app(state.clone(), Some(caller(&user)))
            .oneshot(submit(
                r#"{"gameName": "cherry-belly-tap", "score": 42, "duration": 301}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state
            .score_store
            .scores_for_game("cherry-belly-tap")
            .await
            .unwrap()
            .is_empty());
    }

    #[rstest]
    #[case::fractional_score(r#"{"gameName": "tap", "score": 10.5, "duration": 30}"#)]
    #[case::string_duration(r#"{"gameName": "tap", "score": 10, "duration": "long"}"#)]
    #[case::missing_game(r#"{"score": 10, "duration": 30}"#)]
    #[case::not_json("score=10")]
    #[tokio::test]
    async fn test_submit_score_handler_malformed_body(#[case] body: &'static str) {
        let user = UserModel::new("ada@example.com".to_string(), None, None);
        let state = state_with_user(&user).await;

        let response = app(state.clone(), Some(caller(&user)))
            .oneshot(submit(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: serde_json::Value = body_json(response).await;
        assert!(error["error"].is_string());
        assert!(state.score_store.scores_for_game("tap").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_score_handler_requires_caller() {
        let state = AppStateBuilder::new().build();

        let response = app(state, None)
            .oneshot(submit(r#"{"gameName": "tap", "score": 1, "duration": 1}"#))
            .await
            .unwrap();

        // Missing extension is a server-side wiring error in axum
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_leaderboard_handler_with_limit() {
        let state = AppStateBuilder::new().build();
        for (user_id, score) in [("a", 5), ("b", 9), ("c", 7)] {
            state
                .score_store
                .insert_score(&NewScore {
                    user_id: user_id.to_string(),
                    game_id: "tap".to_string(),
                    score,
                    duration: 10,
                })
                .await
                .unwrap();
        }

        let request = Request::builder()
            .uri("/games/leaderboard/tap?limit=2")
            .body(Body::empty())
            .unwrap();
        let response = app(state, None).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let board: Leaderboard = body_json(response).await;
        assert_eq!(board.total_players, 3);
        let ranked: Vec<(u32, &str, i32)> = board
            .entries
            .iter()
            .map(|e| (e.rank, e.user_id.as_str(), e.score))
            .collect();
        assert_eq!(ranked, vec![(1, "b", 9), (2, "c", 7)]);
    }

    #[tokio::test]
    async fn test_leaderboard_handler_zero_limit() {
        let request = Request::builder()
            .uri("/games/leaderboard/tap?limit=0")
            .body(Body::empty())
            .unwrap();
        let response = app(AppStateBuilder::new().build(), None)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_leaderboard_handler_non_numeric_limit() {
        let request = Request::builder()
            .uri("/games/leaderboard/tap?limit=abc")
            .body(Body::empty())
            .unwrap();
        let response = app(AppStateBuilder::new().build(), None)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: serde_json::Value = body_json(response).await;
        assert!(error["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to deserialize query string"));
    }

    #[tokio::test]
    async fn test_leaderboard_handler_store_failure() {
        let state = AppStateBuilder::new()
            .with_score_store(Arc::new(FailingScoreStore))
            .build();
        let request = Request::builder()
            .uri("/games/leaderboard/tap")
            .body(Body::empty())
            .unwrap();

        let response = app(state, None).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: serde_json::Value = body_json(response).await;
        assert!(error["error"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
    }

    #[tokio::test]
    async fn test_history_and_rank_handlers() {
        let user = UserModel::new("ada@example.com".to_string(), None, None);
        let state = state_with_user(&user).await;
        let app = app(state, Some(caller(&user)));

        let rank_request = || {
            Request::builder()
                .uri("/games/rank/tap")
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(rank_request()).await.unwrap();
        let unranked: RankResponse = body_json(response).await;
        assert_eq!(unranked, RankResponse { rank: None });

        for body in [
            r#"{"gameName": "tap", "score": 10, "duration": 5}"#,
            r#"{"gameName": "tap", "score": 30, "duration": 5}"#,
        ] {
            let response = app.clone().oneshot(submit(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app.clone().oneshot(rank_request()).await.unwrap();
        let ranked: RankResponse = body_json(response).await;
        assert_eq!(ranked.rank, Some(1));

        let history_request = Request::builder()
            .uri("/games/history/tap")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(history_request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let history: UserHistoryResponse = body_json(response).await;
        assert_eq!(history.history.best_score, 30);
        assert_eq!(history.history.total_games, 2);
        assert_eq!(history.history.average_score, 20);
        assert_eq!(history.rank, Some(1));
    }
}
