use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use scoreboard::{
    auth::TokenConfig,
    build_router,
    scores::{catalog::GameCatalog, InMemoryScoreStore},
    users::InMemoryUserRepository,
    AppState,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct RegisteredUser {
    pub id: String,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryScoreStore::new()),
            GameCatalog::default(),
            TokenConfig::new("integration-secret".to_string(), 1),
            "test".to_string(),
        );
        let router = build_router(state.clone(), &["http://localhost:3000".to_string()]);

        Self { router, state }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn register(&self, email: &str, first_name: Option<&str>) -> RegisteredUser {
        let response = self
            .send(json_request(
                "POST",
                "/users",
                None,
                json!({ "email": email, "firstName": first_name }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = body_json(response).await;
        RegisteredUser {
            id: body["user"]["id"].as_str().unwrap().to_string(),
            token: body["accessToken"].as_str().unwrap().to_string(),
        }
    }

    pub async fn submit(&self, user: &RegisteredUser, game: &str, score: i64) -> Response {
        self.send(json_request(
            "POST",
            "/games/scores",
            Some(&user.token),
            json!({ "gameName": game, "score": score, "duration": 30 }),
        ))
        .await
    }
}

// ============================================================================
// Request / Response Helpers
// ============================================================================

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
