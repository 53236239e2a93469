use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use userbase::session::{InMemorySessionRegistry, TokenConfig};
use userbase::shared::AppState;
use userbase::user;
use userbase::user::repository::InMemoryUserRepository;

pub const TEST_SECRET: &str = "integration-test-secret";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub app: Router,
    pub registry: Arc<InMemorySessionRegistry>,
    pub token_config: TokenConfig,
}

impl TestApp {
    /// Builds the full application router over in-memory stores
    pub fn new() -> Self {
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let registry = Arc::new(InMemorySessionRegistry::new());
        let token_config = TokenConfig::new(TEST_SECRET);

        let app_state = AppState::new(
            user_repository,
            registry.clone(),
            token_config.clone(),
        );

        let app = Router::new()
            .route("/users", post(user::register))
            .route("/users/login", post(user::login))
            .route("/users/disconnect", get(user::disconnect))
            .with_state(app_state);

        Self {
            app,
            registry,
            token_config,
        }
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Registers a user and returns the inserted id
    pub async fn register(&self, email: &str, password: &str) -> i64 {
        let (status, body) = self
            .post_json(
                "/users",
                serde_json::json!({"email": email, "password": password}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "registration failed: {body}");
        body["inserted"].as_i64().unwrap()
    }

    /// Logs a user in and returns the issued api key
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post_json(
                "/users/login",
                serde_json::json!({"email": email, "password": password}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["apiKey"].as_str().unwrap().to_string()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
