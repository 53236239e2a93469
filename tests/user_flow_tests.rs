use axum::http::StatusCode;
use serde_json::json;

mod utils;

use utils::TestApp;

#[tokio::test]
async fn test_register_login_disconnect_round_trip() {
    let app = TestApp::new();

    // Register
    let (status, body) = app
        .post_json("/users", json!({"email": "a@x.com", "password": "p"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let inserted = body["inserted"].as_i64().unwrap();

    // Login with the same credentials
    let (status, body) = app
        .post_json("/users/login", json!({"email": "a@x.com", "password": "p"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["id"].as_i64().unwrap(), inserted);
    let api_key = body["apiKey"].as_str().unwrap().to_string();

    // Disconnect with the issued key
    let (status, body) = app.get(&format!("/users/disconnect?apiKey={api_key}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"removed": true}));

    // A second disconnect with the same key fails
    let (status, body) = app.get(&format!("/users/disconnect?apiKey={api_key}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "user not found"}));
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let app = TestApp::new();
    app.register("a@x.com", "p").await;

    let (status, body) = app
        .post_json("/users", json!({"email": "a@x.com", "password": "other"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Already a user with that email"}));
    // The conflicting registration did not create a session or user visible
    // to login under the new password
    let (status, _) = app
        .post_json("/users/login", json!({"email": "a@x.com", "password": "other"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_reports_all_missing_fields() {
    let app = TestApp::new();

    let (status, body) = app.post_json("/users", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": ["no email in body", "no password in body"]})
    );
}

#[tokio::test]
async fn test_login_validation_and_authentication_are_distinct() {
    let app = TestApp::new();
    app.register("a@x.com", "p").await;

    // Missing field: 400 with a message array
    let (status, body) = app
        .post_json("/users/login", json!({"email": "a@x.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": ["no password in body"]}));

    // Wrong credentials: 401 with a single message
    let (status, body) = app
        .post_json("/users/login", json!({"email": "a@x.com", "password": "nope"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "invalid email or password"}));
}

#[tokio::test]
async fn test_issued_api_key_decodes_to_matched_record() {
    let app = TestApp::new();
    let inserted = app.register("a@x.com", "p").await;

    let api_key = app.login("a@x.com", "p").await;

    let claims = app.token_config.decode(&api_key).unwrap();
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.id, inserted);
}

#[tokio::test]
async fn test_double_login_yields_two_independent_keys() {
    let app = TestApp::new();
    app.register("a@x.com", "p").await;

    let first = app.login("a@x.com", "p").await;
    let second = app.login("a@x.com", "p").await;

    assert_ne!(first, second);
    assert_eq!(app.registry.active_count(), 2);

    // Both keys are independently valid for disconnect
    let (status, _) = app.get(&format!("/users/disconnect?apiKey={second}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get(&format!("/users/disconnect?apiKey={first}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.registry.active_count(), 0);
}

#[tokio::test]
async fn test_disconnect_without_api_key_parameter() {
    let app = TestApp::new();

    let (status, body) = app.get("/users/disconnect").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "user not found"}));
}

#[tokio::test]
async fn test_disconnect_ignores_token_structure() {
    let app = TestApp::new();

    // Removal is by raw string match; a syntactically valid but never-issued
    // key is simply not found
    let stray = app.token_config.issue("ghost@x.com".to_string(), 99).unwrap();
    let (status, body) = app.get(&format!("/users/disconnect?apiKey={stray}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "user not found"}));
}

#[tokio::test]
async fn test_users_are_isolated_between_accounts() {
    let app = TestApp::new();
    let first = app.register("a@x.com", "p").await;
    let second = app.register("b@x.com", "q").await;
    assert_ne!(first, second);

    // Each account logs in only with its own password
    let (status, _) = app
        .post_json("/users/login", json!({"email": "b@x.com", "password": "p"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let key = app.login("b@x.com", "q").await;
    let claims = app.token_config.decode(&key).unwrap();
    assert_eq!(claims.id, second);
}
