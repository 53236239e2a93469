use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::session::registry::SessionRegistry;
use crate::session::TokenConfig;
use crate::user::repository::UserRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
    pub session_registry: Arc<dyn SessionRegistry + Send + Sync>,
    pub token_config: TokenConfig,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        session_registry: Arc<dyn SessionRegistry + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            user_repository,
            session_registry,
            token_config,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("{0}")]
    Conflict(String),

    #[error("invalid email or password")]
    Authentication,

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Store(String),

    #[error("token error: {0}")]
    Token(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // Validation reports every missing field in one array
            AppError::Validation(messages) => {
                (StatusCode::BAD_REQUEST, json!({ "error": messages }))
            }
            AppError::Conflict(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            AppError::Authentication => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "invalid email or password" }),
            ),
            // Unknown api keys are reported as a plain bad request, not 404
            AppError::NotFound(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            AppError::Store(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            AppError::Token(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
        };

        (status, Json(body)).into_response()
    }
}
