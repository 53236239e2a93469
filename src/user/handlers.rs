use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::UserService,
    types::{
        CredentialsRequest, DisconnectParams, DisconnectResponse, LoginResponse, RegisterResponse,
    },
};
use crate::shared::{AppError, AppState};

fn service(state: &AppState) -> UserService {
    // Use injected dependencies from app state
    UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.session_registry),
        state.token_config.clone(),
    )
}

/// HTTP handler for registering a new user
///
/// POST /users
/// Returns the id assigned by the store
#[instrument(name = "register", skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    info!(email = %request.email, "Registering new user");

    let response = service(&state).register(request).await?;

    info!(user_id = response.inserted, "User registered successfully");

    Ok(Json(response))
}

/// HTTP handler for logging a user in
///
/// POST /users/login
/// Returns a signed api key plus the user's id and email
#[instrument(name = "login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    info!(email = %request.email, "Logging user in");

    let response = service(&state).login(request).await?;

    info!(user_id = response.id, "User logged in successfully");

    Ok(Json(response))
}

/// HTTP handler for invalidating an api key
///
/// GET /users/disconnect?apiKey=...
/// Removes the key from the session registry by raw string match
#[instrument(name = "disconnect", skip(state, params))]
pub async fn disconnect(
    State(state): State<AppState>,
    Query(params): Query<DisconnectParams>,
) -> Result<Json<DisconnectResponse>, AppError> {
    info!("Disconnecting user");

    let response = service(&state).disconnect(&params.api_key).await?;

    info!("User disconnected successfully");

    Ok(Json(response))
}
