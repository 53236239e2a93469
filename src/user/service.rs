use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    repository::UserRepository,
    types::{CredentialsRequest, DisconnectResponse, LoginResponse, RegisterResponse},
};
use crate::session::{registry::SessionRegistry, TokenConfig};
use crate::shared::AppError;

/// Service for handling account business logic
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    registry: Arc<dyn SessionRegistry + Send + Sync>,
    token_config: TokenConfig,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        registry: Arc<dyn SessionRegistry + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            repository,
            registry,
            token_config,
        }
    }

    /// Registers a new account unless the email is already taken.
    ///
    /// The existence check and the insert are two independent statements with
    /// no transaction around them; concurrent registrations for the same
    /// email can both pass the check.
    #[instrument(skip(self, request))]
    pub async fn register(
        &self,
        request: CredentialsRequest,
    ) -> Result<RegisterResponse, AppError> {
        request.validate()?;

        if self
            .repository
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            warn!(email = %request.email, "Registration rejected, email already taken");
            return Err(AppError::Conflict(
                "Already a user with that email".to_string(),
            ));
        }

        let inserted = self
            .repository
            .insert_user(&request.email, &request.password)
            .await?;

        info!(user_id = inserted, "User registered");
        Ok(RegisterResponse { inserted })
    }

    /// Logs a user in, minting a fresh api key and registering it
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: CredentialsRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = match self
            .repository
            .find_by_credentials(&request.email, &request.password)
            .await?
        {
            Some(user) => user,
            None => {
                warn!(email = %request.email, "Login rejected, no matching credentials");
                return Err(AppError::Authentication);
            }
        };

        let api_key = self.token_config.issue(user.email.clone(), user.id)?;
        self.registry.add(api_key.clone()).await?;

        info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            api_key,
            id: user.id,
            email: user.email,
        })
    }

    /// Removes an api key from the registry; each key is removable once
    #[instrument(skip(self, api_key))]
    pub async fn disconnect(&self, api_key: &str) -> Result<DisconnectResponse, AppError> {
        if self.registry.remove(api_key).await? {
            info!("Api key removed from registry");
            Ok(DisconnectResponse { removed: true })
        } else {
            warn!("Api key not present in registry");
            Err(AppError::NotFound("user not found".to_string()))
        }
    }
}
