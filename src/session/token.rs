use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::types::ApiKeyClaims;
use crate::shared::AppError;

/// Configuration for signing and decoding api keys
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Reads the signing secret from `API_KEY_SECRET`.
    /// The secret is required configuration; startup must fail without it.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var("API_KEY_SECRET")
            .map_err(|_| AppError::Token("API_KEY_SECRET is not set".to_string()))?;

        if secret.is_empty() {
            return Err(AppError::Token("API_KEY_SECRET is empty".to_string()));
        }

        Ok(Self::new(secret))
    }

    /// Signs a new api key embedding the user's email and id
    #[instrument(skip(self, email))]
    pub fn issue(&self, email: String, id: i64) -> Result<String, AppError> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Token(e.to_string()))?
            .as_secs() as i64;

        let claims = ApiKeyClaims {
            email,
            id,
            iat,
            // Fresh per issuance so two logins with the same credentials
            // always produce distinct key strings
            jti: Uuid::new_v4().to_string(),
        };

        debug!(user_id = claims.id, "Signing api key");

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to sign api key");
            AppError::Token(e.to_string())
        })
    }

    /// Decodes an api key and returns its claims if the signature checks out
    #[instrument(skip(self, api_key))]
    pub fn decode(&self, api_key: &str) -> Result<ApiKeyClaims, AppError> {
        // Api keys carry no `exp` claim and never expire
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        decode::<ApiKeyClaims>(
            api_key,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map(|data| {
            debug!(
                email = %data.claims.email,
                user_id = data.claims.id,
                "Api key decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode api key");
            AppError::Token(e.to_string())
        })
    }
}
