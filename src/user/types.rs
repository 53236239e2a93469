use serde::{Deserialize, Serialize};

use crate::shared::AppError;

/// Request body shared by registration and login
///
/// Absent fields deserialize as empty strings so that a missing field and an
/// empty one validate identically.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsRequest {
    /// Checks both fields independently so every missing field is reported
    /// together in one response
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();

        if self.email.is_empty() {
            errors.push("no email in body".to_string());
        }
        if self.password.is_empty() {
            errors.push("no password in body".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Response for successful registration
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RegisterResponse {
    pub inserted: i64,
}

/// Response for successful login
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub id: i64,
    pub email: String,
}

/// Response for successful disconnect
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DisconnectResponse {
    pub removed: bool,
}

/// Query parameters for the disconnect endpoint
#[derive(Debug, Deserialize)]
pub struct DisconnectParams {
    #[serde(rename = "apiKey", default)]
    pub api_key: String,
}
