use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the users table
///
/// Rows are created by registration and never updated or deleted. Email
/// uniqueness is intended but enforced only by the registration pre-check,
/// not by a column constraint.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub password: String, // Stored as provided; login compares it literally
}
