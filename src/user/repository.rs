use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::UserModel;
use crate::shared::AppError;

/// Trait for user store operations
#[async_trait]
pub trait UserRepository {
    /// Looks up a user by email; with duplicate emails the earliest row wins
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError>;
    /// Literal equality match on both columns. Login is defined as an exact
    /// credential comparison at the store layer, not a hash verification.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserModel>, AppError>;
    /// Inserts a new user and returns the store-assigned id
    async fn insert_user(&self, email: &str, password: &str) -> Result<i64, AppError>;
}

/// In-memory implementation of UserRepository for development and testing
///
/// Data is stored in memory and lost when the application restarts. Ids are
/// assigned from a monotonically increasing counter, mirroring a serial
/// column.
pub struct InMemoryUserRepository {
    inner: Mutex<InMemoryUsers>,
}

struct InMemoryUsers {
    users: Vec<UserModel>,
    next_id: i64,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(InMemoryUsers {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Returns the current number of stored users
    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        let inner = self.inner.lock().unwrap();
        let user = inner.users.iter().find(|user| user.email == email).cloned();

        match &user {
            Some(user) => debug!(user_id = user.id, "User found in memory"),
            None => debug!("User not found in memory"),
        }

        Ok(user)
    }

    #[instrument(skip(self, password))]
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserModel>, AppError> {
        let inner = self.inner.lock().unwrap();
        let user = inner
            .users
            .iter()
            .find(|user| user.email == email && user.password == password)
            .cloned();

        match &user {
            Some(user) => debug!(user_id = user.id, "Credentials matched in memory"),
            None => debug!("No matching credentials in memory"),
        }

        Ok(user)
    }

    #[instrument(skip(self, password))]
    async fn insert_user(&self, email: &str, password: &str) -> Result<i64, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;

        inner.users.push(UserModel {
            id,
            email: email.to_string(),
            password: password.to_string(),
        });

        debug!(user_id = id, "User inserted in memory");
        Ok(id)
    }
}

/// PostgreSQL implementation of the user store
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        debug!("Fetching user by email from database");

        let row = sqlx::query("SELECT id, email, password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch user by email");
                AppError::Store(e.to_string())
            })?;

        Ok(row.map(|row| UserModel {
            id: row.get("id"),
            email: row.get("email"),
            password: row.get("password"),
        }))
    }

    #[instrument(skip(self, password))]
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserModel>, AppError> {
        debug!("Matching credentials against database");

        // Equality predicate on both columns, per the login contract
        let row =
            sqlx::query("SELECT id, email, password FROM users WHERE email = $1 AND password = $2")
                .bind(email)
                .bind(password)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to match credentials");
                    AppError::Store(e.to_string())
                })?;

        Ok(row.map(|row| UserModel {
            id: row.get("id"),
            email: row.get("email"),
            password: row.get("password"),
        }))
    }

    #[instrument(skip(self, password))]
    async fn insert_user(&self, email: &str, password: &str) -> Result<i64, AppError> {
        debug!("Inserting user into database");

        let row = sqlx::query("INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id")
            .bind(email)
            .bind(password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to insert user");
                AppError::Store(e.to_string())
            })?;

        let id = row.get("id");
        debug!(user_id = id, "User inserted into database");
        Ok(id)
    }
}
