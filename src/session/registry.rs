use async_trait::async_trait;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::shared::AppError;

/// Trait for the process-wide registry of active api keys
///
/// A registered key was minted by a successful login and has not been removed
/// yet. Logging in twice registers two independent entries, each removable
/// exactly once. Keys never expire on their own.
#[async_trait]
pub trait SessionRegistry {
    async fn add(&self, api_key: String) -> Result<(), AppError>;
    /// Removes the first entry equal to `api_key`, returning whether one was found
    async fn remove(&self, api_key: &str) -> Result<bool, AppError>;
    async fn contains(&self, api_key: &str) -> Result<bool, AppError>;
}

/// In-memory implementation of SessionRegistry
///
/// Keys are held in insertion order in an unbounded list. Duplicates are
/// retained and removal takes out the first match only. All state is lost
/// when the process restarts.
pub struct InMemorySessionRegistry {
    api_keys: Mutex<Vec<String>>,
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        Self {
            api_keys: Mutex::new(Vec::new()),
        }
    }

    /// Returns the current number of registered keys
    pub fn active_count(&self) -> usize {
        self.api_keys.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    #[instrument(skip(self, api_key))]
    async fn add(&self, api_key: String) -> Result<(), AppError> {
        let mut api_keys = self.api_keys.lock().unwrap();
        api_keys.push(api_key);

        debug!(active_keys = api_keys.len(), "Api key registered");
        Ok(())
    }

    #[instrument(skip(self, api_key))]
    async fn remove(&self, api_key: &str) -> Result<bool, AppError> {
        let mut api_keys = self.api_keys.lock().unwrap();
        match api_keys.iter().position(|key| key == api_key) {
            Some(index) => {
                api_keys.remove(index);
                debug!(active_keys = api_keys.len(), "Api key removed");
                Ok(true)
            }
            None => {
                warn!("Api key not found in registry");
                Ok(false)
            }
        }
    }

    #[instrument(skip(self, api_key))]
    async fn contains(&self, api_key: &str) -> Result<bool, AppError> {
        let api_keys = self.api_keys.lock().unwrap();
        Ok(api_keys.iter().any(|key| key == api_key))
    }
}
