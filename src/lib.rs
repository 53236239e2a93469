// Library crate for the user account server
// This file exposes the public API for integration tests

pub mod session;
pub mod shared;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use session::{ApiKeyClaims, InMemorySessionRegistry, SessionRegistry, TokenConfig};
pub use shared::{AppError, AppState};
pub use user::{CredentialsRequest, DisconnectResponse, LoginResponse, RegisterResponse};
