// Public API - what other modules can use
pub use handlers::{disconnect, login, register};
pub use types::{
    CredentialsRequest, DisconnectParams, DisconnectResponse, LoginResponse, RegisterResponse,
};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
mod types;
