// Public API - what other modules can use
pub use registry::{InMemorySessionRegistry, SessionRegistry};
pub use token::TokenConfig;
pub use types::ApiKeyClaims;

// Internal modules
pub mod registry;
mod token;
mod types;
