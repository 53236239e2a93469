use serde::{Deserialize, Serialize};

/// Claims embedded in a signed api key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiKeyClaims {
    pub email: String,
    pub id: i64,
    pub iat: i64,    // Issued at timestamp (standard JWT claim)
    pub jti: String, // Unique token id, keeps repeated logins distinct
}
