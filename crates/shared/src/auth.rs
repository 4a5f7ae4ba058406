//! Authentication payloads and JWT claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (client ID).
    pub sub: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a client.
    #[must_use]
    pub fn new(client_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: client_id,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the client ID from claims.
    #[must_use]
    pub const fn client_id(&self) -> Uuid {
        self.sub
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Client username.
    pub username: String,
    /// Client password.
    pub password: String,
}

/// Public client identity returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct ClientInfo {
    /// Client ID.
    pub id: Uuid,
    /// Client username.
    pub username: String,
    /// Client display name.
    pub name: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub token: String,
    /// Authenticated client identity.
    pub client: ClientInfo,
}
