use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::session::{Claims, Identity};
use crate::models::user::Role;

/// Issues and verifies HS256 session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Creates a new `TokenService`.
    ///
    /// # Arguments
    ///
    /// * `secret` - The HMAC signing secret.
    /// * `ttl` - How long issued tokens remain valid.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Signs a token for the given user and role.
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))?;

        tracing::debug!("🔑 Issued {} token for user {}", role.as_str(), user_id);
        Ok(token)
    }

    /// Checks signature and expiry. Any failure yields `None`.
    pub fn verify(&self, token: &str) -> Option<Identity> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(Identity::from(&data.claims)),
            Err(e) => {
                tracing::debug!("Token rejected: {}", e);
                None
            }
        }
    }
}
