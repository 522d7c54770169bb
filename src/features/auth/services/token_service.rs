use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::MSG_INVALID_TOKEN;

/// Claims embedded in a session token.
///
/// The identity sits under `user` so clients can decode the token and read
/// `user.role` / `user.name` without a round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    user: AuthenticatedUser,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not valid: {0}")]
    Invalid(String),

    #[error("token has expired")]
    Expired,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        tracing::debug!("Rejected session token: {}", err);
        match err {
            TokenError::Expired => AppError::Unauthorized("Token has expired".to_string()),
            TokenError::Invalid(_) => AppError::Unauthorized(MSG_INVALID_TOKEN.to_string()),
        }
    }
}

/// Issues and verifies HS256 session tokens. Stateless: the only input besides
/// the token itself is the process-wide signing secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    leeway: u64,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration, leeway: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            leeway: leeway.as_secs(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl, config.jwt_leeway)
    }

    /// Sign a token for `user` expiring after the configured TTL
    pub fn issue(&self, user: &AuthenticatedUser) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            user: user.clone(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign session token: {}", e);
            AppError::Internal(format!("Failed to sign session token: {}", e))
        })
    }

    /// Check signature and expiry, returning the embedded identity
    pub fn verify(&self, token: &str) -> std::result::Result<AuthenticatedUser, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        Ok(data.claims.user)
    }
}
