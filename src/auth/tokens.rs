//! Signed, time-limited access tokens (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::models::Claims;
use crate::common::ApiError;

#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issues a token whose subject is the account email.
    pub fn issue(&self, email: &str) -> Result<String, ApiError> {
        let exp = (Utc::now() + self.ttl).timestamp().max(0) as usize;
        self.encode_claims(&Claims {
            sub: email.to_string(),
            exp,
        })
    }

    pub fn encode_claims(&self, claims: &Claims) -> Result<String, ApiError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::InternalServer(format!("jwt error: {e}")))
    }

    /// Checks signature and expiry. A missing `sub` or `exp` fails decoding.
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
    }
}
