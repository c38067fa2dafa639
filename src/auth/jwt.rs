//! Token pair issuance and validation.

use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token lifetime in seconds (15 minutes).
pub const ACCESS_TTL_SECS: i64 = 900;
/// Refresh token lifetime in seconds (7 days).
pub const REFRESH_TTL_SECS: i64 = 604_800;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// The value returned on successful authentication.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
}

impl TokenSigner {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Sign an access/refresh pair for the subject. Both tokens carry the same
    /// `{sub, email}` payload under one secret; only the expiry differs.
    pub fn issue_pair(&self, user_id: Uuid, email: &str) -> AppResult<TokenPair> {
        let access_token = self.sign(user_id, email, ACCESS_TTL_SECS)?;
        let refresh_token = self.sign(user_id, email, REFRESH_TTL_SECS)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn sign(&self, user_id: Uuid, email: &str, ttl_secs: i64) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Jwt(e.to_string()))?;
        Ok(token)
    }

    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AppError::Jwt(e.to_string()))?;
        Ok(data.claims)
    }
}
