use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::config::SecurityConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, encoded as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Issues and verifies HS256 bearer tokens with a process-wide symmetric secret.
///
/// Tokens are stateless: nothing is recorded on issue, so logout cannot revoke
/// them and they stay valid until `exp`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.jwt_secret, Duration::minutes(security.jwt_expiry_minutes))
    }

    pub fn issue(&self, user_id: i64, email: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(user_id, email, Utc::now())
    }

    pub fn issue_at(&self, user_id: i64, email: &str, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let claims = Claims {
            sub: Some(user_id.to_string()),
            email: email.to_string(),
            exp: (now + self.lifetime).timestamp(),
            iat: now.timestamp(),
        };
        let token = self.encode_claims(&claims)?;

        Ok(IssuedToken {
            token,
            expires_in: self.lifetime.num_seconds(),
        })
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Check signature and expiry and return the user id from `sub`.
    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        data.claims
            .sub
            .as_deref()
            .and_then(|sub| sub.parse::<i64>().ok())
            .ok_or(AuthError::InvalidToken)
    }
}
