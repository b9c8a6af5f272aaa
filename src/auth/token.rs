use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, validity: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            exp: (now + validity).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Expired, tampered, malformed or signed with another key.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token signing key is not configured")]
    SigningKeyUnavailable,

    #[error("Token generation error: {0}")]
    Signing(String),
}

#[derive(Clone)]
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Longest accepted session lifetime: ten years.
pub const MAX_VALIDITY_HOURS: u64 = 24 * 365 * 10;

/// Issues and validates HS256 session tokens with a server-held secret.
#[derive(Clone)]
pub struct TokenService {
    keys: Option<Keys>,
    validity: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("configured", &self.keys.is_some())
            .field("validity", &self.validity)
            .finish()
    }
}

impl TokenService {
    /// An empty secret yields a service that rejects every token and refuses
    /// to issue new ones. Validity is capped at [`MAX_VALIDITY_HOURS`].
    pub fn new(secret: &str, validity_hours: u64) -> Self {
        let keys = (!secret.is_empty()).then(|| Keys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        });

        Self {
            keys,
            validity: Duration::hours(validity_hours.min(MAX_VALIDITY_HOURS) as i64),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.keys.is_some()
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.sign(&Claims::new(user_id, self.validity))
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let keys = self.keys.as_ref().ok_or(TokenError::SigningKeyUnavailable)?;

        encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies signature and expiry and returns the embedded user id.
    pub fn validate(&self, token: &str) -> Result<Uuid, TokenError> {
        let keys = self.keys.as_ref().ok_or(TokenError::InvalidToken)?;

        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &keys.decoding, &validation).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            TokenError::InvalidToken
        })?;

        Ok(token_data.claims.sub)
    }
}
