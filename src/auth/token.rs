//! JWT issuance and verification.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The privileged role: bypasses the rate limiter.
pub const ROLE_ADMIN: &str = "admin";
/// Standard testing role.
pub const ROLE_QA: &str = "qa";

/// Claims carried inside a token. Field names are part of the token wire
/// format shared with existing tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Who a token is issued for.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl TokenSubject {
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role: role.into(),
        }
    }
}

/// The authenticated actor derived from a verified token.
///
/// Reconstructed per request from the presented token; never stored.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub role: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Issues and validates signed, time-limited identity assertions.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, default_ttl_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // An identity is valid strictly before its expiry; no clock leeway.
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            default_ttl: Duration::hours(default_ttl_hours),
        }
    }

    /// Issue a token with the default lifetime.
    pub fn issue(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, self.default_ttl)
    }

    /// Issue a token expiring `ttl` from now.
    pub fn issue_with_ttl(&self, subject: &TokenSubject, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            id: subject.id.clone(),
            email: subject.email.clone(),
            role: subject.role.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token and return its identity, or `None` for any failure
    /// (bad signature, malformed, expired). Callers treat `None` as
    /// "unauthenticated"; nothing here escalates to a server error.
    pub fn verify(&self, token: &str) -> Option<Identity> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).ok()?;
        let claims = data.claims;
        Some(Identity {
            id: claims.id,
            email: claims.email,
            role: claims.role,
            issued_at: Utc.timestamp_opt(claims.iat, 0).single()?,
            expires_at: Utc.timestamp_opt(claims.exp, 0).single()?,
        })
    }
}
