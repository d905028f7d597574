use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use super::issuer::TokenIssuer;
use crate::identity::UserId;

/// Claims carried by an identity token.
///
/// Timestamps are whole seconds since the Unix epoch. `iss` and `sub` stay
/// raw strings so that foreign or broken values reach the issuer and
/// subject checks instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer (token family)
    #[serde(default)]
    pub iss: String,

    /// Subject (user identifier)
    #[serde(default)]
    pub sub: String,

    /// Expiration time
    pub exp: i64,

    /// Issued at
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// Build claims for `subject`, expiring `ttl` after `issued_at`.
    ///
    /// # Errors
    /// * `SigningFailed` - Expiration does not fit in a timestamp
    pub fn new(
        issuer: TokenIssuer,
        subject: &UserId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                JwtError::SigningFailed(format!("token lifetime {:?} is out of range", ttl))
            })?;

        Ok(Self {
            iss: issuer.as_str().to_string(),
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        })
    }

    /// Token family named by `iss`, if it is one of ours.
    pub fn issuer(&self) -> Option<TokenIssuer> {
        TokenIssuer::from_claim(&self.iss)
    }

    /// A token is expired once the current second reaches `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Parse the subject claim back into a user identifier.
    pub fn subject(&self) -> Result<UserId, JwtError> {
        UserId::parse(&self.sub).map_err(|e| JwtError::MalformedSubject(e.to_string()))
    }
}
