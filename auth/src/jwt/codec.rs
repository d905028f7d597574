use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::issuer::TokenIssuer;
use super::lifetime::DEFAULT_TOKEN_LIFETIME;
use crate::identity::UserId;

/// Issues and validates signed identity tokens.
///
/// Uses HS256 (HMAC with SHA-256). The signing secret is passed into every
/// call so that each caller (and each test) can bring its own.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    issuer: TokenIssuer,
    default_lifetime: Duration,
}

impl TokenCodec {
    /// Create a codec for access tokens with the default lifetime.
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::HS256,
            issuer: TokenIssuer::Access,
            default_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }

    /// Lifetime used when a token is issued with a zero `ttl`.
    pub fn with_default_lifetime(mut self, lifetime: Duration) -> Self {
        self.default_lifetime = lifetime;
        self
    }

    /// Issue a token for `subject`, valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - User the token identifies
    /// * `secret` - HMAC signing secret
    /// * `ttl` - Token lifetime; zero means the default lifetime
    ///
    /// # Returns
    /// Compact JWT string (`header.claims.signature`)
    ///
    /// # Errors
    /// * `SigningFailed` - Claims could not be built or encoded
    pub fn issue(
        &self,
        subject: &UserId,
        secret: &[u8],
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let ttl = if ttl.is_zero() {
            self.default_lifetime
        } else {
            ttl
        };
        let claims = Claims::new(self.issuer, subject, Utc::now(), ttl)?;

        let token = encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|e| JwtError::SigningFailed(e.to_string()))?;

        tracing::debug!(
            subject = %subject,
            issuer = %self.issuer,
            expires_at = claims.exp,
            "Token issued"
        );

        Ok(token)
    }

    /// Validate a token and return its subject.
    ///
    /// Checks run in order: signature, issuer, expiry, subject. Expiry is
    /// always checked; there is no way to read claims from an expired token.
    ///
    /// # Errors
    /// * `InvalidSignature` - MAC mismatch, wrong secret, or foreign algorithm
    /// * `WrongIssuer` - Token belongs to another token family
    /// * `Expired` - Current time has reached the `exp` claim
    /// * `MalformedSubject` - `sub` is missing or not a user ID
    /// * `MalformedToken` - Token cannot be decoded at all
    pub fn validate(&self, token: &str, secret: &[u8]) -> Result<UserId, JwtError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret),
            &self.validation(),
        )?;
        let claims = token_data.claims;

        if claims.issuer() != Some(self.issuer) {
            return Err(JwtError::WrongIssuer);
        }

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::Expired);
        }

        let subject = claims.subject()?;
        tracing::debug!(subject = %subject, "Token validated");

        Ok(subject)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Only `exp` is required here. Missing `iss` or `sub` fall through to the
        // issuer and subject checks in `validate`, which run in a fixed order.
        validation.set_required_spec_claims(&["exp"]);
        // Expiry is checked in `validate`; `exp` itself counts as expired.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new()
    }
}
