use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token was not issued for this purpose")]
    WrongIssuer,

    #[error("Token is expired")]
    Expired,

    #[error("Token subject is malformed: {0}")]
    MalformedSubject(String),

    #[error("Token is malformed: {0}")]
    MalformedToken(String),
}

impl From<JsonWebTokenError> for JwtError {
    fn from(e: JsonWebTokenError) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => JwtError::InvalidSignature,
            ErrorKind::InvalidIssuer => JwtError::WrongIssuer,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::MissingRequiredClaim(claim) => {
                JwtError::MalformedToken(format!("missing '{}' claim", claim))
            }
            _ => JwtError::MalformedToken(e.to_string()),
        }
    }
}
