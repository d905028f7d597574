use async_trait::async_trait;
use thiserror::Error;

use crate::identity::UserId;

/// Stored credentials of a registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
}

/// Error for user lookup failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserLookupError {
    #[error("User lookup failed: {0}")]
    Unavailable(String),
}

/// Port for retrieving users by their login identity.
///
/// Implemented by the surrounding service (usually over its user table).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLookup: Send + Sync + 'static {
    /// Retrieve user credentials by email address.
    ///
    /// # Arguments
    /// * `email` - Email address the user logs in with
    ///
    /// # Returns
    /// Optional credentials (None if no such user)
    ///
    /// # Errors
    /// * `Unavailable` - Backing store could not be queried
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, UserLookupError>;
}
