//! Authentication core for the chirpy service
//!
//! Provides the stateless session machinery used by request handlers:
//! - Password hashing (Argon2id)
//! - Access token issuance and validation (HS256 JWT, issuer-pinned)
//! - Bearer token extraction from `Authorization` headers
//! - Login and request authentication coordination
//!
//! The signing secret is passed in explicitly; nothing here keeps global state.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Access Tokens
//! ```
//! use std::time::Duration;
//!
//! use auth::{TokenCodec, UserId};
//!
//! let codec = TokenCodec::new();
//! let user_id = UserId::new();
//! let token = codec.issue(&user_id, b"secret", Duration::from_secs(3600)).unwrap();
//! assert_eq!(codec.validate(&token, b"secret").unwrap(), user_id);
//! ```
//!
//! ## Bearer Extraction
//! ```
//! use auth::BearerExtractor;
//!
//! assert_eq!(BearerExtractor::extract(Some("Bearer abc123")).unwrap(), "abc123");
//! assert!(BearerExtractor::extract(Some("Basic abc123")).is_err());
//! ```

pub mod authenticator;
pub mod bearer;
pub mod config;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod ports;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::LoginRequest;
pub use authenticator::LoginResult;
pub use bearer::BearerError;
pub use bearer::BearerExtractor;
pub use self::config::AuthConfig;
pub use identity::UserId;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use jwt::TokenIssuer;
pub use jwt::TokenLifetime;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use ports::UserCredentials;
pub use ports::UserLookup;
pub use ports::UserLookupError;
