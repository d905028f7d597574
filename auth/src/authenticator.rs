use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use serde::Deserialize;
use serde::Serialize;

use crate::bearer::BearerExtractor;
use crate::config::JwtConfig;
use crate::identity::UserId;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::jwt::TokenLifetime;
use crate::jwt::DEFAULT_TOKEN_LIFETIME;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::ports::UserLookup;
use crate::ports::UserLookupError;

/// Authentication coordinator combining user lookup, password verification
/// and token handling.
///
/// Holds the signing secret for the lifetime of the process; it is never
/// mutated after construction.
pub struct Authenticator<L>
where
    L: UserLookup,
{
    users: Arc<L>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    secret: Vec<u8>,
    max_lifetime: Duration,
}

/// Login request as sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub expires_in_seconds: Option<u64>,
}

/// Result of successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResult {
    pub user_id: UserId,
    pub email: String,
    /// JWT access token
    pub token: String,
    /// Seconds the token stays valid
    pub expires_in: u64,
}

/// Authentication operation errors.
///
/// `InvalidCredentials` and `Unauthorized` carry no reason; it is only logged.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("User lookup error: {0}")]
    UserLookup(#[from] UserLookupError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl<L> Authenticator<L>
where
    L: UserLookup,
{
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `users` - User lookup implementation
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(users: Arc<L>, jwt_secret: &[u8]) -> Self {
        Self {
            users,
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(),
            secret: jwt_secret.to_vec(),
            max_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }

    /// Create an authenticator from loaded configuration.
    pub fn from_config(users: Arc<L>, config: &JwtConfig) -> Self {
        Self::new(users, config.secret_bytes()).with_max_lifetime(config.default_lifetime())
    }

    /// Lifetime granted when a login asks for none, or for more than this.
    pub fn with_max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = lifetime;
        self.token_codec = self.token_codec.with_default_lifetime(lifetime);
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// The requested lifetime is clamped: zero, missing, or above the
    /// maximum all yield the maximum.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `UserLookup` - User store could not be queried
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token signing failed
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResult, AuthenticationError> {
        let user = match self.users.find_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                tracing::warn!(reason = "unknown email", "Login rejected");
                return Err(AuthenticationError::InvalidCredentials);
            }
        };

        match self
            .password_hasher
            .verify(&request.password, &user.password_hash)
        {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => {
                tracing::warn!(user_id = %user.id, reason = "password mismatch", "Login rejected");
                return Err(AuthenticationError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                return Err(e.into());
            }
        }

        let lifetime =
            TokenLifetime::from_requested_seconds(request.expires_in_seconds, self.max_lifetime);
        let token = self.issue_token(&user.id, lifetime)?;

        tracing::info!(
            user_id = %user.id,
            expires_in = lifetime.as_secs(),
            "User logged in"
        );

        Ok(LoginResult {
            user_id: user.id,
            email: user.email,
            token,
            expires_in: lifetime.as_secs(),
        })
    }

    /// Sign a token for a user whose identity is already established.
    ///
    /// `lifetime` is used as given; callers clamp it through `TokenLifetime`.
    pub fn issue_token(
        &self,
        user_id: &UserId,
        lifetime: TokenLifetime,
    ) -> Result<String, JwtError> {
        self.token_codec
            .issue(user_id, &self.secret, lifetime.as_duration())
    }

    /// Validate a token and return the user it identifies.
    pub fn validate_token(&self, token: &str) -> Result<UserId, JwtError> {
        self.token_codec.validate(token, &self.secret)
    }

    /// Authenticate a request from its `Authorization: Bearer` header.
    ///
    /// # Errors
    /// * `Unauthorized` - Header missing or malformed, or token rejected
    pub fn authenticate_request(&self, headers: &HeaderMap) -> Result<UserId, AuthenticationError> {
        let token = BearerExtractor::from_headers(headers).map_err(|e| {
            tracing::warn!(reason = %e, "Request authentication failed");
            AuthenticationError::Unauthorized
        })?;

        self.validate_token(token).map_err(|e| {
            tracing::warn!(reason = %e, "Request authentication failed");
            AuthenticationError::Unauthorized
        })
    }
}

#[cfg(test)]
mod tests {
    use http::header::AUTHORIZATION;
    use http::HeaderValue;
    use mockall::predicate::eq;

    use super::*;
    use crate::ports::MockUserLookup;
    use crate::ports::UserCredentials;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn stored_user(password: &str) -> UserCredentials {
        UserCredentials {
            id: UserId::new(),
            email: "walt@example.com".to_string(),
            password_hash: PasswordHasher::new()
                .hash(password)
                .expect("Failed to hash password"),
        }
    }

    fn lookup_returning(user: Option<UserCredentials>) -> MockUserLookup {
        let mut users = MockUserLookup::new();
        users
            .expect_find_by_email()
            .with(eq("walt@example.com"))
            .times(1)
            .returning(move |_| Ok(user.clone()));
        users
    }

    fn login_request(password: &str, expires_in_seconds: Option<u64>) -> LoginRequest {
        LoginRequest {
            email: "walt@example.com".to_string(),
            password: password.to_string(),
            expires_in_seconds,
        }
    }

    fn bearer_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_login_success() {
        let user = stored_user("correctPassword123!");
        let user_id = user.id;
        let authenticator = Authenticator::new(Arc::new(lookup_returning(Some(user))), SECRET);

        let result = authenticator
            .login(login_request("correctPassword123!", None))
            .await
            .expect("Login failed");

        assert_eq!(result.user_id, user_id);
        assert_eq!(result.email, "walt@example.com");
        assert_eq!(result.expires_in, 3600);
        assert_eq!(authenticator.validate_token(&result.token), Ok(user_id));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = stored_user("correctPassword123!");
        let authenticator = Authenticator::new(Arc::new(lookup_returning(Some(user))), SECRET);

        let result = authenticator
            .login(login_request("wrongPassword", None))
            .await;

        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let authenticator = Authenticator::new(Arc::new(lookup_returning(None)), SECRET);

        let result = authenticator
            .login(login_request("correctPassword123!", None))
            .await;

        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_lookup_failure() {
        let mut users = MockUserLookup::new();
        users
            .expect_find_by_email()
            .returning(|_| Err(UserLookupError::Unavailable("connection refused".to_string())));
        let authenticator = Authenticator::new(Arc::new(users), SECRET);

        let result = authenticator
            .login(login_request("correctPassword123!", None))
            .await;

        assert!(matches!(result, Err(AuthenticationError::UserLookup(_))));
    }

    #[tokio::test]
    async fn test_login_malformed_stored_hash() {
        let mut user = stored_user("correctPassword123!");
        user.password_hash = "invalidhash".to_string();
        let authenticator = Authenticator::new(Arc::new(lookup_returning(Some(user))), SECRET);

        let result = authenticator
            .login(login_request("correctPassword123!", None))
            .await;

        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(
                PasswordError::MalformedHash(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_login_clamps_requested_lifetime() {
        for (requested, granted) in [(Some(0), 3600), (Some(7200), 3600), (Some(120), 120)] {
            let user = stored_user("pw");
            let authenticator =
                Authenticator::new(Arc::new(lookup_returning(Some(user))), SECRET);

            let result = authenticator
                .login(login_request("pw", requested))
                .await
                .expect("Login failed");

            assert_eq!(result.expires_in, granted);
        }
    }

    #[tokio::test]
    async fn test_login_respects_configured_maximum() {
        let user = stored_user("pw");
        let authenticator = Authenticator::new(Arc::new(lookup_returning(Some(user))), SECRET)
            .with_max_lifetime(Duration::from_secs(600));

        let result = authenticator
            .login(login_request("pw", Some(3600)))
            .await
            .expect("Login failed");

        assert_eq!(result.expires_in, 600);
    }

    #[test]
    fn test_hash_password() {
        let authenticator = Authenticator::new(Arc::new(MockUserLookup::new()), SECRET);

        let hash = authenticator
            .hash_password("correctPassword123!")
            .expect("Failed to hash password");

        assert!(PasswordHasher::new()
            .verify("correctPassword123!", &hash)
            .is_ok());
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = JwtConfig {
            secret: "configured-secret".to_string(),
            default_lifetime_seconds: 600,
        };
        let user = stored_user("pw");
        let user_id = user.id;
        let authenticator =
            Authenticator::from_config(Arc::new(lookup_returning(Some(user))), &config);

        let result = authenticator
            .login(login_request("pw", None))
            .await
            .expect("Login failed");

        assert_eq!(result.expires_in, 600);
        assert_eq!(
            TokenCodec::new().validate(&result.token, b"configured-secret"),
            Ok(user_id)
        );
    }

    #[test]
    fn test_authenticate_request() {
        let authenticator = Authenticator::new(Arc::new(MockUserLookup::new()), SECRET);
        let user_id = UserId::new();
        let token = authenticator
            .issue_token(&user_id, TokenLifetime::default())
            .expect("Failed to issue token");

        let authenticated = authenticator
            .authenticate_request(&bearer_headers(&token))
            .expect("Authentication failed");
        assert_eq!(authenticated, user_id);
    }

    #[test]
    fn test_authenticate_request_rejections() {
        let authenticator = Authenticator::new(Arc::new(MockUserLookup::new()), SECRET);
        let other = Authenticator::new(Arc::new(MockUserLookup::new()), b"another-secret");
        let foreign_token = other
            .issue_token(&UserId::new(), TokenLifetime::default())
            .expect("Failed to issue token");

        let mut basic = HeaderMap::new();
        basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc123"));

        for headers in [
            HeaderMap::new(),
            basic,
            bearer_headers("not-a-token"),
            bearer_headers(&foreign_token),
        ] {
            assert!(matches!(
                authenticator.authenticate_request(&headers),
                Err(AuthenticationError::Unauthorized)
            ));
        }
    }

    #[test]
    fn test_login_result_serialization() {
        let user_id = UserId::new();
        let result = LoginResult {
            user_id,
            email: "walt@example.com".to_string(),
            token: "a.b.c".to_string(),
            expires_in: 60,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["user_id"], user_id.to_string());
        assert_eq!(json["token"], "a.b.c");
        assert_eq!(json["expires_in"], 60);
    }

    #[test]
    fn test_login_request_without_lifetime() {
        let request: LoginRequest = serde_json::from_str(
            r#"{"email": "walt@example.com", "password": "pw"}"#,
        )
        .unwrap();

        assert_eq!(request.expires_in_seconds, None);
    }
}
