use std::time::Duration;

/// Lifetime used when none (or an excessive one) is requested.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// Lifetime granted to a token requested at login.
///
/// A requested lifetime of zero, or one above the maximum, falls back to the
/// maximum instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetime(Duration);

impl TokenLifetime {
    /// Grant `requested`, or `maximum` when `requested` is zero or exceeds it.
    pub fn clamp(requested: Duration, maximum: Duration) -> Self {
        if requested.is_zero() || requested > maximum {
            Self(maximum)
        } else {
            Self(requested)
        }
    }

    /// Clamp a lifetime requested in whole seconds, as login requests carry it.
    pub fn from_requested_seconds(requested: Option<u64>, maximum: Duration) -> Self {
        Self::clamp(Duration::from_secs(requested.unwrap_or(0)), maximum)
    }

    /// Granted lifetime, ready to hand to `TokenCodec::issue`.
    pub fn as_duration(self) -> Duration {
        self.0
    }

    /// Granted lifetime in whole seconds, as reported in `expires_in`.
    pub fn as_secs(self) -> u64 {
        self.0.as_secs()
    }
}

impl Default for TokenLifetime {
    fn default() -> Self {
        Self(DEFAULT_TOKEN_LIFETIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_uses_maximum() {
        let lifetime = TokenLifetime::clamp(Duration::ZERO, DEFAULT_TOKEN_LIFETIME);
        assert_eq!(lifetime.as_duration(), DEFAULT_TOKEN_LIFETIME);
    }

    #[test]
    fn test_oversized_uses_maximum() {
        let lifetime = TokenLifetime::from_requested_seconds(Some(3601), DEFAULT_TOKEN_LIFETIME);
        assert_eq!(lifetime.as_secs(), 3600);
    }

    #[test]
    fn test_within_range_is_kept() {
        let lifetime = TokenLifetime::from_requested_seconds(Some(60), DEFAULT_TOKEN_LIFETIME);
        assert_eq!(lifetime.as_secs(), 60);

        let lifetime = TokenLifetime::from_requested_seconds(Some(3600), DEFAULT_TOKEN_LIFETIME);
        assert_eq!(lifetime.as_secs(), 3600);
    }

    #[test]
    fn test_missing_request_uses_maximum() {
        let lifetime = TokenLifetime::from_requested_seconds(None, Duration::from_secs(900));
        assert_eq!(lifetime.as_secs(), 900);
        assert_eq!(TokenLifetime::default().as_duration(), DEFAULT_TOKEN_LIFETIME);
    }
}
