use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::BearerError;

const BEARER_PREFIX: &str = "Bearer ";

/// Pulls bearer credentials out of `Authorization` header values.
///
/// Only the scheme is checked here; the token itself is opaque until it
/// reaches the token codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerExtractor;

impl BearerExtractor {
    /// Extract the token from a raw header value.
    ///
    /// The `"Bearer "` prefix is case-sensitive. The remainder is trimmed and
    /// may be empty.
    ///
    /// # Errors
    /// * `MissingHeader` - Header is absent or empty
    /// * `MissingScheme` - Header does not start with `"Bearer "`
    pub fn extract(header_value: Option<&str>) -> Result<&str, BearerError> {
        let value = match header_value {
            Some(value) if !value.is_empty() => value,
            _ => return Err(BearerError::MissingHeader),
        };

        value
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .ok_or(BearerError::MissingScheme)
    }

    /// Extract the token from the first `Authorization` header of a request.
    ///
    /// # Errors
    /// * `MissingHeader` - No `Authorization` header, or an empty one
    /// * `InvalidHeaderValue` - Header value is not visible ASCII
    /// * `MissingScheme` - Header does not start with `"Bearer "`
    pub fn from_headers(headers: &HeaderMap) -> Result<&str, BearerError> {
        let value = headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().map_err(|_| BearerError::InvalidHeaderValue))
            .transpose()?;

        Self::extract(value)
    }
}
