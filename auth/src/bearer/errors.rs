use thiserror::Error;

/// Error type for bearer credential extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("No authorization included in request")]
    MissingHeader,

    #[error("No bearer token found")]
    MissingScheme,

    #[error("Authorization header is not valid ASCII")]
    InvalidHeaderValue,
}
