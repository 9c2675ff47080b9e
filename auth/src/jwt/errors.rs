use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,
}

/// Error for token lifetime strings such as `"7d"`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifetimeError {
    #[error("Token lifetime is empty")]
    Empty,

    #[error("Invalid token lifetime amount: {0}")]
    InvalidAmount(String),

    #[error("Token lifetime out of range: {0} (at most 3650 days)")]
    TooLong(String),

    #[error("Unknown token lifetime unit '{0}' (expected s, m, h or d)")]
    UnknownUnit(String),
}
