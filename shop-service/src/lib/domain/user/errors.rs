use thiserror::Error;

use crate::user::models::Provider;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress construction
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email address is empty")]
    Empty,
}

/// Top-level error for all user-related operations.
///
/// Client-facing variants carry the exact message shown to the shopper.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Domain-level errors
    #[error("No user found for this email address.")]
    NotFoundByEmail(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("That email address is already in use.")]
    EmailAlreadyExists(String),

    #[error("That email address is already in use using {0} provider.")]
    ProviderMismatch(Provider),

    #[error("Password Incorrect")]
    InvalidCredentials,

    #[error("Please enter your correct old password.")]
    IncorrectCurrentPassword,

    #[error("Your token has expired. Please attempt to reset your password again.")]
    ResetTokenExpired,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<auth::AuthenticationError> for UserError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => UserError::Password(e),
            auth::AuthenticationError::JwtError(e) => UserError::Token(e),
        }
    }
}
