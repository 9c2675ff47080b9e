use serde::Serialize;

use crate::jwt::handler::BEARER_PREFIX;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenLifetime;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::reset::ResetToken;

/// Authentication coordinator combining password verification and token issuing.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: TokenLifetime,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed JWT without scheme prefix
    pub access_token: String,
}

impl AuthenticationResult {
    /// Token as handed to clients: `Bearer <jwt>`.
    pub fn bearer(&self) -> String {
        format!("{}{}", BEARER_PREFIX, self.access_token)
    }
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_lifetime` - Validity of issued access tokens
    pub fn new(jwt_secret: &[u8], token_lifetime: TokenLifetime) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_lifetime,
        }
    }

    /// Claims for a user, expiring after the configured lifetime.
    pub fn claims_for(
        &self,
        user_id: impl ToString,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Claims {
        Claims::for_user(user_id, email, role, self.token_lifetime)
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Compare a plaintext password with a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be read
    /// * `JwtError` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(claims)?)
    }

    /// Issue an access token without checking a password.
    ///
    /// Used right after registration, when the password was just set.
    pub fn issue_token<T: Serialize>(&self, claims: &T) -> Result<AuthenticationResult, JwtError> {
        let access_token = self.jwt_handler.encode(claims)?;
        Ok(AuthenticationResult { access_token })
    }

    /// Validate and decode an access token (raw or `Bearer`-prefixed).
    pub fn validate_token<T: for<'de> serde::Deserialize<'de>>(
        &self,
        token: &str,
    ) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Generate a password reset token with the default one-hour validity.
    pub fn generate_reset_token(&self) -> ResetToken {
        ResetToken::generate(ResetToken::default_validity())
    }
}
