use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ForgotPasswordCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::ResetPasswordCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for the authentication use cases behind `/api/auth`.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify email and password and issue an access token.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No account for this email
    /// * `ProviderMismatch` - Account signs in through a social provider
    /// * `InvalidCredentials` - Password does not match
    async fn login(&self, command: LoginCommand) -> Result<Session, UserError>;

    /// Create a member account, optionally subscribe it to the newsletter,
    /// send the welcome email and issue an access token.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Registration, UserError>;

    /// Store a fresh reset token on the account and email the reset link.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No account for this email
    async fn forgot_password(&self, command: ForgotPasswordCommand) -> Result<(), UserError>;

    /// Redeem a reset token and set the new password.
    ///
    /// # Errors
    /// * `ResetTokenExpired` - Token is unknown, already used or past its expiry
    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), UserError>;

    /// Replace the password of an authenticated user.
    ///
    /// # Errors
    /// * `NotFound` - Account no longer exists
    /// * `IncorrectCurrentPassword` - Current password does not match
    async fn change_password(&self, command: ChangePasswordCommand) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve the user holding `token` as a reset token that is still valid at `now`.
    async fn find_by_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;
}
