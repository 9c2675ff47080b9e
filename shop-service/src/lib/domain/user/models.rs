use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Accounts created through social login carry no password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: Option<String>,
    pub provider: Provider,
    pub role: Role,
    pub reset_password_token: Option<String>,
    pub reset_password_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New member account registered with email and password.
    pub fn register(
        email: EmailAddress,
        first_name: String,
        last_name: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            first_name,
            last_name,
            password_hash: Some(password_hash),
            provider: Provider::Email,
            role: Role::Member,
            reset_password_token: None,
            reset_password_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the password and drop any pending reset token.
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = Some(password_hash);
        self.reset_password_token = None;
        self.reset_password_expires = None;
        self.updated_at = Utc::now();
    }

    pub fn set_reset_token(&mut self, token: String, expires: DateTime<Utc>) {
        self.reset_password_token = Some(token);
        self.reset_password_expires = Some(expires);
        self.updated_at = Utc::now();
    }

    /// Whether `token` is this user's pending reset token and still valid at `now`.
    pub fn has_valid_reset_token(&self, token: &str, now: DateTime<Utc>) -> bool {
        match (&self.reset_password_token, self.reset_password_expires) {
            (Some(stored), Some(expires)) => stored == token && expires > now,
            _ => false,
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address as entered by the customer.
///
/// Only emptiness is rejected; the address is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    /// * `Empty` - Email is an empty string
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            Err(EmailError::Empty)
        } else {
            Ok(Self(email))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How the account authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Email,
    Google,
    Facebook,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Email => "email",
            Provider::Google => "google",
            Provider::Facebook => "facebook",
        }
    }
}

impl FromStr for Provider {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Provider::Email),
            "google" => Ok(Provider::Google),
            "facebook" => Ok(Provider::Facebook),
            other => Err(UserError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Member,
    Admin,
    Merchant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "ROLE_MEMBER",
            Role::Admin => "ROLE_ADMIN",
            Role::Merchant => "ROLE_MERCHANT",
        }
    }
}

impl FromStr for Role {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_MEMBER" => Ok(Role::Member),
            "ROLE_ADMIN" => Ok(Role::Admin),
            "ROLE_MERCHANT" => Ok(Role::Merchant),
            other => Err(UserError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to log in with email and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Command to register a new member account.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    /// Plain text password (will be hashed by service)
    pub password: String,
    /// Also subscribe the address to the newsletter list
    pub is_subscribed: bool,
}

/// Command to email a password reset link.
#[derive(Debug)]
pub struct ForgotPasswordCommand {
    pub email: EmailAddress,
}

/// Command to redeem a reset token with a new password.
#[derive(Debug)]
pub struct ResetPasswordCommand {
    pub token: String,
    pub password: String,
}

/// Command for a logged-in user to replace their password.
#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub user_id: UserId,
    /// Current password
    pub password: String,
    /// Replacement password
    pub confirm_password: String,
}

/// Issued access token and the user it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    /// `Bearer <jwt>`
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub session: Session,
    pub subscribed: bool,
}
