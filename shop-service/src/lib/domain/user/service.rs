use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::notification::models::reset_password_url;
use crate::domain::notification::models::Email;
use crate::domain::notification::ports::Mailer;
use crate::domain::notification::ports::MailingList;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ForgotPasswordCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Provider;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::ResetPasswordCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication.
///
/// Mail and newsletter failures are logged and never fail the request.
pub struct AuthService<UR, MA, ML>
where
    UR: UserRepository,
    MA: Mailer,
    ML: MailingList,
{
    repository: Arc<UR>,
    mailer: Arc<MA>,
    mailing_list: Arc<ML>,
    authenticator: Arc<Authenticator>,
    client_url: String,
}

impl<UR, MA, ML> AuthService<UR, MA, ML>
where
    UR: UserRepository,
    MA: Mailer,
    ML: MailingList,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `mailer` - Transactional email delivery
    /// * `mailing_list` - Newsletter subscription
    /// * `authenticator` - Password hashing and token issuing
    /// * `client_url` - Storefront base URL used in reset links
    pub fn new(
        repository: Arc<UR>,
        mailer: Arc<MA>,
        mailing_list: Arc<ML>,
        authenticator: Arc<Authenticator>,
        client_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            mailer,
            mailing_list,
            authenticator,
            client_url: client_url.into(),
        }
    }

    fn issue_session(&self, user: User) -> Result<Session, UserError> {
        let claims = self
            .authenticator
            .claims_for(user.id, user.email.as_str(), user.role.as_str());
        let token = self.authenticator.issue_token(&claims)?;

        Ok(Session {
            token: token.bearer(),
            user,
        })
    }

    async fn notify(&self, recipient: &EmailAddress, email: Email) {
        if let Err(e) = self.mailer.send(recipient, &email).await {
            tracing::error!(
                recipient = %recipient,
                subject = email.subject(),
                error = %e,
                "Failed to send email"
            );
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        Ok(self.authenticator.hash_password(password)?)
    }
}

#[async_trait]
impl<UR, MA, ML> AuthServicePort for AuthService<UR, MA, ML>
where
    UR: UserRepository,
    MA: Mailer,
    ML: MailingList,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, UserError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(command.email.to_string()))?;

        if user.provider != Provider::Email {
            return Err(UserError::ProviderMismatch(user.provider));
        }

        let stored_hash = user
            .password_hash
            .as_deref()
            .ok_or(UserError::InvalidCredentials)?;

        let claims = self
            .authenticator
            .claims_for(user.id, user.email.as_str(), user.role.as_str());
        let result = self
            .authenticator
            .authenticate(&command.password, stored_hash, &claims)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            token: result.bearer(),
            user,
        })
    }

    async fn register(&self, command: RegisterCommand) -> Result<Registration, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let subscribed = if command.is_subscribed {
            match self.mailing_list.subscribe(&command.email).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(
                        email = %command.email,
                        error = %e,
                        "Newsletter subscription failed"
                    );
                    false
                }
            }
        } else {
            false
        };

        let password_hash = self.hash_password(&command.password)?;
        let user = User::register(
            command.email,
            command.first_name,
            command.last_name,
            password_hash,
        );

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, subscribed, "User registered");

        self.notify(
            &created_user.email,
            Email::Signup {
                first_name: created_user.first_name.clone(),
                last_name: created_user.last_name.clone(),
            },
        )
        .await;

        let session = self.issue_session(created_user)?;

        Ok(Registration {
            session,
            subscribed,
        })
    }

    async fn forgot_password(&self, command: ForgotPasswordCommand) -> Result<(), UserError> {
        let mut user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(command.email.to_string()))?;

        let token = self.authenticator.generate_reset_token();
        user.set_reset_token(token.value.clone(), token.expires_at);
        let user = self.repository.update(user).await?;

        tracing::info!(user_id = %user.id, expires_at = %token.expires_at, "Password reset requested");

        self.notify(
            &user.email,
            Email::ResetRequest {
                reset_url: reset_password_url(&self.client_url, &token.value),
            },
        )
        .await;

        Ok(())
    }

    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), UserError> {
        let mut user = self
            .repository
            .find_by_reset_token(&command.token, Utc::now())
            .await?
            .ok_or(UserError::ResetTokenExpired)?;

        let password_hash = self.hash_password(&command.password)?;
        user.set_password_hash(password_hash);
        let user = self.repository.update(user).await?;

        tracing::info!(user_id = %user.id, "Password reset completed");

        self.notify(&user.email, Email::PasswordChanged).await;

        Ok(())
    }

    async fn change_password(&self, command: ChangePasswordCommand) -> Result<(), UserError> {
        let mut user = self
            .repository
            .find_by_id(&command.user_id)
            .await?
            .ok_or_else(|| UserError::NotFound(command.user_id.to_string()))?;

        let matches = match user.password_hash.as_deref() {
            Some(stored_hash) => self
                .authenticator
                .verify_password(&command.password, stored_hash)?,
            None => false,
        };
        if !matches {
            return Err(UserError::IncorrectCurrentPassword);
        }

        let password_hash = self.hash_password(&command.confirm_password)?;
        user.set_password_hash(password_hash);
        let user = self.repository.update(user).await?;

        tracing::info!(user_id = %user.id, "Password changed");

        self.notify(&user.email, Email::PasswordChanged).await;

        Ok(())
    }
}
