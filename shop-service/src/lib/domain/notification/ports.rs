use async_trait::async_trait;

use crate::domain::notification::errors::MailError;
use crate::domain::notification::errors::MailingListError;
use crate::domain::notification::models::Email;
use crate::domain::user::models::EmailAddress;

/// Outbound transactional email.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver `email` to `recipient`.
    ///
    /// # Errors
    /// * `NotConfigured` - Provider credentials are missing
    /// * `Transport` - Provider could not be reached
    /// * `Rejected` - Provider answered with a non-success status
    async fn send(&self, recipient: &EmailAddress, email: &Email) -> Result<(), MailError>;
}

/// Newsletter list subscriptions.
#[async_trait]
pub trait MailingList: Send + Sync + 'static {
    /// Subscribe `email` to the store's list.
    ///
    /// # Errors
    /// * `NotConfigured` - Provider credentials are missing
    /// * `InvalidKey` - API key does not name a datacenter
    /// * `Transport` - Provider could not be reached
    /// * `Rejected` - Provider answered with a non-success status
    async fn subscribe(&self, email: &EmailAddress) -> Result<(), MailingListError>;
}
