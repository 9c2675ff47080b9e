use async_trait::async_trait;

use crate::config::MailgunConfig;
use crate::config::SecretString;
use crate::domain::notification::errors::MailError;
use crate::domain::notification::models::Email;
use crate::domain::notification::ports::Mailer;
use crate::domain::user::models::EmailAddress;

const DEFAULT_BASE_URL: &str = "https://api.mailgun.net";

/// Transactional email through the Mailgun messages API.
///
/// Without a key and domain every send fails with `NotConfigured`, which
/// the service logs and ignores.
pub struct MailgunMailer {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    domain: String,
    sender: String,
}

impl MailgunMailer {
    pub fn new(client: reqwest::Client, config: &MailgunConfig) -> Self {
        if !config.is_configured() {
            tracing::warn!("Mailgun key or domain missing, emails will not be sent");
        }

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: config.key.clone(),
            domain: config.domain.clone(),
            sender: config.sender.clone(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.domain.is_empty()
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/v3/{}/messages",
            self.base_url.trim_end_matches('/'),
            self.domain
        )
    }
}

#[async_trait]
impl Mailer for MailgunMailer {
    async fn send(&self, recipient: &EmailAddress, email: &Email) -> Result<(), MailError> {
        if !self.is_configured() {
            return Err(MailError::NotConfigured);
        }

        let text = email.text();
        let form = [
            ("from", self.sender.as_str()),
            ("to", recipient.as_str()),
            ("subject", email.subject()),
            ("text", text.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth("api", Some(self.api_key.expose()))
            .form(&form)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(recipient = %recipient, subject = email.subject(), "Email sent");
        Ok(())
    }
}
