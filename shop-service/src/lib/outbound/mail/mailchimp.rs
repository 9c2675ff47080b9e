use async_trait::async_trait;
use serde::Serialize;

use crate::config::MailchimpConfig;
use crate::config::SecretString;
use crate::domain::notification::errors::MailingListError;
use crate::domain::notification::ports::MailingList;
use crate::domain::user::models::EmailAddress;

/// Newsletter subscriptions through the Mailchimp marketing API.
pub struct MailchimpMailingList {
    client: reqwest::Client,
    base_url: Option<String>,
    api_key: SecretString,
    list_key: String,
}

#[derive(Debug, Serialize)]
struct SubscribeRequest<'a> {
    email_address: &'a str,
    status: &'a str,
}

impl MailchimpMailingList {
    pub fn new(client: reqwest::Client, config: &MailchimpConfig) -> Self {
        if !config.is_configured() {
            tracing::warn!("Mailchimp key or list missing, newsletter signups are disabled");
        }

        Self {
            client,
            base_url: None,
            api_key: config.key.clone(),
            list_key: config.list_key.clone(),
        }
    }

    /// Send requests to `base_url` instead of the datacenter host named by the key.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn members_url(&self) -> Result<String, MailingListError> {
        let base_url = match &self.base_url {
            Some(base_url) => base_url.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.api.mailchimp.com",
                datacenter(self.api_key.expose())?
            ),
        };

        Ok(format!("{}/3.0/lists/{}/members", base_url, self.list_key))
    }
}

/// Keys look like `<secret>-us6`; the suffix names the API host.
fn datacenter(api_key: &str) -> Result<&str, MailingListError> {
    api_key
        .rsplit_once('-')
        .map(|(_, dc)| dc)
        .filter(|dc| !dc.is_empty())
        .ok_or(MailingListError::InvalidKey)
}

#[async_trait]
impl MailingList for MailchimpMailingList {
    async fn subscribe(&self, email: &EmailAddress) -> Result<(), MailingListError> {
        if self.api_key.is_empty() || self.list_key.is_empty() {
            return Err(MailingListError::NotConfigured);
        }

        let response = self
            .client
            .post(self.members_url()?)
            .basic_auth("apikey", Some(self.api_key.expose()))
            .json(&SubscribeRequest {
                email_address: email.as_str(),
                status: "subscribed",
            })
            .send()
            .await
            .map_err(|e| MailingListError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailingListError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(email = %email, "Subscribed to newsletter");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailing_list(key: &str) -> MailchimpMailingList {
        MailchimpMailingList::new(
            reqwest::Client::new(),
            &MailchimpConfig {
                key: SecretString::new(key),
                list_key: "list1".to_string(),
            },
        )
    }

    #[test]
    fn test_datacenter_comes_from_key_suffix() {
        assert_eq!(datacenter("abc123-us6").unwrap(), "us6");
        assert!(matches!(datacenter("abc123"), Err(MailingListError::InvalidKey)));
        assert!(matches!(datacenter("abc123-"), Err(MailingListError::InvalidKey)));
    }

    #[test]
    fn test_members_url() {
        assert_eq!(
            mailing_list("abc123-us6").members_url().unwrap(),
            "https://us6.api.mailchimp.com/3.0/lists/list1/members"
        );
        assert_eq!(
            mailing_list("abc123")
                .with_base_url("http://127.0.0.1:9999")
                .members_url()
                .unwrap(),
            "http://127.0.0.1:9999/3.0/lists/list1/members"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_list_refuses_to_subscribe() {
        let list = mailing_list("");
        let email = EmailAddress::new("jane@example.com".to_string()).unwrap();

        let result = list.subscribe(&email).await;

        assert!(matches!(result, Err(MailingListError::NotConfigured)));
    }
}
