use thiserror::Error;

/// Error for transactional email delivery
#[derive(Debug, Clone, Error)]
pub enum MailError {
    #[error("Mail delivery is not configured")]
    NotConfigured,

    #[error("Failed to reach mail provider: {0}")]
    Transport(String),

    #[error("Mail provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Error for newsletter list subscription
#[derive(Debug, Clone, Error)]
pub enum MailingListError {
    #[error("Mailing list is not configured")]
    NotConfigured,

    #[error("Mailing list API key has no datacenter suffix")]
    InvalidKey,

    #[error("Failed to reach mailing list provider: {0}")]
    Transport(String),

    #[error("Mailing list provider rejected the subscription with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
