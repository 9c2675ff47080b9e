use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

/// Random bytes behind each reset token (96 hex characters).
pub const RESET_TOKEN_BYTES: usize = 48;

/// One-time password reset token sent by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Default validity window of a reset link.
    pub fn default_validity() -> Duration {
        Duration::hours(1)
    }

    /// Generate a fresh token valid for `validity` from now.
    pub fn generate(validity: Duration) -> Self {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        Self {
            value: hex::encode(bytes),
            expires_at: Utc::now() + validity,
        }
    }
}
