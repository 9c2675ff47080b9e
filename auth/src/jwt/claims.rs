use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::lifetime::TokenLifetime;

/// Access token payload.
///
/// `sub` carries the user id; `email` and `role` let handlers behind the
/// bearer middleware act without another lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user, issued now and expiring after `lifetime`.
    pub fn for_user(
        user_id: impl ToString,
        email: impl Into<String>,
        role: impl Into<String>,
        lifetime: TokenLifetime,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + lifetime.as_duration();

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            role: role.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}
