use std::fmt;
use std::str::FromStr;

use chrono::Duration;

use super::errors::LifetimeError;

/// Longest accepted lifetime. Keeps `now + lifetime` representable.
pub const MAX_TOKEN_LIFETIME_DAYS: i64 = 3650;

/// How long an issued access token stays valid.
///
/// Parsed from a number followed by a unit: `s`, `m`, `h` or `d`
/// (`"7d"`, `"12h"`). A bare number is taken as seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetime(Duration);

impl TokenLifetime {
    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl Default for TokenLifetime {
    fn default() -> Self {
        Self(Duration::days(7))
    }
}

impl FromStr for TokenLifetime {
    type Err = LifetimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LifetimeError::Empty);
        }

        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (amount, unit) = s.split_at(split);

        let amount: i64 = amount
            .parse()
            .map_err(|_| LifetimeError::InvalidAmount(s.to_string()))?;

        let duration = match unit.trim() {
            "" | "s" => Duration::try_seconds(amount),
            "m" => Duration::try_minutes(amount),
            "h" => Duration::try_hours(amount),
            "d" => Duration::try_days(amount),
            other => return Err(LifetimeError::UnknownUnit(other.to_string())),
        };

        match duration {
            Some(duration) if duration <= Duration::days(MAX_TOKEN_LIFETIME_DAYS) => {
                Ok(Self(duration))
            }
            _ => Err(LifetimeError::TooLong(s.to_string())),
        }
    }
}

impl fmt::Display for TokenLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0.num_seconds())
    }
}
