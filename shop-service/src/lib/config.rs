use std::env;
use std::fmt;

use auth::LifetimeError;
use auth::TokenLifetime;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::File;
use serde::Deserialize;

const DEFAULT_APP_NAME: &str = "RMIT Ecommerce";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_LIFE: &str = "7d";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub mailchimp: MailchimpConfig,
    #[serde(default)]
    pub mailgun: MailgunConfig,
    #[serde(default)]
    pub aws: AwsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub name: String,
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub client_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(skip)]
    pub environment: RunMode,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: SecretString,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: SecretString,
    pub token_life: String,
}

impl JwtConfig {
    pub fn token_lifetime(&self) -> Result<TokenLifetime, LifetimeError> {
        self.token_life.parse()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MailchimpConfig {
    #[serde(default)]
    pub key: SecretString,
    #[serde(default)]
    pub list_key: String,
}

impl MailchimpConfig {
    pub fn is_configured(&self) -> bool {
        !self.key.is_empty() && !self.list_key.is_empty()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MailgunConfig {
    #[serde(default)]
    pub key: SecretString,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub sender: String,
}

impl MailgunConfig {
    pub fn is_configured(&self) -> bool {
        !self.key.is_empty() && !self.domain.is_empty()
    }
}

/// Object storage credentials. Carried for product images; no route uses them yet.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AwsConfig {
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: SecretString,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub bucket_name: String,
}

/// Deployment environment, from `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    Production,
    #[default]
    Development,
}

impl RunMode {
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => RunMode::Production,
            _ => RunMode::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Production => "production",
            RunMode::Development => "development",
        }
    }

    /// Environment variable holding the database URI for this mode.
    pub fn database_url_var(&self) -> &'static str {
        match self {
            RunMode::Production => "MONGO_URI_PROD",
            RunMode::Development => "MONGO_URI_DEV",
        }
    }
}

/// String that never shows up in `Debug` output.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (`PORT`, `JWT_SECRET`, `MAILGUN_KEY`, ...)
    /// 2. Environment-specific config file (config/{production|development}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (port 3000, token life 7d)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// Same as [`Config::load`], reading variables through `lookup`.
    ///
    /// Empty variables count as unset.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let run_mode = RunMode::from_node_env(var("NODE_ENV").as_deref());

        let configuration = ConfigBuilder::builder()
            .set_default("app.name", DEFAULT_APP_NAME)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("jwt.token_life", DEFAULT_TOKEN_LIFE)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode.as_str())).required(false))
            .set_override_option("app.api_url", var("BASE_API_URL"))?
            .set_override_option("app.client_url", var("CLIENT_URL"))?
            .set_override_option("server.port", var("PORT"))?
            .set_override_option("database.url", var(run_mode.database_url_var()))?
            .set_override_option("jwt.secret", var("JWT_SECRET"))?
            .set_override_option("mailchimp.key", var("MAILCHIMP_KEY"))?
            .set_override_option("mailchimp.list_key", var("MAILCHIMP_LIST_KEY"))?
            .set_override_option("mailgun.key", var("MAILGUN_KEY"))?
            .set_override_option("mailgun.domain", var("MAILGUN_DOMAIN"))?
            .set_override_option("mailgun.sender", var("MAILGUN_EMAIL_SENDER"))?
            .set_override_option("aws.access_key_id", var("AWS_ACCESS_KEY_ID"))?
            .set_override_option("aws.secret_access_key", var("AWS_SECRET_ACCESS_KEY"))?
            .set_override_option("aws.region", var("AWS_REGION"))?
            .set_override_option("aws.bucket_name", var("AWS_BUCKET_NAME"))?
            .build()?;

        let mut config: Config = configuration.try_deserialize()?;
        config.server.environment = run_mode;
        config.validate()?;

        Ok(config)
    }

    /// Fail at startup instead of on the first request that needs a secret.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("JWT_SECRET must be set".to_string()));
        }

        if self.database.url.is_empty() {
            return Err(ConfigError::Message(format!(
                "{} must be set when NODE_ENV is {}",
                self.server.environment.database_url_var(),
                self.server.environment.as_str()
            )));
        }

        self.jwt
            .token_lifetime()
            .map_err(|e| ConfigError::Message(format!("jwt.token_life: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("JWT_SECRET", "test-secret-key-for-jwt-signing-at-least-32-bytes"),
        ("MONGO_URI_DEV", "postgresql://localhost/shop_dev"),
        ("MONGO_URI_PROD", "postgresql://db.internal/shop"),
    ];

    #[test]
    fn test_development_uses_dev_database() {
        let config = Config::load_with(lookup_from(REQUIRED)).expect("Failed to load config");

        assert_eq!(config.server.environment, RunMode::Development);
        assert_eq!(config.database.url.expose(), "postgresql://localhost/shop_dev");
    }

    #[test]
    fn test_production_uses_prod_database() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("NODE_ENV", "production"));

        let config = Config::load_with(lookup_from(&vars)).expect("Failed to load config");

        assert_eq!(config.server.environment, RunMode::Production);
        assert_eq!(config.database.url.expose(), "postgresql://db.internal/shop");
    }

    #[test]
    fn test_defaults() {
        let config = Config::load_with(lookup_from(REQUIRED)).expect("Failed to load config");

        assert_eq!(config.app.name, "RMIT Ecommerce");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.jwt.token_life, "7d");
        assert!(!config.mailgun.is_configured());
        assert!(!config.mailchimp.is_configured());
    }

    #[test]
    fn test_values_are_forwarded_verbatim() {
        let mut vars = REQUIRED.to_vec();
        vars.extend_from_slice(&[
            ("PORT", "8080"),
            ("BASE_API_URL", "api"),
            ("CLIENT_URL", "http://localhost:8080"),
            ("MAILGUN_KEY", "key-123"),
            ("MAILGUN_DOMAIN", "mg.example.com"),
            ("MAILGUN_EMAIL_SENDER", "noreply@example.com"),
            ("MAILCHIMP_KEY", "abc-us6"),
            ("MAILCHIMP_LIST_KEY", "list1"),
            ("AWS_REGION", "eu-west-1"),
            ("AWS_BUCKET_NAME", "shop-images"),
        ]);

        let config = Config::load_with(lookup_from(&vars)).expect("Failed to load config");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.app.api_url, "api");
        assert_eq!(config.app.client_url, "http://localhost:8080");
        assert_eq!(config.mailgun.domain, "mg.example.com");
        assert_eq!(config.mailgun.sender, "noreply@example.com");
        assert!(config.mailgun.is_configured());
        assert_eq!(config.mailchimp.key.expose(), "abc-us6");
        assert!(config.mailchimp.is_configured());
        assert_eq!(config.aws.region, "eu-west-1");
        assert_eq!(config.aws.bucket_name, "shop-images");
    }

    #[test]
    fn test_empty_port_falls_back_to_default() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", ""));

        let config = Config::load_with(lookup_from(&vars)).expect("Failed to load config");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        let vars = [("MONGO_URI_DEV", "postgresql://localhost/shop_dev")];

        let error = Config::load_with(lookup_from(&vars)).unwrap_err();
        assert!(error.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_missing_database_url_for_mode_fails() {
        let vars = [
            ("JWT_SECRET", "test-secret-key-for-jwt-signing-at-least-32-bytes"),
            ("MONGO_URI_DEV", "postgresql://localhost/shop_dev"),
            ("NODE_ENV", "production"),
        ];

        let error = Config::load_with(lookup_from(&vars)).unwrap_err();
        assert!(error.to_string().contains("MONGO_URI_PROD"));
    }

    #[test]
    fn test_out_of_range_token_life_fails() {
        let mut config = Config::load_with(lookup_from(REQUIRED)).expect("Failed to load config");

        for token_life in ["99999999999999999d", "100000000d"] {
            config.jwt.token_life = token_life.to_string();

            let error = config.validate().unwrap_err();
            assert!(error.to_string().contains("jwt.token_life"));
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::load_with(lookup_from(REQUIRED)).expect("Failed to load config");
        let printed = format!("{:?}", config);

        assert!(!printed.contains("test-secret-key"));
        assert!(!printed.contains("shop_dev"));
        assert!(printed.contains("[REDACTED]"));
    }
}
