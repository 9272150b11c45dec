use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use crate::client::SiteDetails;
use crate::domain::EmailAddress;

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug, PartialEq)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" | "development" | "test" => Ok(Self::Dev),
            "prod" | "production" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Environment variables the site has always been configured with,
/// and the setting each one overrides
const LEGACY_VARIABLES: [(&str, &str); 13] = [
    ("MONGODB_URI", "database.uri"),
    ("EMAIL_HOST", "email.host"),
    ("EMAIL_PORT", "email.port"),
    ("EMAIL_SECURE", "email.secure"),
    ("EMAIL_USER", "email.username"),
    ("EMAIL_PASSWORD", "email.password"),
    ("EMAIL_DOMAIN", "email.domain"),
    ("EMAIL_FROM_NAME", "email.from_name"),
    ("DKIM_PRIVATE_KEY", "email.dkim_private_key"),
    ("DKIM_KEY_SELECTOR", "email.dkim_selector"),
    ("ADMIN_EMAIL", "email.admin"),
    ("NEXT_PUBLIC_DOMAIN", "site.domain"),
    ("SUPPORT_PHONE", "site.support_phone"),
];

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub database: DatabaseSettings,
    pub email: EmailSettings,
    pub site: SiteSettings,
    #[serde(default)]
    pub intake: IntakeSettings,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        // Get the path to the settings directory
        let path = env::current_dir()?.join("settings");
        // `APP_ENV` wins over `NODE_ENV`, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }

    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        let builder = Config::builder()
            // Include the base settings
            .add_source(File::from(base_path.join("base")).required(true))
            // Include the runtime settings
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // Override/include any settings from environment variables
            // NOTE: Should be used for any prod secrets. Takes the form `APP_<settings category>__<setting name>`.
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            );

        with_legacy_overrides(builder)?
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
}

fn with_legacy_overrides(
    mut builder: ConfigBuilder<DefaultState>,
) -> anyhow::Result<ConfigBuilder<DefaultState>> {
    for (variable, key) in LEGACY_VARIABLES {
        let value = env::var(variable).ok().filter(|v| !v.is_empty());
        builder = builder.set_override_option(key, value)?;
    }
    Ok(builder)
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    #[serde(default = "default_log_level")]
    log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
    /// Log filter used when `RUST_LOG` is not set
    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    uri: Secret<String>,
    name: String,
}

impl DatabaseSettings {
    /// The MongoDB connection string
    pub fn uri(&self) -> &Secret<String> {
        &self.uri
    }
    /// The database holding the communications collection
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct EmailSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    #[serde(default, deserialize_with = "deserialize_bool_from_anything")]
    secure: bool,
    #[serde(
        default = "default_true",
        deserialize_with = "deserialize_bool_from_anything"
    )]
    require_tls: bool,
    username: String,
    password: Secret<String>,
    #[serde(default)]
    domain: Option<String>,
    from_name: String,
    admin: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    timeout_milliseconds: u64,
    #[serde(default)]
    dkim_private_key: Option<Secret<String>>,
    #[serde(default)]
    dkim_selector: Option<String>,
}

impl EmailSettings {
    /// SMTP server host
    pub fn host(&self) -> &str {
        &self.host
    }
    pub fn port(&self) -> u16 {
        self.port
    }
    /// Connect with implicit TLS
    pub fn secure(&self) -> bool {
        self.secure
    }
    /// Refuse to send unless the connection is upgraded with STARTTLS
    pub fn require_tls(&self) -> bool {
        self.require_tls
    }
    /// SMTP login, also the sender address
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn password(&self) -> &Secret<String> {
        &self.password
    }
    /// Mail domain, either configured or taken from the sender address
    pub fn domain(&self) -> anyhow::Result<String> {
        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            return Ok(domain.to_string());
        }
        self.username
            .split_once('@')
            .map(|(_, domain)| domain.to_string())
            .filter(|domain| !domain.is_empty())
            .context("No email domain configured and the sender address has none")
    }
    /// Display name of the sender
    pub fn from_name(&self) -> &str {
        &self.from_name
    }
    /// The mailbox that receives submission notifications
    pub fn admin(&self) -> anyhow::Result<EmailAddress> {
        self.admin
            .parse()
            .map_err(|e| anyhow::anyhow!("Failed to parse admin email address: {}", e))
    }
    /// Connection timeout for the SMTP server
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
    /// DKIM private key and selector, when both are set
    pub fn dkim(&self) -> Option<(&Secret<String>, &str)> {
        use secrecy::ExposeSecret;

        let key = self
            .dkim_private_key
            .as_ref()
            .filter(|k| !k.expose_secret().is_empty())?;
        let selector = self.dkim_selector.as_deref().filter(|s| !s.is_empty())?;
        Some((key, selector))
    }
}

#[derive(Debug, Deserialize)]
pub struct SiteSettings {
    domain: String,
    #[serde(default)]
    support_phone: Option<String>,
}

impl SiteSettings {
    /// Values rendered into outgoing emails
    pub fn details(&self, email: &EmailSettings) -> anyhow::Result<SiteDetails> {
        Ok(SiteDetails {
            domain: self.domain.clone(),
            mail_domain: email.domain()?,
            support_phone: self.support_phone.clone().filter(|p| !p.is_empty()),
        })
    }
}

/// Switches for the intake endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeSettings {
    /// Store newsletter subscriptions, not just email them
    #[serde(default = "default_true")]
    pub persist_newsletter: bool,
    /// Apply the browser form rules to ambassador applications server side
    #[serde(default)]
    pub strict_validation: bool,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            persist_newsletter: true,
            strict_validation: false,
        }
    }
}
