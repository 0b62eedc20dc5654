use std::time::Duration;

use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::mail_client::MailClient;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub mail_provider: MailProviderSettings,
    #[serde(default)]
    pub subscription: SubscriptionPolicy,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct MailProviderSettings {
    pub base_url: String,
    pub public_key: Option<SecretString>,
    pub private_key: Option<SecretString>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_ms: u64,
}

impl MailProviderSettings {
    pub fn client(&self) -> Result<MailClient, anyhow::Error> {
        MailClient::new(&self.base_url, self.timeout())
    }

    pub fn credentials(&self) -> ProviderCredentials {
        ProviderCredentials {
            public_key: self.public_key.clone(),
            private_key: self.private_key.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// API keys as configured for the process. Either may be missing; whether
/// that is an error is decided per request by [`SubscriptionPolicy`].
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub public_key: Option<SecretString>,
    pub private_key: Option<SecretString>,
}

/// Switches between the strict and the lenient subscription handler.
#[derive(serde::Deserialize, Debug, Clone, Copy)]
pub struct SubscriptionPolicy {
    #[serde(default = "enabled")]
    pub enforce_required_fields: bool,
    #[serde(default = "enabled")]
    pub handle_preflight: bool,
}

impl Default for SubscriptionPolicy {
    fn default() -> Self {
        Self {
            enforce_required_fields: true,
            handle_preflight: true,
        }
    }
}

fn enabled() -> bool {
    true
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not supported environment. Try to use `local` or `production`",
            )),
        }
    }
}

// Set by the hosting environment, outside of the APP_ prefix.
const PUBLIC_KEY_VAR: &str = "MAILGUN_PUBLIC_KEY";
const PRIVATE_KEY_VAR: &str = "MAILGUN_PRIVATE_KEY";

pub fn get_configuration() -> Result<Settings, anyhow::Error> {
    let base_path = std::env::current_dir()?;
    let conf_dir = base_path.join("configuration");
    let env: Environment = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = config::Config::builder()
        .add_source(config::File::from(conf_dir.join("base")).required(true))
        .add_source(config::File::from(conf_dir.join(env.as_str())).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .prefix_separator("_"),
        )
        .set_override_option("mail_provider.public_key", non_empty_var(PUBLIC_KEY_VAR))?
        .set_override_option("mail_provider.private_key", non_empty_var(PRIVATE_KEY_VAR))?
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
