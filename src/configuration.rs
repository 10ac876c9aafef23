use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

use crate::{domain::provider::Provider, error::ConfigurationError};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub api_keys: ApiKeySettings,
    pub endpoints: EndpointSettings,
    pub retry: RetrySettings,
    pub discovery: DiscoverySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ApiKeySettings {
    pub crunchbase: Option<String>,
    pub apollo: Option<String>,
    pub hunter: Option<String>,
}

impl ApiKeySettings {
    pub fn require(&self, provider: Provider) -> Result<String, ConfigurationError> {
        let key = match provider {
            Provider::Crunchbase => &self.crunchbase,
            Provider::Apollo => &self.apollo,
            Provider::Hunter => &self.hunter,
        };

        match key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key.to_string()),
            _ => Err(ConfigurationError::MissingCredential(provider)),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct EndpointSettings {
    pub crunchbase: String,
    pub apollo: String,
    pub hunter: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RetrySettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_attempts: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub backoff_base_seconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_wait_seconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_seconds: u64,
}

impl RetrySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct DiscoverySettings {
    pub search_terms: Vec<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub page_size: u32,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub max_companies: Option<usize>,
    pub contact_titles: Vec<String>,
    pub contact_seniorities: Vec<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub contacts_per_page: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub fallback_per_page: u32,
}

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

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to read current dir: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // E.g. `APP_API_KEYS__HUNTER=...` sets `Settings.api_keys.hunter`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}
