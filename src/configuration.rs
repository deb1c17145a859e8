use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = crate::http_client::DEFAULT_TIMEOUT.as_secs();
pub const DEFAULT_ALLURE_RESULTS_DIR: &str = "allure-results";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{0} is not set in environment variables.")]
    Missing(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(e: config::ConfigError) -> Self {
        ConfigurationError::Invalid(e.to_string())
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub account: AccountSettings,
    pub bookstore: BookstoreSettings,
    pub request_timeout_seconds: u64,
    pub allure_results_dir: PathBuf,
}

/// What the authentication fixture needs to obtain a token.
#[derive(Clone, Debug)]
pub struct AccountSettings {
    pub base_url: String,
    pub username: String,
    pub password: Secret<String>,
}

#[derive(Clone, Debug)]
pub struct BookstoreSettings {
    pub base_url: String,
    pub user_id: String,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

// Environment keys are lowercased by `config`, hence the field names.
#[derive(serde::Deserialize, Debug, Default)]
struct RawSettings {
    base_url_account: Option<String>,
    base_url_bookstore: Option<String>,
    bookstore_username: Option<String>,
    bookstore_password: Option<Secret<String>>,
    bookstore_user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    request_timeout_seconds: Option<u64>,
    allure_results_dir: Option<String>,
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigurationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigurationError::Missing(key))
}

impl TryFrom<RawSettings> for Settings {
    type Error = ConfigurationError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let account = AccountSettings {
            base_url: required(raw.base_url_account, "BASE_URL_ACCOUNT")?,
            username: required(raw.bookstore_username, "BOOKSTORE_USERNAME")?,
            password: raw
                .bookstore_password
                .filter(|p| !p.expose_secret().trim().is_empty())
                .ok_or(ConfigurationError::Missing("BOOKSTORE_PASSWORD"))?,
        };
        let bookstore = BookstoreSettings {
            base_url: required(raw.base_url_bookstore, "BASE_URL_BOOKSTORE")?,
            user_id: required(raw.bookstore_user_id, "BOOKSTORE_USER_ID")?,
        };
        let request_timeout_seconds = match raw.request_timeout_seconds {
            Some(0) => {
                return Err(ConfigurationError::Invalid(
                    "REQUEST_TIMEOUT_SECONDS must be greater than zero".into(),
                ));
            }
            Some(seconds) => seconds,
            None => DEFAULT_REQUEST_TIMEOUT_SECONDS,
        };
        Ok(Settings {
            account,
            bookstore,
            request_timeout_seconds,
            allure_results_dir: raw
                .allure_results_dir
                .unwrap_or_else(|| DEFAULT_ALLURE_RESULTS_DIR.to_string())
                .into(),
        })
    }
}

/// Read the suite configuration from an optional `configuration.yaml`
/// in the working directory, overridden by environment variables.
/// A `.env` file is loaded into the process environment first, if present.
pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    dotenvy::dotenv().ok();
    build_settings(config::Environment::default())
}

pub fn build_settings(environment: config::Environment) -> Result<Settings, ConfigurationError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigurationError::Invalid(format!("Failed to determine the current directory: {e}")))?;
    let settings = config::Config::builder()
        .add_source(config::File::from(base_path.join("configuration.yaml")).required(false))
        .add_source(environment)
        .build()?;
    let raw = settings.try_deserialize::<RawSettings>()?;
    raw.try_into()
}
