use crate::api_client::{ApiClient, RequestFixture, TransportError};
use crate::domain::Credentials;
use secrecy::Secret;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub api: ApiSettings,
    pub credentials: CredentialSettings,
    pub fixtures: FixtureSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub origin: String,
    pub referer: String,
    pub user_agent: String,
    pub accept_language: String,
    /// Left unset, the HTTP client's own default applies.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub timeout_milliseconds: Option<u64>,
}

impl ApiSettings {
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_milliseconds
            .map(std::time::Duration::from_millis)
    }

    pub fn request_fixture(&self) -> Result<RequestFixture, TransportError> {
        RequestFixture::new(self)
    }

    pub fn client(&self) -> Result<ApiClient, TransportError> {
        ApiClient::new(self.base_url.clone(), self.request_fixture()?, self.timeout())
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct CredentialSettings {
    pub email: String,
    pub password: Secret<String>,
}

impl CredentialSettings {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Identifiers the remote platform is expected to already know about.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct FixtureSettings {
    /// An e-mail that is already registered, used by the duplicate-key scenarios.
    pub existing_email: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub super_admin_client_id: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub active_client_id: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub inactive_client_id: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub unknown_client_id: i64,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
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
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_CREDENTIALS__PASSWORD=secret` would set `Settings.credentials.password`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible targets for a suite run.
#[derive(Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Dev,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `dev`.",
                other
            )),
        }
    }
}
