use std::path::Path;

use anyhow::Context as _;
use serde_aux::field_attributes::deserialize_number_from_string;
use session_shape::time::Seconds;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    pub session: SessionSettings,
    pub tracker: TrackerSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SessionSettings {
    /// Lifetime given to sessions built from tokens that carry no `exp`
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_age_secs: u64,
    /// Reject sessions and tokens that do not name the session they belong to
    pub require_session_id: bool,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct TrackerSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub record_lifetime_secs: u64,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    pub name: String,
    /// Used when `RUST_LOG` is not set
    pub env_filter: String,
}

impl SessionSettings {
    pub fn max_age(&self) -> Seconds {
        self.max_age_secs.into()
    }
}

impl TrackerSettings {
    pub fn record_lifetime(&self) -> Seconds {
        self.record_lifetime_secs.into()
    }
}

/// Loads the configuration from the `configuration` folder in the current
/// directory for the environment selected by `APP_ENVIRONMENT`
pub fn get_configuration() -> anyhow::Result<Configuration> {
    let base_path = std::env::current_dir().context("failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)
        .context("failed to parse APP_ENVIRONMENT")?;

    get_configuration_from(&configuration_directory, environment)
}

pub fn get_configuration_from(
    configuration_directory: &Path,
    environment: Environment,
) -> anyhow::Result<Configuration> {
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.toml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_SESSION__MAX_AGE_SECS=60 would set `Settings.session.max_age_secs`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("failed to load configuration from {configuration_directory:?}"))?;

    settings
        .try_deserialize::<Configuration>()
        .context("failed to deserialize configuration")
}

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
