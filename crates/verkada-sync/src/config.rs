//! Driver configuration

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use verkada_client::BASE_URL;
use verkada_core::VerkadaError;

pub const ENV_PREFIX: &str = "BATON";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means no local timeout; cancellation is the only bound
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_membership_concurrency")]
    pub membership_concurrency: usize,
}

/// Values given on the command line; they win over every other source
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub membership_concurrency: Option<u64>,
}

fn default_base_url() -> String {
    BASE_URL.to_string()
}

fn default_membership_concurrency() -> usize {
    1
}

impl Settings {
    pub fn load(overrides: &Overrides) -> Result<Self> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX), overrides)
    }

    fn load_from(environment: Environment, overrides: &Overrides) -> Result<Self> {
        let config = Config::builder()
            .set_default("api_key", "")?
            .set_default("base_url", BASE_URL)?
            .set_default("membership_concurrency", 1)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // BATON_API_KEY, BATON_BASE_URL, ...
            .add_source(
                environment
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api_key", overrides.api_key.clone())?
            .set_override_option("base_url", overrides.base_url.clone())?
            .set_override_option("request_timeout_secs", overrides.request_timeout_secs)?
            .set_override_option("membership_concurrency", overrides.membership_concurrency)?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn validate(&self) -> verkada_core::Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(VerkadaError::config_error(
                "api key is required, please provide it via --api-key flag or BATON_API_KEY environment variable",
            ));
        }

        if self.membership_concurrency == 0 {
            return Err(VerkadaError::config_error(
                "membership concurrency must be at least 1",
            ));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            request_timeout_secs: None,
            membership_concurrency: default_membership_concurrency(),
        }
    }
}
