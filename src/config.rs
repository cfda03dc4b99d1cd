use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::{Error, Result};

const ENV_PREFIX: &str = "SD_ANKI";
const DEFAULT_LOOKUP_URL: &str = "https://www.spanishdict.com/translate";

/// Runtime settings, layered from built-in defaults and `SD_ANKI_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub lookup_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub asset_scheme: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load(env: Environment) -> Result<Self> {
        let settings: Settings = Config::builder()
            .set_default("lookup_url", DEFAULT_LOOKUP_URL)?
            .set_default("timeout_secs", 30)?
            .set_default(
                "user_agent",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("asset_scheme", "https")?
            .set_default("log_format", "pretty")?
            .add_source(env)
            .build()?
            .try_deserialize()?;
        settings.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".into()));
        }
        if url::Url::parse(&self.lookup_url).is_err() {
            return Err(Error::Config(format!(
                "lookup_url is not a valid url: {}",
                self.lookup_url
            )));
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Test hook: load from an explicit variable map instead of the process environment.
    #[cfg(test)]
    pub fn from_map(vars: std::collections::HashMap<String, String>) -> Result<Self> {
        Self::load(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(Some(vars)),
        )
    }
}
