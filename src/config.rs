use std::net::SocketAddr;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("DATABASE_POOL_SIZE must be at least 1")]
    EmptyPool,
}

/// Runtime settings, read from the environment (and a `.env` file if one exists)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "Config::default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(rename = "database_pool_size", default = "Config::default_pool_size")]
    pub db_pool_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::load(::config::Environment::default())
    }

    /// Builds the settings from an explicit set of variables instead of the process environment
    pub fn from_vars(vars: ::config::Map<String, String>) -> Result<Self, ConfigError> {
        Self::load(::config::Environment::default().source(Some(vars)))
    }

    fn load(environment: ::config::Environment) -> Result<Self, ConfigError> {
        let settings: Config = ::config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        if settings.db_pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }

        Ok(settings)
    }

    fn default_bind_addr() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 3000))
    }

    fn default_pool_size() -> u32 {
        10
    }
}
