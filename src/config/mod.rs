use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

fn default_database_url() -> String {
    "sqlite://projectmanage.db".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:7000".to_string()
}

fn default_api_url() -> String {
    "http://127.0.0.1:7000".to_string()
}

fn default_uploader() -> String {
    "current user".to_string()
}

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Address the API server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL the terminal UI talks to
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Name recorded as the uploader of documents sent from the UI
    #[serde(default = "default_uploader")]
    pub uploader: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            bind_addr: default_bind_addr(),
            api_url: default_api_url(),
            uploader: default_uploader(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    let config = Config::load()?;
    log::debug!("Loaded configuration: {:?}", config);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let vars = vec![("BIND_ADDR".to_string(), "0.0.0.0:8080".to_string())];

        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.database_url, "sqlite://projectmanage.db");
        assert_eq!(config.api_url, "http://127.0.0.1:7000");
        assert_eq!(config.uploader, "current user");
    }
}
