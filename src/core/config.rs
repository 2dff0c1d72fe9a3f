//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::error::CogsError;

pub const DEFAULT_API_URL: &str = "https://graph.cofactr.com";

pub const ENV_API_KEY: &str = "COFACTR_API_KEY";
pub const ENV_CLIENT_ID: &str = "COFACTR_CLIENT_ID";
pub const ENV_API_URL: &str = "COFACTR_API_URL";
pub const ENV_PLATFORM_TOKEN: &str = "ALLSPICE_AUTH_TOKEN";

/// Runtime configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cofactr API key
    pub api_key: Option<String>,

    /// Cofactr client identifier
    pub client_id: Option<String>,

    /// Base URL of the pricing API
    pub api_url: Option<String>,

    /// Token for the hosting platform's API; not used for pricing
    pub platform_token: Option<String>,
}

/// Credentials required to call the pricing API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub client_id: String,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. User config (~/.config/cofactr-cogs/config.yaml)
        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match serde_yml::from_str::<Config>(&contents) {
                        Ok(user) => config.merge(user),
                        Err(e) => {
                            tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => tracing::warn!("Could not read {}: {}", path.display(), e),
                }
            }
        }

        // 3. Environment variables
        config.merge(Self::from_env(|key| std::env::var(key).ok()));

        config
    }

    /// Build a config layer from environment lookups. Empty values are unset.
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Config {
            api_key: get(ENV_API_KEY),
            client_id: get(ENV_CLIENT_ID),
            api_url: get(ENV_API_URL),
            platform_token: get(ENV_PLATFORM_TOKEN),
        }
    }

    fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cofactr-cogs")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.client_id.is_some() {
            self.client_id = other.client_id;
        }
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.platform_token.is_some() {
            self.platform_token = other.platform_token;
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Get the pricing API credentials, naming whatever is missing
    pub fn credentials(&self) -> Result<Credentials, CogsError> {
        match (&self.api_key, &self.client_id) {
            (Some(api_key), Some(client_id)) => Ok(Credentials {
                api_key: api_key.clone(),
                client_id: client_id.clone(),
            }),
            (api_key, client_id) => {
                let mut missing = Vec::new();
                if api_key.is_none() {
                    missing.push(ENV_API_KEY);
                }
                if client_id.is_none() {
                    missing.push(ENV_CLIENT_ID);
                }
                Err(CogsError::config_with_help(
                    format!("Missing pricing API credentials: {}", missing.join(", ")),
                    format!("Set the {} and {} environment variables", ENV_API_KEY, ENV_CLIENT_ID),
                ))
            }
        }
    }
}
