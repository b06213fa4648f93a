use std::env;
use std::time::Duration;

use crate::error::{DevdashError, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Upstream APIs
    pub hdro_api_key: String,
    pub hdro_base_url: String,
    pub gho_base_url: String,
    pub world_bank_api_url: String,
    pub world_bank_search_url: String,

    // Document store. `None` runs against the in-memory store.
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Cache
    pub cache_ttl: Duration,
    pub catalog_cache_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            hdro_api_key: required_env("HDRO_API_KEY")?,
            hdro_base_url: env_or("HDRO_BASE_URL", "https://hdrdata.org/api"),
            gho_base_url: env_or("GHO_BASE_URL", "https://ghoapi.azureedge.net/api"),
            world_bank_api_url: env_or("WORLD_BANK_API_URL", "https://api.worldbank.org/v2"),
            world_bank_search_url: env_or(
                "WORLD_BANK_SEARCH_URL",
                "https://search.worldbank.org/api/v2",
            ),
            mongodb_uri: env::var("MONGODB_URI").ok().filter(|v| !v.trim().is_empty()),
            mongodb_database: env_or("MONGODB_DATABASE", "devdash"),
            web_host: env_or("WEB_HOST", "0.0.0.0"),
            web_port: parsed_env("WEB_PORT", 3000)?,
            cache_ttl: Duration::from_secs(parsed_env("CACHE_TTL_SECS", 3600)?),
            catalog_cache_ttl: Duration::from_secs(parsed_env("CATALOG_CACHE_TTL_SECS", 86_400)?),
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| DevdashError::Config(format!("{key} environment variable is required")))
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DevdashError::Config(format!("{key} must be a number, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_env_falls_back_to_default() {
        let port: u16 = parsed_env("DEVDASH_TEST_UNSET_PORT", 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn required_env_reports_missing_key() {
        let err = required_env("DEVDASH_TEST_MISSING_KEY").unwrap_err();
        assert!(err.to_string().contains("DEVDASH_TEST_MISSING_KEY"));
    }
}
