use std::env;
use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8082";
pub const DEFAULT_ADMIN_URL: &str = "http://localhost:8085";
pub const DEFAULT_USERS_URL: &str = "http://localhost:8080";
pub const DEFAULT_ORDERS_URL: &str = "http://localhost:8093";
pub const DEFAULT_STATE_FILE: &str = ".shop-client.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL ({value}): {source}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        source: url::ParseError,
    },
}

/// Where each backend service lives and where client state is persisted.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_url: Url,
    pub admin_url: Url,
    pub users_url: Url,
    pub orders_url: Url,
    pub state_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from an arbitrary variable source; unset or blank
    /// variables fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |var: &str, default: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let url = |var: &'static str, default: &str| {
            let raw = value(var, default);
            Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
                var,
                value: raw,
                source,
            })
        };

        Ok(Self {
            catalog_url: url("SHOP_CATALOG_URL", DEFAULT_CATALOG_URL)?,
            admin_url: url("SHOP_ADMIN_URL", DEFAULT_ADMIN_URL)?,
            users_url: url("SHOP_USERS_URL", DEFAULT_USERS_URL)?,
            orders_url: url("SHOP_ORDERS_URL", DEFAULT_ORDERS_URL)?,
            state_file: PathBuf::from(value("SHOP_STATE_FILE", DEFAULT_STATE_FILE)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_local_services() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.catalog_url.port(), Some(8082));
        assert_eq!(config.admin_url.port(), Some(8085));
        assert_eq!(config.orders_url.port(), Some(8093));
        assert_eq!(config.state_file, PathBuf::from(".shop-client.json"));
    }

    #[test]
    fn overrides_are_used() {
        let vars: HashMap<&str, &str> = [
            ("SHOP_ORDERS_URL", "https://orders.example.com"),
            ("SHOP_STATE_FILE", "/tmp/state.json"),
            ("SHOP_USERS_URL", "   "),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.orders_url.host_str(), Some("orders.example.com"));
        assert_eq!(config.users_url.port(), Some(8080));
        assert_eq!(config.state_file, PathBuf::from("/tmp/state.json"));
    }

    #[test]
    fn bad_url_is_rejected() {
        let err =
            Config::from_lookup(|k| (k == "SHOP_CATALOG_URL").then(|| "not a url".to_string()))
                .unwrap_err();
        assert!(err.to_string().starts_with("SHOP_CATALOG_URL is not a valid URL"));
    }
}
