use std::{env, time::Duration};

use anyhow::Context;

use crate::models::StatusPolicy;

/// Local database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://orders.db?mode=rwc";

/// How order creation reacts when the menu service cannot be reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogMode {
    /// Treat the failure as an empty menu, so every requested item is unknown.
    #[default]
    Lenient,
    /// Report the failure as `502 Bad Gateway`.
    Strict,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub menu_service_url: String,
    pub catalog_timeout: Duration,
    pub catalog_mode: CatalogMode,
    pub status_policy: StatusPolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from any variable source; unset and empty values take defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host = var("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match var("APP_PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("APP_PORT must be a port number, got {port:?}"))?,
            None => 5001,
        };
        let menu_service_url =
            var("MENU_SERVICE_URL").unwrap_or_else(|| "http://localhost:5000".to_string());
        let catalog_timeout = match var("CATALOG_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.trim()
                    .parse::<u64>()
                    .context("CATALOG_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => Duration::from_secs(5),
        };
        let catalog_mode = match var("CATALOG_STRICT") {
            Some(flag) if parse_flag(&flag)? => CatalogMode::Strict,
            _ => CatalogMode::Lenient,
        };
        let status_policy = match var("ORDER_STATUS_POLICY") {
            Some(policy) => policy.parse()?,
            None => StatusPolicy::default(),
        };

        Ok(Self {
            database_url,
            host,
            port,
            menu_service_url,
            catalog_timeout,
            catalog_mode,
            status_policy,
        })
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("CATALOG_STRICT must be true or false, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let defaults = config(&[]).unwrap();
        assert_eq!(defaults.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(defaults.port, 5001);
        assert_eq!(defaults.menu_service_url, "http://localhost:5000");
        assert_eq!(defaults.catalog_timeout, Duration::from_secs(5));
        assert_eq!(defaults.catalog_mode, CatalogMode::Lenient);
        assert_eq!(defaults.status_policy, StatusPolicy::Permissive);
    }

    #[test]
    fn explicit_values_are_used() {
        let explicit = config(&[
            ("DATABASE_URL", "postgres://localhost/orders"),
            ("APP_PORT", "8080"),
            ("CATALOG_TIMEOUT_SECS", "2"),
            ("CATALOG_STRICT", "TRUE"),
            ("ORDER_STATUS_POLICY", "strict"),
        ])
        .unwrap();
        assert_eq!(explicit.database_url, "postgres://localhost/orders");
        assert_eq!(explicit.port, 8080);
        assert_eq!(explicit.catalog_timeout, Duration::from_secs(2));
        assert_eq!(explicit.catalog_mode, CatalogMode::Strict);
        assert_eq!(explicit.status_policy, StatusPolicy::Strict);

        let lenient = config(&[("CATALOG_STRICT", "0")]).unwrap();
        assert_eq!(lenient.catalog_mode, CatalogMode::Lenient);
    }

    #[test]
    fn invalid_values_fail() {
        for pairs in [
            [("APP_PORT", "abc")],
            [("APP_PORT", "70000")],
            [("CATALOG_STRICT", "maybe")],
            [("CATALOG_TIMEOUT_SECS", "soon")],
            [("ORDER_STATUS_POLICY", "chaotic")],
        ] {
            assert!(config(&pairs).is_err(), "{pairs:?} should be rejected");
        }
    }
}
