use std::time::Duration;

use thiserror::Error;

use crate::backend::http::DEFAULT_USER_AGENT;
use crate::retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Which property age a saved favorite carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteAgePolicy {
    /// The age entered with the estimate
    #[default]
    FromEstimate,
    /// A uniformly random age in 1..=20, ignoring the form
    Simulated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub backend_url: String,
    pub location_attempts: u32,
    pub retry_backoff_ms: u64,
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
    pub log_level: String,
    pub favorite_age: FavoriteAgePolicy,
}

impl ClientConfig {
    pub fn location_retry(&self) -> RetryPolicy {
        RetryPolicy::immediate(self.location_attempts).with_backoff(self.retry_backoff_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            location_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff_ms: 0,
            request_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: "info".to_string(),
            favorite_age: FavoriteAgePolicy::FromEstimate,
        }
    }
}

/// Load configuration from the environment, reading `.env` first if present.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_config(|key| std::env::var(key))
}

fn build_config<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = ClientConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let location_attempts = match lookup("PRICE_SCOUT_LOCATION_ATTEMPTS") {
        Ok(raw) => {
            let n = raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "PRICE_SCOUT_LOCATION_ATTEMPTS".to_string(),
                    reason: e.to_string(),
                })?;
            if n == 0 {
                return Err(ConfigError::InvalidEnvVar {
                    var: "PRICE_SCOUT_LOCATION_ATTEMPTS".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            n
        }
        Err(_) => defaults.location_attempts,
    };

    let retry_backoff_ms = parse_u64("PRICE_SCOUT_RETRY_BACKOFF_MS")?.unwrap_or(0);
    let request_timeout = parse_u64("PRICE_SCOUT_REQUEST_TIMEOUT_SECS")?
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let favorite_age = parse_favorite_age(&or_default("PRICE_SCOUT_FAVORITE_AGE", "estimate"))?;

    Ok(ClientConfig {
        backend_url: or_default("PRICE_SCOUT_BACKEND_URL", &defaults.backend_url),
        location_attempts,
        retry_backoff_ms,
        request_timeout,
        user_agent: or_default("PRICE_SCOUT_USER_AGENT", &defaults.user_agent),
        log_level: or_default("PRICE_SCOUT_LOG_LEVEL", &defaults.log_level),
        favorite_age,
    })
}

fn parse_favorite_age(s: &str) -> Result<FavoriteAgePolicy, ConfigError> {
    match s.trim() {
        "estimate" => Ok(FavoriteAgePolicy::FromEstimate),
        "simulated" => Ok(FavoriteAgePolicy::Simulated),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICE_SCOUT_FAVORITE_AGE".to_string(),
            reason: format!("expected `estimate` or `simulated`, got `{other}`"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn empty_env_yields_defaults() {
        let map = HashMap::new();
        let config = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.location_retry().max_attempts(), 3);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn overrides_are_applied() {
        let mut map = HashMap::new();
        map.insert("PRICE_SCOUT_BACKEND_URL", "http://backend:8080");
        map.insert("PRICE_SCOUT_LOCATION_ATTEMPTS", "5");
        map.insert("PRICE_SCOUT_RETRY_BACKOFF_MS", "250");
        map.insert("PRICE_SCOUT_REQUEST_TIMEOUT_SECS", "10");
        map.insert("PRICE_SCOUT_FAVORITE_AGE", "simulated");
        let config = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(config.backend_url, "http://backend:8080");
        assert_eq!(config.location_retry().max_attempts(), 5);
        assert_eq!(config.location_retry().backoff_base_ms(), 250);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.favorite_age, FavoriteAgePolicy::Simulated);
    }

    #[test]
    fn zero_timeout_means_none() {
        let mut map = HashMap::new();
        map.insert("PRICE_SCOUT_REQUEST_TIMEOUT_SECS", "0");
        let config = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let mut map = HashMap::new();
        map.insert("PRICE_SCOUT_LOCATION_ATTEMPTS", "0");
        let result = build_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICE_SCOUT_LOCATION_ATTEMPTS"),
            "expected InvalidEnvVar, got: {result:?}"
        );
    }

    #[test]
    fn unknown_favorite_age_is_rejected() {
        let mut map = HashMap::new();
        map.insert("PRICE_SCOUT_FAVORITE_AGE", "random");
        assert!(build_config(lookup_from_map(&map)).is_err());
    }
}
