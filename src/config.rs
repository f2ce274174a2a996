use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::scores::catalog::DEFAULT_MAX_DURATION_SECS;

const DEFAULT_JWT_SECRET: &str = "default-secret-change-this";

/// Runtime settings read from the environment at start-up
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_game_duration_secs: i32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set, using the built-in development secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            port: parse_or(&lookup, "PORT", 3000),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            jwt_secret,
            jwt_expiration_hours: parse_or(&lookup, "JWT_EXPIRATION_HOURS", 1),
            cors_origins,
            environment: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            max_game_duration_secs: parse_or(
                &lookup,
                "MAX_GAME_DURATION_SECS",
                DEFAULT_MAX_DURATION_SECS,
            ),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, None);
        assert_eq!(config.jwt_secret, DEFAULT_JWT_SECRET);
        assert_eq!(config.jwt_expiration_hours, 1);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.environment, "development");
        assert_eq!(config.max_game_duration_secs, 300);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/scores"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("APP_ENV", "production"),
            ("MAX_GAME_DURATION_SECS", "60"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/scores")
        );
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.environment, "production");
        assert_eq!(config.max_game_duration_secs, 60);
    }

    #[test]
    fn test_unparsable_value_falls_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("DATABASE_URL", "")]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, None);
    }
}
