//! Application configuration loaded from environment variables.

use std::collections::HashMap;
use std::env;

use agora_infra::DatabaseConfig;

const DEFAULT_CREDENTIALS: &str = "user:password,admin:admin";

/// Configuration errors. Any of these aborts start-up.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("AUTH_CREDENTIALS entry {0:?} is not a name:password pair")]
    MalformedCredential(String),

    #[error("AUTH_CREDENTIALS defines no accounts")]
    NoCredentials,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub auth: AuthConfig,
}

/// Static Basic-auth accounts, username to password.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub credentials: HashMap<String, String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = match env::var("DATABASE_URL").ok() {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_var("DB_MAX_CONNECTIONS", 100)?,
                min_connections: parse_var("DB_MIN_CONNECTIONS", 10)?,
                auto_migrate: parse_flag("DB_AUTO_MIGRATE", true)?,
            }),
            None => None,
        };

        let credentials =
            env::var("AUTH_CREDENTIALS").unwrap_or_else(|_| DEFAULT_CREDENTIALS.to_string());

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080)?,
            database,
            auth: AuthConfig::parse(&credentials)?,
        })
    }
}

impl AuthConfig {
    /// Parse `name:password` pairs separated by commas.
    /// Format: AUTH_CREDENTIALS=user:password,admin:admin
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut credentials = HashMap::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.split_once(':') {
                Some((name, password)) if !name.is_empty() => {
                    credentials.insert(name.to_string(), password.to_string());
                }
                _ => return Err(ConfigError::MalformedCredential(entry.to_string())),
            }
        }

        if credentials.is_empty() {
            return Err(ConfigError::NoCredentials);
        }

        Ok(Self { credentials })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

fn parse_flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidValue { name, value }),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_credentials_parse() {
        let auth = AuthConfig::parse(DEFAULT_CREDENTIALS).unwrap();
        assert_eq!(auth.credentials.len(), 2);
        assert_eq!(auth.credentials["user"], "password");
        assert_eq!(auth.credentials["admin"], "admin");
    }

    #[test]
    fn test_password_keeps_extra_colons() {
        let auth = AuthConfig::parse(" ops:a:b , ").unwrap();
        assert_eq!(auth.credentials.get("ops").map(String::as_str), Some("a:b"));
    }

    #[test]
    fn test_malformed_credentials_are_rejected() {
        assert!(matches!(
            AuthConfig::parse("user"),
            Err(ConfigError::MalformedCredential(_))
        ));
        assert!(matches!(
            AuthConfig::parse(":secret"),
            Err(ConfigError::MalformedCredential(_))
        ));
        assert!(matches!(AuthConfig::parse(" , "), Err(ConfigError::NoCredentials)));
    }
}
