use std::env;
use std::time::Duration;

use crate::utils::error::{AppError, AppResult};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;

// Runtime settings read from the environment (.env is loaded by main)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Internal("DATABASE_URL must be set".into()))?;

        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let acquire_timeout_secs =
            parse_var("DATABASE_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS)?;

        Ok(AppConfig {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    parse_value(name, env::var(name).ok(), default)
}

fn parse_value<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> AppResult<T> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Internal(format!("{} has an invalid value: {}", name, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_uses_default() {
        let value: u32 = parse_value("DATABASE_MAX_CONNECTIONS", None, 10).unwrap();
        assert_eq!(value, 10);
    }

    #[test]
    fn present_value_is_parsed() {
        let value: u64 =
            parse_value("DATABASE_ACQUIRE_TIMEOUT_SECS", Some(" 7 ".to_string()), 3).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn invalid_value_is_an_error() {
        let result: AppResult<u32> =
            parse_value("DATABASE_MAX_CONNECTIONS", Some("lots".to_string()), 10);
        assert!(result.is_err());
    }
}
