//! Load configuration from the process environment.

use crate::config::types::{DbConfig, DEFAULT_MAX_CONNECTIONS};
use crate::error::ConfigError;

pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";

const REQUIRED: [&str; 5] = [DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME];

impl DbConfig {
    /// Read `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
    /// Fails if any of them is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DbConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED.iter().copied().filter(|k| get(*k).is_none()).collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        let port_raw = get(DB_PORT).unwrap_or_default();
        let port = port_raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
            var: DB_PORT,
            value: port_raw.clone(),
        })?;

        let max_connections = match get(DB_MAX_CONNECTIONS) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                var: DB_MAX_CONNECTIONS,
                value: raw.clone(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            host: get(DB_HOST).unwrap_or_default(),
            port,
            user: get(DB_USER).unwrap_or_default(),
            password: get(DB_PASSWORD).unwrap_or_default(),
            name: get(DB_NAME).unwrap_or_default(),
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn full() -> HashMap<String, String> {
        env(&[
            (DB_HOST, "localhost"),
            (DB_PORT, "5432"),
            (DB_USER, "postgres"),
            (DB_PASSWORD, "secret"),
            (DB_NAME, "devices"),
        ])
    }

    #[test]
    fn loads_all_required_values() {
        let vars = full();
        let cfg = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(cfg.host, "localhost");
        assert_eq!(cfg.port, 5432);
        assert_eq!(cfg.name, "devices");
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(
            cfg.dsn(),
            "host=localhost port=5432 user=postgres password=secret dbname=devices sslmode=disable"
        );
    }

    #[test]
    fn empty_and_missing_values_are_reported_together() {
        let mut vars = full();
        vars.remove(DB_HOST);
        vars.insert(DB_PASSWORD.into(), "".into());
        let err = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        match err {
            ConfigError::MissingVariables(names) => assert_eq!(names, vec![DB_HOST, DB_PASSWORD]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_port() {
        let mut vars = full();
        vars.insert(DB_PORT.into(), "postgres".into());
        let err = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn reads_optional_pool_size() {
        let mut vars = full();
        vars.insert(DB_MAX_CONNECTIONS.into(), "12".into());
        let cfg = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(cfg.max_connections, 12);

        vars.insert(DB_MAX_CONNECTIONS.into(), "many".into());
        assert!(matches!(
            DbConfig::from_lookup(|k| vars.get(k).cloned()),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn debug_output_hides_password() {
        let vars = full();
        let cfg = DbConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret"));
    }
}
