use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/yelp_camp";
const DEFAULT_MAX_CONNECTIONS: &str = "5";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_STATIC_DIR: &str = "./public";

/// Settings the server needs at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
    /// Address the HTTP server listens on
    pub bind_address: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

/// Custom error type for configuration problems
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to something that does not parse
    #[error("Invalid value for {key}: {value:?}")]
    Invalid {
        /// Name of the offending variable
        key: &'static str,
        /// The value as found
        value: String,
    },
}

impl ServerConfig {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for unset keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value_or = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| {
                log::info!("{} not set, using default: {}", key, default);
                default.to_string()
            })
        };

        let max_connections = value_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        let bind_address = value_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS);

        Ok(Self {
            database_url: value_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            max_connections: parse("DATABASE_MAX_CONNECTIONS", max_connections)
                .and_then(|n: u32| non_zero("DATABASE_MAX_CONNECTIONS", n))?,
            bind_address: parse("BIND_ADDRESS", bind_address)?,
            static_dir: PathBuf::from(value_or("STATIC_DIR", DEFAULT_STATIC_DIR)),
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn non_zero(key: &'static str, n: u32) -> Result<u32, ConfigError> {
    if n == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: n.to_string(),
        });
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/yelp_camp");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.static_dir, PathBuf::from("./public"));
    }

    #[test]
    fn test_overrides_are_read() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/camps"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("STATIC_DIR", "/srv/public"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://db/camps");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.bind_address, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.static_dir, PathBuf::from("/srv/public"));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = ServerConfig::from_lookup(lookup_from(&[("BIND_ADDRESS", "not-an-address")]))
            .unwrap_err();
        assert!(err.to_string().contains("BIND_ADDRESS"));

        assert!(
            ServerConfig::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "0")])).is_err()
        );
        assert!(
            ServerConfig::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "many")]))
                .is_err()
        );
    }
}
