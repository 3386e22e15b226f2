//! Central module for application-wide configuration settings.
//!
//! Configuration comes from environment variables: the listen address and an
//! optional path to a JSON store document. Unset variables fall back to
//! development defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Runtime settings for the backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// JSON store document to persist against. `None` runs the in-memory
    /// demo store.
    pub store_path: Option<PathBuf>,
}

/// Problems reading the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var("VOLUNHUB_ADDR").ok(),
            env::var_os("VOLUNHUB_STORE").map(PathBuf::from),
        )
    }

    fn from_vars(addr: Option<String>, store_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let listen_addr = match addr {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "VOLUNHUB_ADDR",
                value,
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };
        Ok(Self {
            listen_addr,
            store_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert!(config.store_path.is_none());
    }

    #[test]
    fn explicit_values_override_the_defaults() {
        let config = Config::from_vars(
            Some("0.0.0.0:8080".into()),
            Some(PathBuf::from("/var/lib/volunhub/store.json")),
        )
        .unwrap();
        assert_eq!(config.listen_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(
            config.store_path.as_deref(),
            Some(std::path::Path::new("/var/lib/volunhub/store.json"))
        );
    }

    #[test]
    fn an_unparseable_address_is_rejected() {
        let err = Config::from_vars(Some("not-an-address".into()), None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "VOLUNHUB_ADDR",
                value: "not-an-address".into()
            }
        );
    }
}
