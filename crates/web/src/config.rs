//! Server configuration from the environment

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use baghchal_core::{Error, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND: &str = "127.0.0.1";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// SQLite file; the in-memory store is used when unset
    pub database: Option<PathBuf>,
}

impl Config {
    /// Reads `PORT`, `BAGHCHAL_BIND` and `BAGHCHAL_DB`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::InvalidConfig(format!("PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let bind = lookup("BAGHCHAL_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .trim()
            .parse()
            .map_err(|_| Error::InvalidConfig(format!("BAGHCHAL_BIND is not an IP address: {}", bind)))?;

        let database = lookup("BAGHCHAL_DB")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            port,
            database,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("BAGHCHAL_BIND", "0.0.0.0"),
            ("BAGHCHAL_DB", "games.db"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.database, Some(PathBuf::from("games.db")));
    }

    #[test]
    fn test_invalid_port() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(Error::InvalidConfig(_))
        ));
    }
}
