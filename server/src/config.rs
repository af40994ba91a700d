use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SOLVER_URL: &str = "http://flaresolverr:8191/v1";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid FLARESOLVERR_URL '{url}': {source}")]
    InvalidSolverUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("FLARESOLVERR_URL must start with 'http://' or 'https://', got '{0}'")]
    UnsupportedScheme(String),
    #[error("invalid LISTEN_ADDR '{value}': {source}")]
    InvalidListenAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Startup configuration, read once in `main` before the server starts.
#[derive(Debug, Clone)]
pub struct Config {
    pub solver_url: String,
    pub listen_addr: SocketAddr,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let solver_url =
            lookup("FLARESOLVERR_URL").unwrap_or_else(|| DEFAULT_SOLVER_URL.to_string());
        match Url::parse(&solver_url) {
            Ok(parsed_url) => {
                if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                    return Err(ConfigError::UnsupportedScheme(solver_url));
                }
            }
            Err(source) => {
                return Err(ConfigError::InvalidSolverUrl {
                    url: solver_url,
                    source,
                })
            }
        }

        let listen_value =
            lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: listen_value.clone(),
                source,
            })?;

        let is_production = lookup("APP_ENV").as_deref() == Some("production");

        Ok(Self {
            solver_url,
            listen_addr,
            is_production,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn solver_url_defaults_to_flaresolverr_service() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.solver_url, "http://flaresolverr:8191/v1");
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(!config.is_production);
    }

    #[test]
    fn overrides_are_kept_verbatim() {
        let config = config_with(&[
            ("FLARESOLVERR_URL", "https://solver.internal:9000/v1"),
            ("LISTEN_ADDR", "127.0.0.1:9090"),
            ("APP_ENV", "production"),
        ])
        .unwrap();
        assert_eq!(config.solver_url, "https://solver.internal:9000/v1");
        assert_eq!(config.listen_addr.port(), 9090);
        assert!(config.is_production);
    }

    #[test]
    fn rejects_non_http_solver_url() {
        let err = config_with(&[("FLARESOLVERR_URL", "ftp://solver/v1")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(_)));
    }

    #[test]
    fn rejects_unparseable_solver_url() {
        let err = config_with(&[("FLARESOLVERR_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSolverUrl { .. }));
    }

    #[test]
    fn rejects_bad_listen_addr() {
        let err = config_with(&[("LISTEN_ADDR", "localhost")]).unwrap_err();
        assert!(err.to_string().contains("LISTEN_ADDR"));
    }
}
