//! Client configuration
//!
//! Collected from command-line flags, with environment fallbacks for the
//! settings that usually differ per machine.

use crate::core::Mode;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Service address used when neither `--server` nor `WORDLE_SERVER_URL` is set
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000/";

/// Environment variable naming the service address
pub const SERVER_URL_ENV: &str = "WORDLE_SERVER_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server URL {url:?}: {reason}")]
    InvalidServer { url: String, reason: String },
    #[error("timeout must be positive")]
    ZeroTimeout,
}

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the game service, always ending in `/`
    pub server: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Strategy modes offered in the mode selector
    pub strategies: Vec<String>,
    /// Log destination; `None` logs to stderr
    pub log_file: Option<PathBuf>,
    /// Number of `-v` flags
    pub verbosity: u8,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER_URL.to_string(),
            timeout: None,
            strategies: Mode::KNOWN_STRATEGIES
                .iter()
                .map(ToString::to_string)
                .collect(),
            log_file: None,
            verbosity: 0,
        }
    }
}

impl ClientConfig {
    /// Build a config, validating the server address and timeout
    ///
    /// # Errors
    /// Returns `ConfigError` if the server is not an absolute `http`/`https` URL or
    /// the timeout is zero.
    pub fn new(server: &str, timeout_secs: Option<u64>) -> Result<Self, ConfigError> {
        let timeout = match timeout_secs {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            secs => secs.map(Duration::from_secs),
        };

        Ok(Self {
            server: normalize_server(server)?,
            timeout,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_strategies(mut self, strategies: Vec<String>) -> Self {
        if !strategies.is_empty() {
            self.strategies = strategies;
        }
        self
    }

    #[must_use]
    pub fn with_logging(mut self, log_file: Option<PathBuf>, verbosity: u8) -> Self {
        self.log_file = log_file;
        self.verbosity = verbosity;
        self
    }

    /// Modes offered for selection: `user` first, then the configured strategies
    #[must_use]
    pub fn modes(&self) -> Vec<Mode> {
        Mode::cycle(&self.strategies)
    }
}

fn normalize_server(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidServer {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL".to_string()));
    }

    let mut server = url.to_string();
    if !server.ends_with('/') {
        server.push('/');
    }
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        let config = ClientConfig::default();
        assert_eq!(config.server, "http://127.0.0.1:5000/");
        assert_eq!(config.timeout, None);
        assert_eq!(config.strategies.len(), Mode::KNOWN_STRATEGIES.len());
    }

    #[test]
    fn server_gets_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8000/wordle", None).unwrap();
        assert_eq!(config.server, "http://localhost:8000/wordle/");
    }

    #[test]
    fn rejects_non_http_servers() {
        assert!(matches!(
            ClientConfig::new("ftp://localhost", None),
            Err(ConfigError::InvalidServer { .. })
        ));
        assert!(matches!(
            ClientConfig::new("not a url", None),
            Err(ConfigError::InvalidServer { .. })
        ));
    }

    #[test]
    fn timeout_in_seconds() {
        let config = ClientConfig::new(DEFAULT_SERVER_URL, Some(5)).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert!(matches!(
            ClientConfig::new(DEFAULT_SERVER_URL, Some(0)),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn modes_start_with_user() {
        let config = ClientConfig::default().with_strategies(vec!["entropy".to_string()]);
        assert_eq!(config.modes(), vec![Mode::User, Mode::from_name("entropy")]);

        let unchanged = ClientConfig::default().with_strategies(Vec::new());
        assert_eq!(unchanged.modes().len(), Mode::KNOWN_STRATEGIES.len() + 1);
    }
}
