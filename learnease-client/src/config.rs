/// Configuration management for the Learn-Ease client
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `LEARNEASE_API_URL`: Backend base URL (default: http://localhost:8000)
/// - `LEARNEASE_TIMEOUT_SECS`: Per-request timeout in seconds (default: 120)
/// - `LEARNEASE_SESSION_FILE`: Where the bearer token is persisted
///   (default: `$HOME/.learnease/session.json`)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use learnease_client::config::ClientConfig;
///
/// # fn example() -> Result<(), learnease_client::config::ConfigError> {
/// let config = ClientConfig::from_env()?;
/// println!("Talking to {}", config.api.base_url);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default backend address
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// AI endpoints can take a while to answer
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Variable present but unusable
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend API configuration
    pub api: ApiConfig,

    /// Session persistence configuration
    pub session: SessionConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the JSON file holding the token
    pub token_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            session: SessionConfig {
                token_path: default_token_path(),
            },
        }
    }
}

impl ClientConfig {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL does not start with `http://` or `https://`
    /// - The timeout is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let base_url = env::var("LEARNEASE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = match env::var("LEARNEASE_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                name: "LEARNEASE_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let token_path = env::var("LEARNEASE_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_path());

        Self::new(base_url, timeout_secs, token_path)
    }

    /// Builds a validated configuration
    pub fn new(
        base_url: impl Into<String>,
        timeout_secs: u64,
        token_path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&base_url.into())?;

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LEARNEASE_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            api: ApiConfig {
                base_url,
                timeout_secs,
            },
            session: SessionConfig {
                token_path: token_path.into(),
            },
        })
    }

    /// Returns a copy pointing at another backend
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.api.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            name: "LEARNEASE_API_URL",
            reason: format!("\"{}\" must start with http:// or https://", raw),
        });
    }

    Ok(trimmed.to_string())
}

fn default_token_path() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".learnease")
        .join("session.json")
}
