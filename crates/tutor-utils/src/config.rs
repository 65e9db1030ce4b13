//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable holding the learning application's base URL
pub const LEARNING_APP_URL_ENV: &str = "LEARNING_APP_URL";
/// Environment variable holding the agent platform's base URL
pub const LETTA_BASE_URL_ENV: &str = "LETTA_BASE_URL";
/// Environment variable holding the directory for persisted agent ids
pub const AGENTS_DIR_ENV: &str = "TUTOR_AGENTS_DIR";

/// Learning app address used by the tools and the single-agent setup
pub const DEFAULT_LEARNING_APP_URL: &str = "http://localhost:5173";
/// Learning app address used by the multi-agent setup
pub const MULTI_AGENT_LEARNING_APP_URL: &str = "http://localhost:5999";
/// Local agent platform address
pub const DEFAULT_LETTA_BASE_URL: &str = "http://localhost:8283";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A URL setting could not be parsed or uses an unsupported scheme
    #[error("Invalid {name} '{value}': {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Any other invalid setting
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Runtime configuration shared by the tools, the platform client and the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Base URL of the learning application
    pub learning_app_url: String,

    /// Base URL of the Letta agent platform
    pub letta_base_url: String,

    /// Timeout applied to every outbound request
    pub request_timeout: Duration,

    /// Timeout for the pre-flight reachability checks
    pub health_timeout: Duration,

    /// Maximum client-side tool rounds per chat message
    pub max_tool_rounds: usize,

    /// Directory holding `agent_ids.json` / `agent_id.txt`
    pub agents_dir: PathBuf,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            learning_app_url: DEFAULT_LEARNING_APP_URL.to_string(),
            letta_base_url: DEFAULT_LETTA_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(5),
            max_tool_rounds: 10,
            agents_dir: PathBuf::from("."),
        }
    }
}

impl TutorConfig {
    /// Create a new configuration builder
    pub fn builder() -> TutorConfigBuilder {
        TutorConfigBuilder::default()
    }

    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Same as [`TutorConfig::from_env`], but with the multi-agent learning app default
    pub fn multi_agent_from_env() -> Result<Self> {
        Self::builder()
            .learning_app_url(MULTI_AGENT_LEARNING_APP_URL)
            .with_env()
            .build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        check_url("learning app URL", &self.learning_app_url)?;
        check_url("Letta base URL", &self.letta_base_url)?;

        if self.max_tool_rounds == 0 {
            return Err(ConfigError::Invalid(
                "max_tool_rounds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_url(name: &'static str, value: &str) -> Result<()> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// Builder for TutorConfig
#[derive(Debug, Default)]
pub struct TutorConfigBuilder {
    learning_app_url: Option<String>,
    letta_base_url: Option<String>,
    request_timeout: Option<Duration>,
    health_timeout: Option<Duration>,
    max_tool_rounds: Option<usize>,
    agents_dir: Option<PathBuf>,
}

impl TutorConfigBuilder {
    /// Set the learning application base URL
    pub fn learning_app_url(mut self, url: impl Into<String>) -> Self {
        self.learning_app_url = Some(url.into());
        self
    }

    /// Set the agent platform base URL
    pub fn letta_base_url(mut self, url: impl Into<String>) -> Self {
        self.letta_base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the health check timeout
    pub fn health_timeout(mut self, duration: Duration) -> Self {
        self.health_timeout = Some(duration);
        self
    }

    /// Set the maximum number of client-side tool rounds
    pub fn max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = Some(rounds);
        self
    }

    /// Set the directory for persisted agent ids
    pub fn agents_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.agents_dir = Some(dir.into());
        self
    }

    /// Override values from `LEARNING_APP_URL`, `LETTA_BASE_URL` and `TUTOR_AGENTS_DIR`
    pub fn with_env(mut self) -> Self {
        if let Some(url) = non_empty_env(LEARNING_APP_URL_ENV) {
            self.learning_app_url = Some(url);
        }
        if let Some(url) = non_empty_env(LETTA_BASE_URL_ENV) {
            self.letta_base_url = Some(url);
        }
        if let Some(dir) = non_empty_env(AGENTS_DIR_ENV) {
            self.agents_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TutorConfig> {
        let defaults = TutorConfig::default();

        let config = TutorConfig {
            learning_app_url: trim_slash(
                self.learning_app_url.unwrap_or(defaults.learning_app_url),
            ),
            letta_base_url: trim_slash(self.letta_base_url.unwrap_or(defaults.letta_base_url)),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            health_timeout: self.health_timeout.unwrap_or(defaults.health_timeout),
            max_tool_rounds: self.max_tool_rounds.unwrap_or(defaults.max_tool_rounds),
            agents_dir: self.agents_dir.unwrap_or(defaults.agents_dir),
        };

        config.validate()?;
        Ok(config)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
