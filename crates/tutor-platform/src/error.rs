//! Error types for agent platform operations

use thiserror::Error;

/// Result type for agent platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Errors that can occur while talking to the agent platform
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-2xx status
    #[error("Agent platform returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing persisted agent ids failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persona or prompt template failed to render
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// No agents have been provisioned yet
    #[error("Agents not configured: {0}")]
    NotConfigured(String),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] tutor_utils::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlatformError::Status {
            status: 404,
            body: "agent not found".to_string(),
        };
        assert_eq!(err.to_string(), "Agent platform returned 404: agent not found");

        let err = PlatformError::NotConfigured("run setup first".to_string());
        assert_eq!(err.to_string(), "Agents not configured: run setup first");
    }
}
