//! HTTP client for the learning application
//!
//! Every learning tool makes exactly one request through [`LearningAppClient`]
//! and turns the outcome into its string result with [`into_output`].

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use tutor_utils::TutorConfig;
use url::Url;

/// Prefix of every transport failure reported to the agent
pub const CONNECTION_ERROR_PREFIX: &str = "Error connecting to learning app";

/// Errors raised while talking to the learning application
///
/// These never leave a tool as `Err`; they are rendered into strings.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Tool arguments were missing, ill-typed or not parseable
    #[error("{0}")]
    InvalidArguments(String),

    /// The learning app answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, timeout, or response decoding failure
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The configured base URL could not be joined with the endpoint path
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Whether a tool reads or appends
///
/// Reads report only the status code on failure; writes include the body so
/// the agent can see validation messages from the learning app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl BridgeError {
    /// Render the error as the string handed back to the agent
    pub fn render(&self, access: Access) -> String {
        match self {
            Self::InvalidArguments(msg) => format!("Error: {msg}"),
            Self::Status { status, .. } if access == Access::Read => format!("Error: {status}"),
            Self::Status { status, body } => format!("Error: {status} - {body}"),
            Self::Transport(e) => format!("{CONNECTION_ERROR_PREFIX}: {e}"),
            Self::InvalidUrl(e) => format!("{CONNECTION_ERROR_PREFIX}: {e}"),
        }
    }
}

/// Convert a request outcome into a tool result string
///
/// Success bodies are pretty-printed with two-space indentation.
pub fn into_output(result: Result<Value, BridgeError>, access: Access) -> String {
    match result {
        Ok(body) => serde_json::to_string_pretty(&body)
            .unwrap_or_else(|e| format!("Error: could not encode response: {e}")),
        Err(e) => e.render(access),
    }
}

/// Client for the learning application's REST API
///
/// Cheap to clone; all tools built from one client share its connection pool.
#[derive(Debug, Clone)]
pub struct LearningAppClient {
    http: reqwest::Client,
    base_url: String,
}

impl LearningAppClient {
    /// Create a client for the learning app at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the workspace configuration
    pub fn from_config(config: &TutorConfig) -> reqwest::Result<Self> {
        Self::new(&config.learning_app_url, config.request_timeout)
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, BridgeError> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// `GET {base}{path}?{query}` and decode the JSON body
    #[instrument(skip(self))]
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, BridgeError> {
        let url = self.endpoint(path, query)?;
        debug!(%url, "Sending GET to learning app");

        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    /// `GET {base}{path}` within `timeout` and return only the status code
    ///
    /// The body is ignored, so any answer counts as reachable.
    #[instrument(skip(self))]
    pub async fn status(&self, path: &str, timeout: Duration) -> Result<u16, BridgeError> {
        let url = self.endpoint(path, &[])?;
        let response = self.http.get(url).timeout(timeout).send().await?;
        Ok(response.status().as_u16())
    }

    /// `POST {base}{path}` with a JSON body and decode the JSON response
    #[instrument(skip(self, body))]
    pub async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, BridgeError> {
        let url = self.endpoint(path, &[])?;
        debug!(%url, "Sending POST to learning app");

        let response = self.http.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Value, BridgeError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Learning app returned an error status");
            return Err(BridgeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_render_status_by_access() {
        let err = BridgeError::Status {
            status: 422,
            body: "bad type".to_string(),
        };
        assert_eq!(err.render(Access::Read), "Error: 422");
        assert_eq!(err.render(Access::Write), "Error: 422 - bad type");
    }

    #[test]
    fn test_render_invalid_arguments() {
        let err = BridgeError::InvalidArguments("missing field `topic_id`".to_string());
        assert_eq!(err.render(Access::Read), "Error: missing field `topic_id`");
    }

    #[test]
    fn test_output_is_pretty_printed() {
        let out = into_output(Ok(json!({"id": 7, "status": "ok"})), Access::Write);
        assert_eq!(out, "{\n  \"id\": 7,\n  \"status\": \"ok\"\n}");
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let client = LearningAppClient::new("http://localhost:5173/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5173");

        let url = client
            .endpoint("/api/letta", &[("action", "notebook"), ("topicId", "game-loop")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5173/api/letta?action=notebook&topicId=game-loop"
        );

        let url = client.endpoint("/api/progress", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5173/api/progress");
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/letta"))
            .and(query_param("action", "topics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "signals"}])))
            .mount(&server)
            .await;

        let client = LearningAppClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let body = client
            .get_json("/api/letta", &[("action", "topics")])
            .await
            .unwrap();
        assert_eq!(body, json!([{"id": "signals"}]));
    }

    #[tokio::test]
    async fn test_status_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/letta"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = LearningAppClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let timeout = Duration::from_secs(1);
        assert_eq!(client.status("/api/letta", timeout).await.unwrap(), 200);
        assert_eq!(client.status("/missing", timeout).await.unwrap(), 404);
    }

    #[tokio::test]
    async fn test_status_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = LearningAppClient::new(server.uri(), Duration::from_secs(30)).unwrap();
        let err = client
            .status("/api/letta", Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Transport(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_non_json_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = LearningAppClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let out = into_output(client.get_json("/api/progress", &[]).await, Access::Read);
        assert!(out.starts_with(CONNECTION_ERROR_PREFIX));
    }
}
