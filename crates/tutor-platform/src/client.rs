//! HTTP client for a Letta server
//!
//! See: https://docs.letta.com/api-reference

use crate::types::{AgentHandle, AgentReply, AgentSpec, BlockSpec, CreatedBlock, MessageRequest, WireReply};
use crate::{PlatformError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use tutor_utils::TutorConfig;

/// The part of the agent platform a conversation needs
///
/// Kept separate from [`LettaClient`] so conversations can run against a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgentPlatform: Send + Sync {
    /// Send one request to an agent and decode its reply
    async fn send_message(&self, agent_id: &str, request: &MessageRequest) -> Result<AgentReply>;
}

/// Letta REST client
pub struct LettaClient {
    client: Client,
    base_url: String,
    health_timeout: Duration,
}

impl LettaClient {
    /// Create a client for the Letta server at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        health_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            health_timeout,
        })
    }

    /// Create a client from the workspace configuration
    pub fn from_config(config: &TutorConfig) -> Result<Self> {
        Self::new(
            &config.letta_base_url,
            config.request_timeout,
            config.health_timeout,
        )
    }

    /// Base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the server is up
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<()> {
        let response = self
            .client
            .get(format!("{}/v1/health", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Create a standalone memory block and return its id
    #[instrument(skip(self, block), fields(label = %block.label))]
    pub async fn create_block(&self, block: &BlockSpec) -> Result<String> {
        let created: CreatedBlock = self.post("/v1/blocks/", block).await?;
        debug!(block_id = %created.id, "Created memory block");
        Ok(created.id)
    }

    /// Create an agent
    #[instrument(skip(self, spec), fields(name = %spec.name))]
    pub async fn create_agent(&self, spec: &AgentSpec) -> Result<AgentHandle> {
        let mut handle: AgentHandle = self.post("/v1/agents/", spec).await?;
        if handle.name.is_empty() {
            handle.name.clone_from(&spec.name);
        }
        debug!(agent_id = %handle.id, "Created agent");
        Ok(handle)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        debug!(path, "Sending request to Letta");
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;

        let response = Self::check(response).await?;
        response.json::<R>().await.map_err(|e| {
            PlatformError::UnexpectedResponse(format!("Failed to parse response from {path}: {e}"))
        })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(PlatformError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl AgentPlatform for LettaClient {
    #[instrument(skip(self, request), fields(agent_id = %agent_id))]
    async fn send_message(&self, agent_id: &str, request: &MessageRequest) -> Result<AgentReply> {
        let reply: WireReply = self
            .post(&format!("/v1/agents/{agent_id}/messages"), request)
            .await?;
        let reply = AgentReply::from(reply);
        debug!(
            messages = reply.messages.len(),
            stop_reason = ?reply.stop_reason,
            "Received agent reply"
        );
        Ok(reply)
    }
}
