//! Agent provisioning
//!
//! The multi-agent profile creates two shared memory blocks and two agents
//! attached to both: Gideon, the chat tutor, and the Curator, which runs
//! curation passes. The single-agent profile creates one curator with all
//! four blocks inlined.

use crate::personas::{CURATED_CONTENT_SEED, LEARNING_PROGRESS_SEED, Prompts};
use crate::roster::{AgentIds, SharedBlocks};
use crate::types::{AgentSpec, BlockSpec};
use crate::{LettaClient, Result};
use std::time::Duration;
use tracing::{info, warn};
use tutor_tools::LearningAppClient;
use tutor_tools::learning::BridgeError;

/// Model every agent runs on
pub const MODEL: &str = "anthropic/claude-sonnet-4-20250514";
/// Embedding model for archival memory
pub const EMBEDDING: &str = "letta/letta-free";
/// Context window cap, in tokens
pub const CONTEXT_WINDOW_LIMIT: u32 = 16000;
/// Server-side tool attached to every agent
pub const WEB_SEARCH: &str = "web_search";

pub const GIDEON_NAME: &str = "gideon-tutor";
pub const CURATOR_NAME: &str = "curator-agent";
pub const SOLO_CURATOR_NAME: &str = "godot-learning-curator";

const PERSONA_LIMIT: u32 = 4000;
const HUMAN_LIMIT: u32 = 2000;
const LEARNING_PROGRESS_LIMIT: u32 = 4000;
const CURATED_CONTENT_LIMIT: u32 = 2000;

/// Which set of agents to create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Gideon and the Curator sharing two memory blocks
    #[default]
    MultiAgent,
    /// One curator agent with its own blocks
    SingleAgent,
}

/// Creates agents on a Letta server
pub struct Provisioner<'a> {
    client: &'a LettaClient,
    prompts: &'a Prompts,
}

impl<'a> Provisioner<'a> {
    pub fn new(client: &'a LettaClient, prompts: &'a Prompts) -> Self {
        Self { client, prompts }
    }

    /// Fail unless the Letta server answers its health check
    pub async fn check_platform(&self) -> Result<()> {
        self.client.health().await?;
        info!(url = %self.client.base_url(), "Letta server is running");
        Ok(())
    }

    /// Create the agents for `profile` and return their ids
    ///
    /// Nothing is written to disk; see [`AgentIds::save`].
    pub async fn provision(&self, profile: Profile) -> Result<AgentIds> {
        match profile {
            Profile::MultiAgent => self.provision_multi().await,
            Profile::SingleAgent => self.provision_single().await,
        }
    }

    async fn provision_multi(&self) -> Result<AgentIds> {
        info!("Creating shared memory blocks");
        let learning_progress = self
            .client
            .create_block(&learning_progress_block(self.prompts.student()))
            .await?;
        info!(block_id = %learning_progress, "Created learning_progress block");

        let curated_content = self.client.create_block(&curated_content_block()).await?;
        info!(block_id = %curated_content, "Created curated_content block");

        let shared = SharedBlocks {
            learning_progress,
            curated_content,
        };

        let gideon = self.client.create_agent(&self.gideon_spec(&shared)?).await?;
        info!(agent_id = %gideon.id, name = %gideon.name, "Created Gideon");

        let curator = self.client.create_agent(&self.curator_spec(&shared)?).await?;
        info!(agent_id = %curator.id, name = %curator.name, "Created Curator");

        Ok(AgentIds {
            gideon: gideon.id,
            curator: Some(curator.id),
            shared_blocks: Some(shared),
        })
    }

    async fn provision_single(&self) -> Result<AgentIds> {
        let agent = self.client.create_agent(&self.solo_spec()?).await?;
        info!(agent_id = %agent.id, name = %agent.name, "Created curator agent");
        Ok(AgentIds::single(agent.id))
    }

    fn base_blocks(&self, persona: String) -> Result<Vec<BlockSpec>> {
        Ok(vec![
            BlockSpec::new("persona", persona).with_limit(PERSONA_LIMIT),
            BlockSpec::new("human", self.prompts.human_context()?).with_limit(HUMAN_LIMIT),
        ])
    }

    /// Creation request for Gideon
    pub fn gideon_spec(&self, shared: &SharedBlocks) -> Result<AgentSpec> {
        Ok(AgentSpec {
            name: GIDEON_NAME.to_string(),
            model: MODEL.to_string(),
            embedding: EMBEDDING.to_string(),
            context_window_limit: CONTEXT_WINDOW_LIMIT,
            enable_sleeptime: false,
            memory_blocks: self.base_blocks(self.prompts.gideon_persona()?)?,
            block_ids: shared_ids(shared),
            tools: vec![WEB_SEARCH.to_string()],
            description: "Gideon - Friendly Godot tutor for real-time learning conversations"
                .to_string(),
        })
    }

    /// Creation request for the Curator
    pub fn curator_spec(&self, shared: &SharedBlocks) -> Result<AgentSpec> {
        Ok(AgentSpec {
            name: CURATOR_NAME.to_string(),
            model: MODEL.to_string(),
            embedding: EMBEDDING.to_string(),
            context_window_limit: CONTEXT_WINDOW_LIMIT,
            enable_sleeptime: false,
            memory_blocks: self.base_blocks(self.prompts.curator_persona()?)?,
            block_ids: shared_ids(shared),
            tools: vec![WEB_SEARCH.to_string()],
            description: "Curator - Background agent for proactive content curation".to_string(),
        })
    }

    /// Creation request for the single-agent curator
    pub fn solo_spec(&self) -> Result<AgentSpec> {
        let mut memory_blocks = self.base_blocks(self.prompts.solo_curator_persona()?)?;
        memory_blocks.push(
            BlockSpec::new("learning_progress", LEARNING_PROGRESS_SEED)
                .with_limit(LEARNING_PROGRESS_LIMIT),
        );
        memory_blocks.push(
            BlockSpec::new("curated_content", CURATED_CONTENT_SEED)
                .with_limit(CURATED_CONTENT_LIMIT),
        );

        Ok(AgentSpec {
            name: SOLO_CURATOR_NAME.to_string(),
            model: MODEL.to_string(),
            embedding: EMBEDDING.to_string(),
            context_window_limit: CONTEXT_WINDOW_LIMIT,
            enable_sleeptime: false,
            memory_blocks,
            block_ids: Vec::new(),
            tools: vec![WEB_SEARCH.to_string()],
            description: "Curates learning resources for a Godot game development student"
                .to_string(),
        })
    }
}

fn learning_progress_block(student: &str) -> BlockSpec {
    BlockSpec::new("learning_progress", LEARNING_PROGRESS_SEED).with_description(format!(
        "Tracks {student}'s learning journey - topics studied, gaps identified, patterns observed"
    ))
}

fn curated_content_block() -> BlockSpec {
    BlockSpec::new("curated_content", CURATED_CONTENT_SEED)
        .with_description("Tracks what resources, examples, and lessons have been added")
}

fn shared_ids(shared: &SharedBlocks) -> Vec<String> {
    vec![
        shared.learning_progress.clone(),
        shared.curated_content.clone(),
    ]
}

/// Check that the learning app answers `GET /api/letta` within `timeout`
///
/// Any HTTP response means the app is up and yields its status code; only a
/// transport failure is an error. Setup may continue either way.
pub async fn check_learning_app(
    app: &LearningAppClient,
    timeout: Duration,
) -> std::result::Result<u16, BridgeError> {
    match app.status("/api/letta", timeout).await {
        Ok(status) if (200..300).contains(&status) => {
            info!(url = %app.base_url(), status, "Learning app is running");
            Ok(status)
        }
        Ok(status) => {
            warn!(url = %app.base_url(), status, "Learning app answered with an error status");
            Ok(status)
        }
        Err(e) => {
            warn!(url = %app.base_url(), error = %e, "Cannot reach learning app");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlatformError;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn letta(server: &MockServer) -> LettaClient {
        LettaClient::new(server.uri(), Duration::from_secs(5), Duration::from_secs(1)).unwrap()
    }

    fn shared() -> SharedBlocks {
        SharedBlocks {
            learning_progress: "block-lp".to_string(),
            curated_content: "block-cc".to_string(),
        }
    }

    async fn mount_created(server: &MockServer, at: &str, body: serde_json::Value, id: &str) {
        Mock::given(method("POST"))
            .and(path(at))
            .and(body_partial_json(body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": id})))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn test_agent_specs() {
        let client =
            LettaClient::new("http://127.0.0.1:1", Duration::from_secs(1), Duration::from_secs(1))
                .unwrap();
        let prompts = Prompts::new("Ada").unwrap();
        let provisioner = Provisioner::new(&client, &prompts);

        let gideon = provisioner.gideon_spec(&shared()).unwrap();
        assert_eq!(gideon.name, GIDEON_NAME);
        assert_eq!(gideon.block_ids, vec!["block-lp", "block-cc"]);
        assert_eq!(gideon.tools, vec![WEB_SEARCH]);
        assert_eq!(gideon.memory_blocks[0].limit, Some(4000));
        assert_eq!(gideon.memory_blocks[1].label, "human");
        assert!(gideon.memory_blocks[1].value.contains("Name: Ada"));

        let curator = provisioner.curator_spec(&shared()).unwrap();
        assert!(curator.memory_blocks[0].value.contains("Curator agent"));

        let solo = provisioner.solo_spec().unwrap();
        let labels: Vec<_> = solo.memory_blocks.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["persona", "human", "learning_progress", "curated_content"]);
        assert_eq!(solo.memory_blocks[3].limit, Some(2000));
        assert!(solo.block_ids.is_empty());

        // Learning tools only run inside a client turn
        for spec in [&gideon, &curator, &solo] {
            assert!(!spec.enable_sleeptime, "{} enables sleeptime", spec.name);
        }
    }

    #[test]
    fn test_learning_progress_block_names_student() {
        let block = learning_progress_block("Ada");
        assert_eq!(
            block.description.as_deref(),
            Some("Tracks Ada's learning journey - topics studied, gaps identified, patterns observed")
        );
        assert_eq!(block.value, LEARNING_PROGRESS_SEED);
    }

    #[tokio::test]
    async fn test_provision_multi_agent() {
        let server = MockServer::start().await;
        mount_created(&server, "/v1/blocks/", json!({"label": "learning_progress"}), "block-lp").await;
        mount_created(&server, "/v1/blocks/", json!({"label": "curated_content"}), "block-cc").await;
        mount_created(
            &server,
            "/v1/agents/",
            json!({"name": GIDEON_NAME, "block_ids": ["block-lp", "block-cc"]}),
            "agent-g",
        )
        .await;
        mount_created(
            &server,
            "/v1/agents/",
            json!({"name": CURATOR_NAME, "block_ids": ["block-lp", "block-cc"]}),
            "agent-c",
        )
        .await;

        let client = letta(&server);
        let prompts = Prompts::new("Mark").unwrap();
        let ids = Provisioner::new(&client, &prompts)
            .provision(Profile::MultiAgent)
            .await
            .unwrap();

        assert_eq!(ids.gideon, "agent-g");
        assert_eq!(ids.curator.as_deref(), Some("agent-c"));
        assert_eq!(ids.shared_blocks, Some(shared()));
    }

    #[tokio::test]
    async fn test_provision_single_agent() {
        let server = MockServer::start().await;
        mount_created(
            &server,
            "/v1/agents/",
            json!({"name": SOLO_CURATOR_NAME, "enable_sleeptime": false}),
            "agent-solo",
        )
        .await;

        let client = letta(&server);
        let prompts = Prompts::new("Mark").unwrap();
        let ids = Provisioner::new(&client, &prompts)
            .provision(Profile::SingleAgent)
            .await
            .unwrap();

        assert_eq!(ids, AgentIds::single("agent-solo"));
    }

    #[tokio::test]
    async fn test_failed_block_stops_provisioning() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/blocks/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/agents/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "never"})))
            .expect(0)
            .mount(&server)
            .await;

        let client = letta(&server);
        let prompts = Prompts::new("Mark").unwrap();
        let err = Provisioner::new(&client, &prompts)
            .provision(Profile::MultiAgent)
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_check_learning_app() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/letta"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Letta API ok"))
            .mount(&server)
            .await;

        let timeout = Duration::from_secs(2);
        let app = LearningAppClient::new(server.uri(), Duration::from_secs(30)).unwrap();
        assert_eq!(check_learning_app(&app, timeout).await.unwrap(), 200);

        let down = LearningAppClient::new("http://127.0.0.1:1", Duration::from_secs(30)).unwrap();
        assert!(check_learning_app(&down, timeout).await.is_err());
    }

    #[tokio::test]
    async fn test_check_learning_app_error_status_is_reachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/letta"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = LearningAppClient::new(server.uri(), Duration::from_secs(30)).unwrap();
        let status = check_learning_app(&app, Duration::from_secs(2)).await.unwrap();
        assert_eq!(status, 500);
    }
}
