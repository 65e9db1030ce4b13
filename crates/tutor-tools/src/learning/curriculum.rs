//! Read-only curriculum and activity tools

use super::args;
use super::client::{Access, LearningAppClient, into_output};
use crate::{Tool, schema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

const LETTA_API: &str = "/api/letta";
const PROGRESS_API: &str = "/api/progress";

/// A tool that issues one fixed GET and takes no arguments
pub struct ReadTool {
    client: LearningAppClient,
    name: &'static str,
    description: &'static str,
    path: &'static str,
    query: &'static [(&'static str, &'static str)],
}

impl ReadTool {
    /// `get_topics`: the curriculum
    pub fn topics(client: LearningAppClient) -> Self {
        Self {
            client,
            name: "get_topics",
            description: "Get all available topics in the Godot learning curriculum. \
                          Returns a list of topics with their IDs, titles, categories and descriptions. \
                          Use this to understand what topics exist before adding resources.",
            path: LETTA_API,
            query: &[("action", "topics")],
        }
    }

    /// `get_recent_conversations`: notebook summaries
    pub fn recent_conversations(client: LearningAppClient) -> Self {
        Self {
            client,
            name: "get_recent_conversations",
            description: "Get summaries of recent chat conversations from the learning notebooks. \
                          Use this to understand what the student has been studying and asking about. \
                          Returns notebook metadata including topic IDs, message counts and last update times.",
            path: LETTA_API,
            query: &[("action", "notebooks")],
        }
    }

    /// `get_current_extensions`: everything curated so far
    pub fn current_extensions(client: LearningAppClient) -> Self {
        Self {
            client,
            name: "get_current_extensions",
            description: "Get all resources and code examples that have been dynamically added. \
                          Use this to see what content has already been curated to avoid duplicates.",
            path: LETTA_API,
            query: &[("action", "extensions")],
        }
    }

    /// `get_student_progress`: completion and notes per topic
    pub fn student_progress(client: LearningAppClient) -> Self {
        Self {
            client,
            name: "get_student_progress",
            description: "Get the student's learning progress across all topics. \
                          Shows which topics are completed, exercises done, and last visit times. \
                          Use this to understand the student's learning journey and identify focus areas.",
            path: PROGRESS_API,
            query: &[],
        }
    }
}

#[async_trait]
impl Tool for ReadTool {
    async fn execute(&self, _params: Value) -> String {
        into_output(self.client.get_json(self.path, self.query).await, Access::Read)
    }

    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn input_schema(&self) -> Value {
        schema::empty()
    }
}

#[derive(Debug, Deserialize)]
struct TopicParams {
    topic_id: String,
}

/// `get_conversation_details`: full message history for one topic
pub struct ConversationDetailsTool {
    client: LearningAppClient,
}

impl ConversationDetailsTool {
    pub fn new(client: LearningAppClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ConversationDetailsTool {
    async fn execute(&self, params: Value) -> String {
        let params: TopicParams = match args::parse(params) {
            Ok(p) => p,
            Err(e) => return e.render(Access::Read),
        };

        let query = [("action", "notebook"), ("topicId", params.topic_id.as_str())];
        into_output(self.client.get_json(LETTA_API, &query).await, Access::Read)
    }

    fn name(&self) -> &str {
        "get_conversation_details"
    }

    fn description(&self) -> &str {
        "Get the full conversation history for a specific topic. \
         Use this to analyze what questions the student asked and what they're struggling with."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "topic_id": schema::string(
                    "The ID of the topic (e.g., 'game-loop', 'signals', 'scene-tree')"
                ),
            }),
            vec!["topic_id"],
        )
    }
}
