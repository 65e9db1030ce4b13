//! Tools that append resources and code examples to a topic

use super::args;
use super::client::{Access, BridgeError, LearningAppClient, into_output};
use crate::{Tool, schema};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const LETTA_API: &str = "/api/letta";

/// Resource kinds the learning app renders
pub const RESOURCE_TYPES: &[&str] = &["docs", "source", "book", "video"];

/// Languages the learning app highlights
pub const CODE_LANGUAGES: &[&str] = &["gdscript", "python", "typescript", "cpp"];

#[derive(Debug, Deserialize)]
struct ResourceParams {
    topic_id: String,
    title: String,
    url: String,
    resource_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceBody<'a> {
    action: &'static str,
    topic_id: &'a str,
    title: &'a str,
    url: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

/// `add_resource`: append a learning resource to a topic
pub struct AddResourceTool {
    client: LearningAppClient,
}

impl AddResourceTool {
    pub fn new(client: LearningAppClient) -> Self {
        Self { client }
    }

    async fn add(&self, params: Value) -> Result<Value, BridgeError> {
        let params: ResourceParams = args::parse(params)?;
        let body = ResourceBody {
            action: "add_resource",
            topic_id: &params.topic_id,
            title: &params.title,
            url: &params.url,
            kind: &params.resource_type,
        };
        self.client.post_json(LETTA_API, &body).await
    }
}

#[async_trait]
impl Tool for AddResourceTool {
    async fn execute(&self, params: Value) -> String {
        into_output(self.add(params).await, Access::Write)
    }

    fn name(&self) -> &str {
        "add_resource"
    }

    fn description(&self) -> &str {
        "Add a learning resource to a topic in the Godot learning app. \
         The resource will appear in the topic's Resources section."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "topic_id": schema::string("The topic ID (e.g., 'game-loop', 'signals', 'scene-tree')"),
                "title": schema::string("Display title for the resource"),
                "url": schema::string("URL to the resource"),
                "resource_type": schema::string_enum("Kind of resource", RESOURCE_TYPES),
            }),
            vec!["topic_id", "title", "url", "resource_type"],
        )
    }
}

#[derive(Debug, Deserialize)]
struct CodeExampleParams {
    topic_id: String,
    title: String,
    language: String,
    code: String,
    explanation: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CodeExampleBody<'a> {
    action: &'static str,
    topic_id: &'a str,
    title: &'a str,
    language: &'a str,
    code: &'a str,
    explanation: &'a str,
}

/// `add_code_example`: append a code example to a topic
pub struct AddCodeExampleTool {
    client: LearningAppClient,
}

impl AddCodeExampleTool {
    pub fn new(client: LearningAppClient) -> Self {
        Self { client }
    }

    async fn add(&self, params: Value) -> Result<Value, BridgeError> {
        let params: CodeExampleParams = args::parse(params)?;
        let body = CodeExampleBody {
            action: "add_code_example",
            topic_id: &params.topic_id,
            title: &params.title,
            language: &params.language,
            code: &params.code,
            explanation: &params.explanation,
        };
        self.client.post_json(LETTA_API, &body).await
    }
}

#[async_trait]
impl Tool for AddCodeExampleTool {
    async fn execute(&self, params: Value) -> String {
        into_output(self.add(params).await, Access::Write)
    }

    fn name(&self) -> &str {
        "add_code_example"
    }

    fn description(&self) -> &str {
        "Add a code example to a topic in the Godot learning app. \
         The example will appear in the topic's Code Examples section."
    }

    fn input_schema(&self) -> Value {
        let language = format!("Programming language - one of {}", CODE_LANGUAGES.join(", "));
        schema::object(
            json!({
                "topic_id": schema::string("The topic ID (e.g., 'game-loop', 'signals', 'scene-tree')"),
                "title": schema::string("Display title for the code example"),
                "language": schema::string(&language),
                "code": schema::string("The actual code snippet"),
                "explanation": schema::string("Explanation of what the code does and why it's useful"),
            }),
            vec!["topic_id", "title", "language", "code", "explanation"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::test_support::client_for;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_add_resource_exact_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/letta"))
            .and(body_json(json!({
                "action": "add_resource",
                "topicId": "signals",
                "title": "Godot Signals Docs",
                "url": "https://docs.godotengine.org/en/stable/getting_started/step_by_step/signals.html",
                "type": "docs"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = AddResourceTool::new(client_for(&server));
        let out = tool
            .execute(json!({
                "topic_id": "signals",
                "title": "Godot Signals Docs",
                "url": "https://docs.godotengine.org/en/stable/getting_started/step_by_step/signals.html",
                "resource_type": "docs"
            }))
            .await;

        assert_eq!(out, "{\n  \"id\": 7,\n  \"status\": \"ok\"\n}");
    }

    #[tokio::test]
    async fn test_add_resource_error_includes_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("unknown topic"))
            .mount(&server)
            .await;

        let tool = AddResourceTool::new(client_for(&server));
        let out = tool
            .execute(json!({
                "topic_id": "nope",
                "title": "t",
                "url": "https://example.com",
                "resource_type": "video"
            }))
            .await;
        assert_eq!(out, "Error: 400 - unknown topic");
    }

    #[tokio::test]
    async fn test_add_code_example_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/letta"))
            .and(body_json(json!({
                "action": "add_code_example",
                "topicId": "state-machines",
                "title": "Enum FSM",
                "language": "gdscript",
                "code": "enum State { IDLE, RUN }",
                "explanation": "Minimal state enum"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = AddCodeExampleTool::new(client_for(&server));
        let out = tool
            .execute(json!({
                "topic_id": "state-machines",
                "title": "Enum FSM",
                "language": "gdscript",
                "code": "enum State { IDLE, RUN }",
                "explanation": "Minimal state enum"
            }))
            .await;
        assert_eq!(out, "{\n  \"ok\": true\n}");
    }

    #[test]
    fn test_resource_schema_lists_types() {
        let tool = AddResourceTool::new(crate::learning::test_support::unreachable_client());
        let schema = tool.input_schema();
        assert_eq!(
            schema["properties"]["resource_type"]["enum"],
            json!(["docs", "source", "book", "video"])
        );
    }
}
