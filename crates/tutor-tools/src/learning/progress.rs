//! Student notes, projected from the progress payload

use super::args;
use super::client::{Access, BridgeError, LearningAppClient, into_output};
use crate::{Tool, schema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct NotesParams {
    topic_id: String,
}

/// `get_student_notes`: one topic's notes out of `GET /api/progress`
///
/// The learning app has no per-topic notes endpoint, so this fetches the whole
/// progress record and projects `.topics[topic_id].notes`.
pub struct StudentNotesTool {
    client: LearningAppClient,
}

impl StudentNotesTool {
    pub fn new(client: LearningAppClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, params: Value) -> Result<Value, BridgeError> {
        let params: NotesParams = args::parse(params)?;
        let progress = self.client.get_json("/api/progress", &[]).await?;
        Ok(project_notes(&progress, &params.topic_id))
    }
}

/// Build the `{topicId, notes, hasNotes}` answer; absent topics or notes read as empty
fn project_notes(progress: &Value, topic_id: &str) -> Value {
    let notes = progress
        .get("topics")
        .and_then(|topics| topics.get(topic_id))
        .and_then(|topic| topic.get("notes"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    json!({
        "topicId": topic_id,
        "notes": notes,
        "hasNotes": !notes.trim().is_empty(),
    })
}

#[async_trait]
impl Tool for StudentNotesTool {
    async fn execute(&self, params: Value) -> String {
        into_output(self.fetch(params).await, Access::Read)
    }

    fn name(&self) -> &str {
        "get_student_notes"
    }

    fn description(&self) -> &str {
        "Get the student's personal notes for a specific topic. \
         Notes contain the student's own insights, questions, and reflections. \
         Use this to understand what the student found important or confusing."
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
