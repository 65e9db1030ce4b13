//! Structured lessons: create and list

use super::args::{self, StringList};
use super::client::{Access, BridgeError, LearningAppClient, into_output};
use crate::{Tool, schema};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const LESSONS_API: &str = "/api/letta/lessons";

/// Lesson difficulty levels
pub const DIFFICULTIES: &[&str] = &["beginner", "intermediate", "advanced"];

#[derive(Debug, Deserialize)]
struct LessonParams {
    topic_id: String,
    title: String,
    difficulty: String,
    introduction: String,
    concepts: StringList,
    explanation: String,
    exercises: StringList,
    connections: StringList,
    generated_for: String,
}

#[derive(Debug, Serialize)]
struct LessonContent {
    introduction: String,
    concepts: Vec<String>,
    explanation: String,
    exercises: Vec<String>,
    connections: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LessonBody {
    topic_id: String,
    title: String,
    difficulty: String,
    content: LessonContent,
    generated_for: String,
}

impl LessonParams {
    fn into_body(self) -> Result<LessonBody, BridgeError> {
        Ok(LessonBody {
            topic_id: self.topic_id,
            title: self.title,
            difficulty: self.difficulty,
            content: LessonContent {
                introduction: self.introduction,
                concepts: self.concepts.into_items("concepts")?,
                explanation: self.explanation,
                exercises: self.exercises.into_items("exercises")?,
                connections: self.connections.into_items("connections")?,
            },
            generated_for: self.generated_for,
        })
    }
}

/// `add_lesson`: append a structured lesson to a topic
pub struct AddLessonTool {
    client: LearningAppClient,
}

impl AddLessonTool {
    pub fn new(client: LearningAppClient) -> Self {
        Self { client }
    }

    async fn add(&self, params: Value) -> Result<Value, BridgeError> {
        let body = args::parse::<LessonParams>(params)?.into_body()?;
        self.client.post_json(LESSONS_API, &body).await
    }
}

#[async_trait]
impl Tool for AddLessonTool {
    async fn execute(&self, params: Value) -> String {
        into_output(self.add(params).await, Access::Write)
    }

    fn name(&self) -> &str {
        "add_lesson"
    }

    fn description(&self) -> &str {
        "Generate and add a structured lesson to a topic. \
         Lessons are comprehensive learning materials created based on student needs."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "topic_id": schema::string("The topic ID (e.g., 'game-loop', 'signals')"),
                "title": schema::string("Lesson title (e.g., \"Understanding Delta Time in Practice\")"),
                "difficulty": schema::string_enum("Lesson difficulty", DIFFICULTIES),
                "introduction": schema::string("Why this lesson matters to the student (1-2 paragraphs)"),
                "concepts": schema::string(
                    "Key points as JSON array of strings (e.g., '[\"point 1\", \"point 2\"]')"
                ),
                "explanation": schema::string("Deep explanation in markdown format"),
                "exercises": schema::string("Practice prompts as JSON array of strings"),
                "connections": schema::string("Links to other topics as JSON array of strings"),
                "generated_for": schema::string(
                    "What triggered this lesson (e.g., \"User asked about delta time\")"
                ),
            }),
            vec![
                "topic_id",
                "title",
                "difficulty",
                "introduction",
                "concepts",
                "explanation",
                "exercises",
                "connections",
                "generated_for",
            ],
        )
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default)]
    topic_id: Option<String>,
}

/// `get_lessons`: all lessons, optionally for one topic
pub struct GetLessonsTool {
    client: LearningAppClient,
}

impl GetLessonsTool {
    pub fn new(client: LearningAppClient) -> Self {
        Self { client }
    }

    async fn list(&self, params: Value) -> Result<Value, BridgeError> {
        let params: ListParams = args::parse(params)?;
        match params.topic_id.as_deref().filter(|id| !id.is_empty()) {
            Some(topic_id) => {
                self.client
                    .get_json(LESSONS_API, &[("topicId", topic_id)])
                    .await
            }
            None => self.client.get_json(LESSONS_API, &[]).await,
        }
    }
}

#[async_trait]
impl Tool for GetLessonsTool {
    async fn execute(&self, params: Value) -> String {
        into_output(self.list(params).await, Access::Read)
    }

    fn name(&self) -> &str {
        "get_lessons"
    }

    fn description(&self) -> &str {
        "Get all generated lessons, optionally filtered by topic."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "topic_id": schema::string(
                    "Optional topic ID to filter lessons. If empty, returns all lessons."
                ),
            }),
            Vec::new(),
        )
    }
}
