//! Learning application tools
//!
//! Ten tools bridge the agent to the learning app's REST API. Each one maps a
//! fixed argument schema to a single HTTP request and maps the response, or any
//! failure, to a string:
//!
//! | Tool | Request |
//! |---|---|
//! | `get_topics` | `GET /api/letta?action=topics` |
//! | `get_recent_conversations` | `GET /api/letta?action=notebooks` |
//! | `get_conversation_details` | `GET /api/letta?action=notebook&topicId=…` |
//! | `get_current_extensions` | `GET /api/letta?action=extensions` |
//! | `get_student_progress` | `GET /api/progress` |
//! | `get_student_notes` | `GET /api/progress`, projected to one topic |
//! | `add_resource` | `POST /api/letta` |
//! | `add_code_example` | `POST /api/letta` |
//! | `add_lesson` | `POST /api/letta/lessons` |
//! | `get_lessons` | `GET /api/letta/lessons[?topicId=…]` |
//!
//! Writes are plain appends; nothing here checks for duplicates.

mod args;
pub mod client;
pub mod curation;
pub mod curriculum;
pub mod lessons;
pub mod progress;

pub use client::{Access, BridgeError, CONNECTION_ERROR_PREFIX, LearningAppClient};
pub use curation::{AddCodeExampleTool, AddResourceTool};
pub use curriculum::{ConversationDetailsTool, ReadTool};
pub use lessons::{AddLessonTool, GetLessonsTool};
pub use progress::StudentNotesTool;

use crate::{Tool, ToolRegistry};
use std::sync::Arc;

/// Build all learning tools against one client
pub fn tools(client: &LearningAppClient) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(ReadTool::topics(client.clone())),
        Arc::new(ReadTool::recent_conversations(client.clone())),
        Arc::new(ConversationDetailsTool::new(client.clone())),
        Arc::new(ReadTool::current_extensions(client.clone())),
        Arc::new(ReadTool::student_progress(client.clone())),
        Arc::new(StudentNotesTool::new(client.clone())),
        Arc::new(AddResourceTool::new(client.clone())),
        Arc::new(AddCodeExampleTool::new(client.clone())),
        Arc::new(AddLessonTool::new(client.clone())),
        Arc::new(GetLessonsTool::new(client.clone())),
    ]
}

/// Register all learning tools into `registry`
pub fn register_all(registry: &mut ToolRegistry, client: &LearningAppClient) {
    for tool in tools(client) {
        registry.register(tool);
    }
}

/// A registry holding exactly the learning tools
pub fn registry(client: &LearningAppClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all(&mut registry, client);
    registry
}
