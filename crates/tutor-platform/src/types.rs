//! Request and reply types for the Letta REST API
//!
//! Replies arrive as a list of messages tagged by `message_type`. They are
//! decoded into [`AgentMessage`], a flat structure whose fields are each
//! optional, instead of being probed for attributes at print time.

use serde::{Deserialize, Serialize};
use tutor_tools::ToolDefinition;

/// A memory block, either created standalone or inlined into an agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSpec {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Character limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl BlockSpec {
    /// Create a block with a label and initial value
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            limit: None,
        }
    }

    /// Set the description shown to the agent
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the character limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Agent creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSpec {
    pub name: String,
    pub model: String,
    pub embedding: String,
    pub context_window_limit: u32,
    pub enable_sleeptime: bool,
    pub memory_blocks: Vec<BlockSpec>,
    /// Ids of existing blocks shared with other agents
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub block_ids: Vec<String>,
    /// Server-side tools attached by name
    pub tools: Vec<String>,
    pub description: String,
}

/// Identity of a created agent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentHandle {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedBlock {
    pub id: String,
}

/// A tool executed by this process, advertised with each message request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientTool {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl From<ToolDefinition> for ClientTool {
    fn from(def: ToolDefinition) -> Self {
        Self {
            name: def.name,
            description: def.description,
            parameters: def.input_schema,
        }
    }
}

/// Result of a client-side tool call sent back to the agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolReturn {
    #[serde(rename = "type")]
    kind: &'static str,
    pub tool_call_id: String,
    pub tool_return: String,
    pub status: &'static str,
}

impl ToolReturn {
    /// Wrap a tool's output; outputs starting with `Error` are flagged as failed
    pub fn new(tool_call_id: impl Into<String>, output: String) -> Self {
        let status = if output.starts_with("Error") {
            "error"
        } else {
            "success"
        };
        Self {
            kind: "tool",
            tool_call_id: tool_call_id.into(),
            tool_return: output,
            status,
        }
    }
}

/// One input message in a request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputMessage {
    /// A chat message from the user
    Text { role: &'static str, content: String },
    /// Results for tool calls the agent is waiting on
    Approval {
        #[serde(rename = "type")]
        kind: &'static str,
        approvals: Vec<ToolReturn>,
    },
}

/// Body of `POST /v1/agents/{id}/messages`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRequest {
    pub messages: Vec<InputMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub client_tools: Vec<ClientTool>,
}

impl MessageRequest {
    /// A single user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            messages: vec![InputMessage::Text {
                role: "user",
                content: content.into(),
            }],
            client_tools: Vec::new(),
        }
    }

    /// Tool results answering pending calls
    pub fn tool_returns(approvals: Vec<ToolReturn>) -> Self {
        Self {
            messages: vec![InputMessage::Approval {
                kind: "approval",
                approvals,
            }],
            client_tools: Vec::new(),
        }
    }

    /// Advertise client-side tools with this request
    pub fn with_client_tools(mut self, tools: Vec<ClientTool>) -> Self {
        self.client_tools = tools;
        self
    }

    /// Text of the first user message, if any
    pub fn user_text(&self) -> Option<&str> {
        self.messages.iter().find_map(|m| match m {
            InputMessage::Text { content, .. } => Some(content.as_str()),
            InputMessage::Approval { .. } => None,
        })
    }
}

/// A tool call made by the agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// JSON-encoded arguments as sent by the agent
    pub arguments: String,
    /// Set when the platform waits for this process to execute the call
    pub pending: bool,
}

/// One message of an agent reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentMessage {
    pub text: Option<String>,
    pub reasoning: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

impl AgentMessage {
    /// A message carrying only text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Whether the message carries nothing worth showing
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.reasoning.is_none() && self.tool_calls.is_empty()
    }
}

/// A decoded reply to one message request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentReply {
    pub messages: Vec<AgentMessage>,
    pub stop_reason: Option<String>,
}

impl AgentReply {
    /// Tool calls the platform is waiting on
    pub fn pending_calls(&self) -> Vec<ToolCall> {
        self.messages
            .iter()
            .flat_map(|m| m.tool_calls.iter())
            .filter(|c| c.pending)
            .cloned()
            .collect()
    }
}

// Letta wire format

#[derive(Debug, Deserialize)]
pub(crate) struct WireReply {
    #[serde(default)]
    messages: Vec<WireMessage>,
    #[serde(default)]
    stop_reason: Option<WireStopReason>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireStopReason {
    Tagged { stop_reason: String },
    Plain(String),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "message_type", rename_all = "snake_case")]
enum WireMessage {
    AssistantMessage {
        #[serde(default)]
        content: Option<WireContent>,
    },
    ReasoningMessage {
        #[serde(default)]
        reasoning: Option<String>,
    },
    ToolCallMessage {
        #[serde(default)]
        tool_call: Option<WireToolCall>,
        #[serde(default)]
        tool_calls: Option<Vec<WireToolCall>>,
    },
    ApprovalRequestMessage {
        #[serde(default)]
        tool_call: Option<WireToolCall>,
        #[serde(default)]
        tool_calls: Option<Vec<WireToolCall>>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<WirePart>),
}

#[derive(Debug, Deserialize)]
struct WirePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
    #[serde(default)]
    tool_call_id: Option<String>,
}

impl WireToolCall {
    fn into_call(self, pending: bool) -> ToolCall {
        ToolCall {
            id: self.tool_call_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            arguments: self.arguments.unwrap_or_default(),
            pending,
        }
    }
}

fn collect_calls(
    single: Option<WireToolCall>,
    many: Option<Vec<WireToolCall>>,
    pending: bool,
) -> Vec<ToolCall> {
    // Newer servers send `tool_calls`; older ones only `tool_call`
    match many.filter(|calls| !calls.is_empty()) {
        Some(calls) => calls.into_iter().map(|c| c.into_call(pending)).collect(),
        None => single.into_iter().map(|c| c.into_call(pending)).collect(),
    }
}

impl WireContent {
    fn into_text(self) -> Option<String> {
        let text = match self {
            Self::Text(text) => text,
            Self::Parts(parts) => parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("\n"),
        };
        (!text.is_empty()).then_some(text)
    }
}

impl From<WireMessage> for AgentMessage {
    fn from(message: WireMessage) -> Self {
        match message {
            WireMessage::AssistantMessage { content } => Self {
                text: content.and_then(WireContent::into_text),
                ..Self::default()
            },
            WireMessage::ReasoningMessage { reasoning } => Self {
                reasoning: reasoning.filter(|r| !r.is_empty()),
                ..Self::default()
            },
            WireMessage::ToolCallMessage {
                tool_call,
                tool_calls,
            } => Self {
                tool_calls: collect_calls(tool_call, tool_calls, false),
                ..Self::default()
            },
            WireMessage::ApprovalRequestMessage {
                tool_call,
                tool_calls,
            } => Self {
                tool_calls: collect_calls(tool_call, tool_calls, true),
                ..Self::default()
            },
            WireMessage::Other => Self::default(),
        }
    }
}

impl From<WireReply> for AgentReply {
    fn from(reply: WireReply) -> Self {
        Self {
            messages: reply
                .messages
                .into_iter()
                .map(AgentMessage::from)
                .filter(|m| !m.is_empty())
                .collect(),
            stop_reason: reply.stop_reason.map(|r| match r {
                WireStopReason::Tagged { stop_reason } | WireStopReason::Plain(stop_reason) => {
                    stop_reason
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> AgentReply {
        serde_json::from_value::<WireReply>(value).unwrap().into()
    }

    #[test]
    fn test_decode_mixed_reply() {
        let reply = decode(json!({
            "messages": [
                {"message_type": "reasoning_message", "reasoning": "Check topics first"},
                {"message_type": "tool_call_message", "tool_call": {
                    "name": "web_search", "arguments": "{\"query\":\"godot signals\"}", "tool_call_id": "c1"
                }},
                {"message_type": "tool_return_message", "tool_return": "..."},
                {"message_type": "assistant_message", "content": "Here is what I found."}
            ],
            "stop_reason": {"message_type": "stop_reason", "stop_reason": "end_turn"}
        }));

        assert_eq!(reply.messages.len(), 3);
        assert_eq!(reply.messages[0].reasoning.as_deref(), Some("Check topics first"));
        assert_eq!(reply.messages[1].tool_calls[0].name, "web_search");
        assert!(!reply.messages[1].tool_calls[0].pending);
        assert_eq!(reply.messages[2].text.as_deref(), Some("Here is what I found."));
        assert_eq!(reply.stop_reason.as_deref(), Some("end_turn"));
        assert!(reply.pending_calls().is_empty());
    }

    #[test]
    fn test_decode_content_parts() {
        let reply = decode(json!({
            "messages": [{"message_type": "assistant_message", "content": [
                {"type": "text", "text": "Hello"},
                {"type": "text", "text": "Mark"}
            ]}]
        }));
        assert_eq!(reply.messages[0].text.as_deref(), Some("Hello\nMark"));
    }

    #[test]
    fn test_decode_approval_request() {
        let reply = decode(json!({
            "messages": [{"message_type": "approval_request_message", "tool_calls": [
                {"name": "get_topics", "arguments": "{}", "tool_call_id": "a"},
                {"name": "get_lessons", "arguments": "{\"topic_id\":\"signals\"}", "tool_call_id": "b"}
            ]}],
            "stop_reason": "requires_approval"
        }));

        let pending = reply.pending_calls();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[1].id, "b");
        assert_eq!(reply.stop_reason.as_deref(), Some("requires_approval"));
    }

    #[test]
    fn test_request_serialization() {
        let request = MessageRequest::user("hi").with_client_tools(vec![ClientTool::from(
            ToolDefinition::new("get_topics", "List topics", json!({"type": "object"})),
        )]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "messages": [{"role": "user", "content": "hi"}],
                "client_tools": [{
                    "name": "get_topics",
                    "description": "List topics",
                    "parameters": {"type": "object"}
                }]
            })
        );

        let returns = MessageRequest::tool_returns(vec![ToolReturn::new("a", "Error: 500".to_string())]);
        assert_eq!(
            serde_json::to_value(&returns).unwrap(),
            json!({
                "messages": [{"type": "approval", "approvals": [{
                    "type": "tool", "tool_call_id": "a", "tool_return": "Error: 500", "status": "error"
                }]}]
            })
        );
        assert_eq!(returns.user_text(), None);
    }

    #[test]
    fn test_agent_spec_serialization() {
        let spec = AgentSpec {
            name: "curator-agent".to_string(),
            model: "anthropic/claude-sonnet-4-20250514".to_string(),
            embedding: "letta/letta-free".to_string(),
            context_window_limit: 16000,
            enable_sleeptime: false,
            memory_blocks: vec![BlockSpec::new("persona", "I curate").with_limit(4000)],
            block_ids: Vec::new(),
            tools: vec!["web_search".to_string()],
            description: "Curator".to_string(),
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["memory_blocks"][0], json!({"label": "persona", "value": "I curate", "limit": 4000}));
        assert!(value.get("block_ids").is_none());
    }
}
