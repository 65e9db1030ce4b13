//! Conversation loop with client-side tool execution
//!
//! 1. Send the user message with the local tool definitions attached
//! 2. If the reply asks for client-side tool calls, run them through the registry
//! 3. Send the results back and repeat until the agent stops asking

use crate::client::AgentPlatform;
use crate::types::{AgentMessage, ClientTool, MessageRequest, ToolCall, ToolReturn};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tutor_tools::ToolRegistry;

/// Tool return sent for calls still pending when the round limit is hit
pub const ROUND_LIMIT_ERROR: &str = "Error: tool round limit reached";

/// Sends messages to agents and answers their tool calls
pub struct Conversation {
    platform: Arc<dyn AgentPlatform>,
    tools: Arc<ToolRegistry>,
    max_tool_rounds: usize,
}

impl Conversation {
    /// Create a conversation over `platform` whose agents may call `tools`
    pub fn new(
        platform: Arc<dyn AgentPlatform>,
        tools: Arc<ToolRegistry>,
        max_tool_rounds: usize,
    ) -> Self {
        Self {
            platform,
            tools,
            max_tool_rounds,
        }
    }

    fn client_tools(&self) -> Vec<ClientTool> {
        self.tools
            .definitions()
            .into_iter()
            .map(ClientTool::from)
            .collect()
    }

    /// Send `text` to `agent_id` and return every reply message in order
    pub async fn send(&self, agent_id: &str, text: &str) -> Result<Vec<AgentMessage>> {
        let client_tools = self.client_tools();
        let mut request = MessageRequest::user(text).with_client_tools(client_tools.clone());
        let mut transcript = Vec::new();
        let mut round = 0;

        loop {
            let reply = self.platform.send_message(agent_id, &request).await?;
            let pending = reply.pending_calls();
            transcript.extend(reply.messages);

            if pending.is_empty() {
                debug!(rounds = round, "Agent turn complete");
                return Ok(transcript);
            }

            round += 1;
            if round > self.max_tool_rounds {
                warn!(
                    max_tool_rounds = self.max_tool_rounds,
                    pending = pending.len(),
                    "Tool round limit reached, answering pending calls with an error"
                );
                // Open approval requests would block the agent's next message
                let returns = pending
                    .into_iter()
                    .map(|call| ToolReturn::new(call.id, ROUND_LIMIT_ERROR.to_string()))
                    .collect();
                let request = MessageRequest::tool_returns(returns).with_client_tools(client_tools);
                let reply = self.platform.send_message(agent_id, &request).await?;
                transcript.extend(reply.messages);
                return Ok(transcript);
            }

            info!(round, calls = pending.len(), "Executing client-side tool calls");
            let mut returns = Vec::with_capacity(pending.len());
            for call in pending {
                let output = self.execute(&call).await;
                returns.push(ToolReturn::new(call.id, output));
            }

            request = MessageRequest::tool_returns(returns).with_client_tools(client_tools.clone());
        }
    }

    async fn execute(&self, call: &ToolCall) -> String {
        let args = if call.arguments.trim().is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            match serde_json::from_str(&call.arguments) {
                Ok(args) => args,
                Err(e) => return format!("Error: invalid tool arguments: {e}"),
            }
        };

        self.tools.invoke(&call.name, args).await
    }
}
