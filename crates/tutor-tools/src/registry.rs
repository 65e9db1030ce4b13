//! Tool registry for managing available tools

use crate::{Tool, ToolDefinition};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Registry for managing tools
///
/// Built once at startup and shared behind an `Arc`; lookups never lock.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all registered tools, sorted by name
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let mut tools: Vec<_> = self.tools.values().cloned().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
    }

    /// Definitions of all registered tools, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list_tools().iter().map(|t| t.definition()).collect()
    }

    /// Invoke a tool by name
    ///
    /// Unknown names produce an error string rather than a fault, like every
    /// other tool failure.
    pub async fn invoke(&self, name: &str, params: Value) -> String {
        let Some(tool) = self.get(name) else {
            warn!(tool = %name, "Unknown tool requested");
            return format!("Error: unknown tool '{name}'");
        };

        let start = Instant::now();
        let output = tool.execute(params).await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        if output.starts_with("Error") {
            warn!(tool = %name, duration_ms, output = %output, "Tool returned an error");
        } else {
            info!(tool = %name, duration_ms, output_len = output.len(), "Tool succeeded");
        }

        output
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
