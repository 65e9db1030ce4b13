//! Tool trait definition

use crate::ToolDefinition;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Tools are functions the agent platform calls with a JSON object of
/// arguments. The result is always a string the agent can read; failures are
/// strings starting with `Error`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output, or a string starting with `Error` describing the failure
    async fn execute(&self, params: Value) -> String;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the agent understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;

    /// Build the definition advertised to the agent platform
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}
