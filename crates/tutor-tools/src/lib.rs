//! Tool bridge for godot-tutor
//!
//! This crate defines the tools an agent can invoke and the registry that
//! dispatches them. The [`learning`] module holds the catalogue of tools that
//! read from and append to the learning application over HTTP.
//!
//! Every tool returns a plain string: either the pretty-printed JSON response or
//! a message starting with `Error`. Failures never surface as `Err` to the caller.

pub mod definition;
pub mod learning;
pub mod registry;
pub mod tool;

pub use definition::{ToolDefinition, schema};
pub use learning::LearningAppClient;
pub use registry::ToolRegistry;
pub use tool::Tool;
