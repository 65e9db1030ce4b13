//! Letta agent platform integration for godot-tutor
//!
//! This crate talks to a Letta server: it provisions the tutor and curator
//! agents with their personas and shared memory blocks, persists their ids,
//! and runs conversations in which the agents call the learning tools from
//! [`tutor_tools`] as client-side tools executed in this process.

pub mod client;
pub mod conversation;
pub mod error;
pub mod personas;
pub mod roster;
pub mod setup;
pub mod types;

pub use client::{AgentPlatform, LettaClient};
pub use conversation::Conversation;
pub use error::{PlatformError, Result};
pub use personas::Prompts;
pub use roster::{AgentIds, SharedBlocks};
pub use setup::{Profile, Provisioner, check_learning_app};
pub use types::{AgentHandle, AgentMessage, AgentReply, AgentSpec, BlockSpec, MessageRequest, ToolCall};
