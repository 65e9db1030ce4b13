//! Shared utilities for godot-tutor
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup and configuration management.

pub mod config;
pub mod logging;

pub use config::{ConfigError, TutorConfig, TutorConfigBuilder};
pub use logging::init_tracing;
