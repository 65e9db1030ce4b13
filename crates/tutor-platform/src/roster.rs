//! Persisted ids of the provisioned agents

use crate::{PlatformError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// File written by the multi-agent setup
pub const AGENT_IDS_FILE: &str = "agent_ids.json";
/// Single-id file written by the single-agent setup, and alongside the multi-agent file
pub const LEGACY_AGENT_ID_FILE: &str = "agent_id.txt";

/// Ids of the shared memory blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedBlocks {
    pub learning_progress: String,
    pub curated_content: String,
}

/// Agents known to this installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIds {
    /// The chat agent; in a single-agent setup, the only agent
    pub gideon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_blocks: Option<SharedBlocks>,
}

impl AgentIds {
    /// A single-agent installation
    pub fn single(agent_id: impl Into<String>) -> Self {
        Self {
            gideon: agent_id.into(),
            curator: None,
            shared_blocks: None,
        }
    }

    /// Load ids from `dir`, preferring `agent_ids.json` over `agent_id.txt`
    pub fn load(dir: &Path) -> Result<Self> {
        let json_path = dir.join(AGENT_IDS_FILE);
        if json_path.exists() {
            let raw = fs::read_to_string(&json_path)?;
            return Ok(serde_json::from_str(&raw)?);
        }

        let legacy_path = dir.join(LEGACY_AGENT_ID_FILE);
        if legacy_path.exists() {
            let id = fs::read_to_string(&legacy_path)?.trim().to_string();
            if id.is_empty() {
                return Err(PlatformError::NotConfigured(format!(
                    "{} is empty",
                    legacy_path.display()
                )));
            }
            warn!("Using legacy single-agent setup; run setup for multi-agent features");
            return Ok(Self::single(id));
        }

        Err(PlatformError::NotConfigured(format!(
            "no {AGENT_IDS_FILE} or {LEGACY_AGENT_ID_FILE} in {}; run setup first",
            dir.display()
        )))
    }

    /// Persist ids into `dir`
    ///
    /// Multi-agent installs write `agent_ids.json`; every install writes the
    /// chat agent id to `agent_id.txt`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;

        if self.curator.is_some() || self.shared_blocks.is_some() {
            let json_path = dir.join(AGENT_IDS_FILE);
            fs::write(&json_path, serde_json::to_string_pretty(self)?)?;
            info!(path = %json_path.display(), "Saved agent ids");
        }

        let legacy_path = dir.join(LEGACY_AGENT_ID_FILE);
        fs::write(&legacy_path, &self.gideon)?;
        info!(path = %legacy_path.display(), "Saved chat agent id");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi() -> AgentIds {
        AgentIds {
            gideon: "agent-g".to_string(),
            curator: Some("agent-c".to_string()),
            shared_blocks: Some(SharedBlocks {
                learning_progress: "block-lp".to_string(),
                curated_content: "block-cc".to_string(),
            }),
        }
    }

    #[test]
    fn test_save_and_load_multi() {
        let dir = tempfile::tempdir().unwrap();
        multi().save(dir.path()).unwrap();

        assert_eq!(AgentIds::load(dir.path()).unwrap(), multi());
        assert_eq!(
            fs::read_to_string(dir.path().join(LEGACY_AGENT_ID_FILE)).unwrap(),
            "agent-g"
        );

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(AGENT_IDS_FILE)).unwrap())
                .unwrap();
        assert_eq!(raw["shared_blocks"]["curated_content"], "block-cc");
    }

    #[test]
    fn test_single_writes_only_legacy() {
        let dir = tempfile::tempdir().unwrap();
        AgentIds::single("agent-solo").save(dir.path()).unwrap();

        assert!(!dir.path().join(AGENT_IDS_FILE).exists());
        let loaded = AgentIds::load(dir.path()).unwrap();
        assert_eq!(loaded.gideon, "agent-solo");
        assert!(loaded.curator.is_none());
    }

    #[test]
    fn test_legacy_file_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LEGACY_AGENT_ID_FILE), "agent-old\n").unwrap();
        assert_eq!(AgentIds::load(dir.path()).unwrap().gideon, "agent-old");
    }

    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = AgentIds::load(dir.path()).unwrap_err();
        assert!(matches!(err, PlatformError::NotConfigured(_)));
    }
}
