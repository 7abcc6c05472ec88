//! `blockcraft.config.json` loading.

use std::path::Path;
use std::time::Duration;

use blockcraft_editor::EditorConfig;
use serde::{Deserialize, Serialize};

use crate::WorkspaceError;

pub const CONFIG_FILE: &str = "blockcraft.config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    #[serde(flatten)]
    pub editor: EditorConfig,

    /// Quiet period after the last edit before autosave runs
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
}

fn default_autosave_delay_ms() -> u64 {
    1500
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            autosave_delay_ms: default_autosave_delay_ms(),
        }
    }
}

impl WorkspaceConfig {
    /// Load from `dir`, falling back to defaults when there is no config file
    pub fn load(dir: &Path) -> Result<Self, WorkspaceError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("no {} in {}; using defaults", CONFIG_FILE, dir.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| WorkspaceError::Config {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, WorkspaceError> {
        serde_json::to_string_pretty(self).map_err(|source| WorkspaceError::Config {
            path: CONFIG_FILE.to_string(),
            source,
        })
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = WorkspaceConfig::load(dir.path()).unwrap();
        assert_eq!(config, WorkspaceConfig::default());
        assert_eq!(config.autosave_delay(), Duration::from_millis(1500));
        assert_eq!(config.editor.history_limit, 100);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "autosaveDelayMs": 500, "snapTolerance": 4 }"#,
        )
        .unwrap();

        let config = WorkspaceConfig::load(dir.path()).unwrap();
        assert_eq!(config.autosave_delay_ms, 500);
        assert_eq!(config.editor.snap_tolerance, 4.0);
        assert_eq!(config.editor.click_threshold, 3.0);
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ nope").unwrap();

        let err = WorkspaceConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = WorkspaceConfig {
            autosave_delay_ms: 250,
            ..WorkspaceConfig::default()
        };
        std::fs::write(dir.path().join(CONFIG_FILE), config.to_json_pretty().unwrap()).unwrap();
        assert_eq!(WorkspaceConfig::load(dir.path()).unwrap(), config);
    }
}
