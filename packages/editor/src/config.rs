use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_HISTORY_LIMIT;

/// Tunables for the editing engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Snapshots kept for undo/redo
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Distance from the canvas center within which a dragged block snaps
    #[serde(default = "default_snap_tolerance")]
    pub snap_tolerance: f64,

    /// Movement below this on both axes is a click, not a drag
    #[serde(default = "default_click_threshold")]
    pub click_threshold: f64,

    /// Vertical spacing used for blocks without a stored `y`
    #[serde(default = "default_row_height")]
    pub default_row_height: f64,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_snap_tolerance() -> f64 {
    8.0
}

fn default_click_threshold() -> f64 {
    3.0
}

fn default_row_height() -> f64 {
    120.0
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            snap_tolerance: default_snap_tolerance(),
            click_threshold: default_click_threshold(),
            default_row_height: default_row_height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config: EditorConfig = serde_json::from_str(r#"{ "snapTolerance": 4 }"#).unwrap();
        assert_eq!(config.snap_tolerance, 4.0);
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.click_threshold, 3.0);
        assert_eq!(config.default_row_height, 120.0);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config, serde_json::from_str("{}").unwrap());
    }
}
