//! Presentation-level configuration
//!
//! Configuration for REPL behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show the typing indicator while waiting for a reply
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// Resolve the line-editor history file.
    ///
    /// A configured path may start with `~/`. Without one, the history lives
    /// in the platform data directory.
    pub fn history_path(&self) -> Option<PathBuf> {
        match self.history_file.as_deref() {
            Some(path) => match path.strip_prefix("~/") {
                Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
                None => Some(PathBuf::from(path)),
            },
            None => dirs::data_dir().map(|p| p.join("streamchat").join("history.txt")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_history_path_is_used() {
        let config = ReplConfig {
            history_file: Some("/tmp/chat-history.txt".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.history_path(),
            Some(PathBuf::from("/tmp/chat-history.txt"))
        );
    }

    #[test]
    fn tilde_expands_to_home() {
        let config = ReplConfig {
            history_file: Some("~/chat/history.txt".to_string()),
            ..Default::default()
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.history_path(), Some(home.join("chat/history.txt")));
        }
    }

    #[test]
    fn default_history_under_data_dir() {
        let config = ReplConfig::default();
        if let Some(path) = config.history_path() {
            assert!(path.ends_with("streamchat/history.txt"));
        }
    }
}
