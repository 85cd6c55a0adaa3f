//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write diagnostic logs to this file instead of stderr
    pub file: Option<String>,
    /// Write a JSONL conversation transcript to this file
    pub conversation_log: Option<String>,
}
