//! Server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Raw server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Base URL of the chat server
    pub base_url: String,
    /// Path of the streaming chat endpoint
    pub chat_path: String,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_path: "/chat".to_string(),
            connect_timeout_secs: 10,
        }
    }
}
