//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod chat;
mod logging;
mod repl;
mod server;

pub use chat::FileChatConfig;
pub use logging::FileLoggingConfig;
pub use repl::FileReplConfig;
pub use server::{DEFAULT_BASE_URL, FileServerConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation issues
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("server.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("server.base_url '{url}' is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("server.connect_timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("chat.system_prompt is set but empty")]
    EmptySystemPrompt,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat server settings
    pub server: FileServerConfig,
    /// Conversation settings
    pub chat: FileChatConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let base_url = self.server.base_url.trim();
        if base_url.is_empty() {
            issues.push(ConfigValidationError::EmptyBaseUrl);
        } else if let Err(e) = reqwest::Url::parse(base_url) {
            issues.push(ConfigValidationError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            });
        }

        if self.server.connect_timeout_secs == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }

        if let Some(prompt) = &self.chat.system_prompt
            && prompt.trim().is_empty()
        {
            issues.push(ConfigValidationError::EmptySystemPrompt);
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[server]
base_url = "http://localhost:8080"
chat_path = "/api/chat"
connect_timeout_secs = 3

[chat]
system_prompt = "Answer in haiku."

[repl]
show_progress = false
history_file = "~/.local/share/streamchat/history.txt"

[logging]
file = "/tmp/streamchat.log"
conversation_log = "/tmp/streamchat.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url, "http://localhost:8080");
        assert_eq!(config.server.chat_path, "/api/chat");
        assert_eq!(config.server.connect_timeout_secs, 3);
        assert_eq!(config.chat.system_prompt.as_deref(), Some("Answer in haiku."));
        assert!(!config.repl.show_progress);
        assert_eq!(config.logging.file.as_deref(), Some("/tmp/streamchat.log"));
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("/tmp/streamchat.jsonl")
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.server.base_url, DEFAULT_BASE_URL);
        assert!(config.chat.system_prompt.is_none());
        assert!(config.repl.show_progress);
        assert!(config.logging.file.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_all_issues() {
        let mut config = FileConfig::default();
        config.server.base_url = "not a url".to_string();
        config.server.connect_timeout_secs = 0;
        config.chat.system_prompt = Some("   ".to_string());

        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(matches!(issues[0], ConfigValidationError::InvalidBaseUrl { .. }));
        assert_eq!(issues[1], ConfigValidationError::InvalidTimeout);
        assert_eq!(issues[2], ConfigValidationError::EmptySystemPrompt);
    }

    #[test]
    fn test_validate_empty_base_url() {
        let mut config = FileConfig::default();
        config.server.base_url = "  ".to_string();
        assert_eq!(config.validate(), vec![ConfigValidationError::EmptyBaseUrl]);
    }
}
