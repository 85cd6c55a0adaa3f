//! Chat configuration from TOML (`[chat]` section)

use serde::{Deserialize, Serialize};
use streamchat_domain::DEFAULT_SYSTEM_PROMPT;

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// System prompt sent with every request
    pub system_prompt: Option<String>,
}

impl FileChatConfig {
    /// Configured system prompt, falling back to the built-in default
    /// when unset or blank.
    pub fn system_prompt_or_default(&self) -> &str {
        self.system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_default() {
        let config = FileChatConfig::default();
        assert_eq!(config.system_prompt_or_default(), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_blank_system_prompt_falls_back() {
        let config = FileChatConfig {
            system_prompt: Some("  ".to_string()),
        };
        assert_eq!(config.system_prompt_or_default(), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_system_prompt_from_toml() {
        let toml_str = r#"
[chat]
system_prompt = "You are a pirate."
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chat.system_prompt_or_default(), "You are a pirate.");
    }
}
