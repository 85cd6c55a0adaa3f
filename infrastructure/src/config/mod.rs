//! Configuration file loading for streamchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./streamchat.toml` or `./.streamchat.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/streamchat/config.toml`
//! 4. Fallback: `~/.config/streamchat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, FileChatConfig, FileConfig, FileLoggingConfig,
    FileReplConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
