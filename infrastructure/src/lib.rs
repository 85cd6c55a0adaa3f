//! Infrastructure layer for streamchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileLoggingConfig,
    FileReplConfig, FileServerConfig,
};
pub use http::{DEFAULT_CHAT_PATH, HttpChatTransport};
pub use logging::JsonlConversationLogger;
