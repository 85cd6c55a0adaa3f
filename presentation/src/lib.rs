//! Presentation layer for streamchat
//!
//! This crate contains CLI definitions, the terminal stream sink,
//! and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::TerminalSink;
