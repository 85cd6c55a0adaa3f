//! Conversation domain.
//!
//! - [`entities::Message`] - a single turn (user or assistant)
//! - [`history::Conversation`] - ordered history plus the system prompt
//! - [`request::ChatRequest`] - the outbound request payload

pub mod entities;
pub mod history;
pub mod request;
