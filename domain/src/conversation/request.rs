//! Outbound chat request payload

use super::entities::Message;
use serde::{Deserialize, Serialize};

/// Body of a `POST /chat` request (Value Object)
///
/// Carries the complete history (including the newest user turn) and the
/// system prompt. The system prompt travels beside the history and is never
/// part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub system_prompt: String,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>, system_prompt: impl Into<String>) -> Self {
        Self {
            messages,
            system_prompt: system_prompt.into(),
        }
    }
}
