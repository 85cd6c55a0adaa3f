//! Conversation state: ordered history plus the active system prompt.

use super::entities::{Message, Role};
use super::request::ChatRequest;
use crate::core::error::DomainError;
use crate::core::string::truncate_chars;

/// System prompt used when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful, friendly and intelligent AI assistant. \
Answer questions clearly and concisely. If you don't know something, say so honestly.";

/// Title shown for a conversation without any turns.
pub const UNTITLED: &str = "New Chat";

const TITLE_MAX_CHARS: usize = 40;

/// Conversation state manager (Entity)
///
/// Holds the ordered message history and the system prompt. Append order is
/// chronological order; user/assistant alternation is expected but not
/// enforced. The system prompt is sent with every request and never stored
/// in the history.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    system_prompt: String,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

impl Conversation {
    pub fn new(system_prompt: impl AsRef<str>) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: system_prompt.as_ref().trim().to_string(),
        }
    }

    /// Append a user turn.
    ///
    /// # Errors
    /// [`DomainError::EmptyMessage`] if `text` is empty after trimming.
    pub fn append_user(&mut self, text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        self.messages.push(Message::user(text));
        Ok(())
    }

    /// Append an assistant turn. Empty text is not recorded.
    ///
    /// Returns `true` if the turn was appended.
    pub fn append_assistant(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.messages.push(Message::assistant(text));
        true
    }

    /// Clear the history. The system prompt is kept.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub fn set_system_prompt(&mut self, text: &str) {
        self.system_prompt = text.trim().to_string();
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Build the outbound request from the committed history.
    ///
    /// An assistant reply still being streamed is not part of the history,
    /// so it can never leak into a snapshot.
    pub fn snapshot_for_request(&self) -> ChatRequest {
        ChatRequest::new(self.messages.clone(), self.system_prompt.clone())
    }

    /// Title derived from the first user message.
    pub fn title(&self) -> String {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| truncate_chars(&m.content, TITLE_MAX_CHARS))
            .unwrap_or_else(|| UNTITLED.to_string())
    }
}
