//! Send Message use case.
//!
//! [`ChatController`] is the single owner of the conversation and of the
//! "is loading" flag. Input handlers dispatch into it; it appends the user
//! turn, snapshots the request, runs [`StreamReplyUseCase`], and commits the
//! assistant turn when the stream produced text.

use crate::ports::chat_transport::ChatTransport;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::stream_sink::StreamSink;
use crate::use_cases::stream_reply::{StreamReplyUseCase, StreamReport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use streamchat_domain::{Conversation, DomainError, Message};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur when dispatching into the controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("A reply is still streaming")]
    Busy,
}

impl From<DomainError> for ChatError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::EmptyMessage => ChatError::EmptyMessage,
        }
    }
}

/// Holds the loading flag for the duration of one send.
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Top-level chat controller.
///
/// At most one send is in flight at a time; a concurrent [`send`] is
/// rejected with [`ChatError::Busy`] without touching the conversation.
///
/// [`send`]: ChatController::send
pub struct ChatController {
    conversation: Mutex<Conversation>,
    loading: AtomicBool,
    stream_reply: StreamReplyUseCase,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatController {
    pub fn new(transport: Arc<dyn ChatTransport>, conversation: Conversation) -> Self {
        Self {
            conversation: Mutex::new(conversation),
            loading: AtomicBool::new(false),
            stream_reply: StreamReplyUseCase::new(transport),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Set a conversation logger for structured event recording.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    fn conversation(&self) -> MutexGuard<'_, Conversation> {
        self.conversation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Send a user message and stream the reply into `sink`.
    ///
    /// The user turn is recorded before the request goes out and stays in
    /// the history even if the reply fails. The assistant turn is recorded
    /// only when the reply produced text.
    pub async fn send(
        &self,
        text: &str,
        sink: &dyn StreamSink,
        cancel: &CancellationToken,
    ) -> Result<StreamReport, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let Some(_loading) = LoadingGuard::acquire(&self.loading) else {
            debug!("Rejected send while a reply is streaming");
            return Err(ChatError::Busy);
        };

        let request = {
            let mut conversation = self.conversation();
            conversation.append_user(text)?;
            conversation.snapshot_for_request()
        };
        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            serde_json::json!({
                "content": text,
                "turn": request.messages.len(),
            }),
        ));

        let report = self
            .stream_reply
            .execute_with_cancellation(&request, sink, cancel)
            .await;

        let committed = match report.completed_text() {
            Some(reply) => self.conversation().append_assistant(reply),
            None => false,
        };
        info!(
            "Reply finished: {} (committed: {}, {} bytes)",
            report.outcome,
            committed,
            report.text.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "assistant_reply",
            serde_json::json!({
                "outcome": report.outcome.as_str(),
                "content": report.text,
                "error": report.error,
                "committed": committed,
                "content_frames": report.content_frames,
                "discarded_frames": report.discarded_frames,
                "cancelled": report.cancelled,
            }),
        ));

        Ok(report)
    }

    /// Clear the history. Rejected while a reply is streaming.
    pub fn reset(&self) -> Result<(), ChatError> {
        if self.is_loading() {
            return Err(ChatError::Busy);
        }
        self.conversation().reset();
        self.conversation_logger
            .log(ConversationEvent::new("reset", serde_json::json!({})));
        Ok(())
    }

    pub fn set_system_prompt(&self, text: &str) {
        self.conversation().set_system_prompt(text);
        self.conversation_logger.log(ConversationEvent::new(
            "system_prompt",
            serde_json::json!({ "content": text.trim() }),
        ));
    }

    pub fn system_prompt(&self) -> String {
        self.conversation().system_prompt().to_string()
    }

    pub fn history(&self) -> Vec<Message> {
        self.conversation().messages().to_vec()
    }

    pub fn title(&self) -> String {
        self.conversation().title()
    }
}
