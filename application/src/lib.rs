//! Application layer for streamchat
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_transport::{ChatTransport, ChunkStream, TransportError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    stream_sink::{NoStreamSink, StreamSink},
};
pub use use_cases::send_message::{ChatController, ChatError};
pub use use_cases::stream_reply::{StreamReplyUseCase, StreamReport};
