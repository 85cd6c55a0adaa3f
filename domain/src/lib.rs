//! Domain layer for streamchat
//!
//! This crate contains the conversation state and the stream frame decoder.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! - **Conversation**: ordered user/assistant turns plus the system prompt
//! - **Frame**: one `data: ...` line of a streamed response
//! - **Session**: transient state of one outstanding request

pub mod conversation;
pub mod core;
pub mod stream;

// Re-export commonly used types
pub use conversation::{
    entities::{Message, Role},
    history::{Conversation, DEFAULT_SYSTEM_PROMPT, UNTITLED},
    request::ChatRequest,
};
pub use core::{error::DomainError, string::truncate_chars};
pub use stream::{
    decoder::{DecoderRemainder, FrameDecoder, LineBuffer, Utf8StreamDecoder},
    event::StreamEvent,
    frame::{DATA_PREFIX, DONE_SENTINEL, FrameParse, parse_frame},
    session::{SessionPhase, SessionSummary, SessionUpdate, StreamSession},
};
