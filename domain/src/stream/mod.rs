//! Stream decoding domain.
//!
//! Turns the raw bytes of a streamed chat response into accumulated
//! assistant text:
//!
//! ```text
//! bytes ─► Utf8StreamDecoder ─► LineBuffer ─► parse_frame ─► StreamSession
//! ```
//!
//! Everything here is synchronous and total; the async read loop lives in
//! the application layer.

pub mod decoder;
pub mod event;
pub mod frame;
pub mod session;
