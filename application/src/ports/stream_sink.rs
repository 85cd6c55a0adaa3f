//! Stream sink port
//!
//! The only boundary the streaming engine exposes upward. Implementations
//! live in the presentation layer and decide how progress is displayed.

/// Receives progress and outcomes of one streamed reply.
///
/// For a single send, the engine calls these in order:
///
/// - `on_delta` zero or more times, each with the full accumulated text
/// - at most one of `on_stream_error` / `on_fatal_error`
/// - `on_complete` at most once, at end of stream, if any text accumulated
///   and the transport did not fail
pub trait StreamSink: Send + Sync {
    /// A content frame arrived. `accumulated` extends the previous call's text.
    fn on_delta(&self, accumulated: &str);

    /// The server sent an error frame.
    fn on_stream_error(&self, message: &str);

    /// The request failed or the body could not be read.
    fn on_fatal_error(&self, message: &str);

    /// The stream ended cleanly with content.
    fn on_complete(&self, final_text: &str);
}

/// No-op sink for callers that only need the final report
pub struct NoStreamSink;

impl StreamSink for NoStreamSink {
    fn on_delta(&self, _accumulated: &str) {}
    fn on_stream_error(&self, _message: &str) {}
    fn on_fatal_error(&self, _message: &str) {}
    fn on_complete(&self, _final_text: &str) {}
}
