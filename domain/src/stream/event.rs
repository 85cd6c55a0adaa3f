//! Streaming events decoded from the chat response body.

/// One decoded event of a streamed chat response.
///
/// Each `data: ` line of the response carries at most one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental piece of assistant text, appended to what came before.
    ContentDelta(String),
    /// A mid-stream error reported by the server.
    Error(String),
    /// The `[DONE]` sentinel. Carries no payload.
    Done,
}
