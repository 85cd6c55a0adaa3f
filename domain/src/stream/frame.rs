//! Decoding of single `data: ` frames.
//!
//! A frame is one line of the response body:
//!
//! ```text
//! data: {"content": "Hel"}
//! data: {"error": "rate limited"}
//! data: [DONE]
//! ```
//!
//! Lines without the exact `data: ` prefix are framing noise (blank
//! separators, comments, `event:` lines) and are ignored.

use super::event::StreamEvent;
use serde::Deserialize;

/// Prefix that marks a data frame.
pub const DATA_PREFIX: &str = "data: ";

/// End-of-content sentinel payload.
pub const DONE_SENTINEL: &str = "[DONE]";

/// JSON payload of a data frame. Both fields are optional.
#[derive(Debug, Deserialize)]
struct FramePayload {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Result of decoding one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameParse {
    /// The line carried an event.
    Event(StreamEvent),
    /// Not a data frame, or a well-formed payload with nothing to report.
    Ignored,
    /// A data frame whose payload is not a valid JSON object.
    Malformed(String),
}

/// Decode one complete line (without its trailing `\n`).
///
/// `error` takes precedence over `content` when both are present. Empty
/// strings count as absent.
pub fn parse_frame(line: &str) -> FrameParse {
    let Some(raw) = line.strip_prefix(DATA_PREFIX) else {
        return FrameParse::Ignored;
    };
    let raw = raw.trim();

    if raw == DONE_SENTINEL {
        return FrameParse::Event(StreamEvent::Done);
    }

    let payload: FramePayload = match serde_json::from_str(raw) {
        Ok(payload) => payload,
        Err(e) => return FrameParse::Malformed(e.to_string()),
    };

    if let Some(error) = payload.error.filter(|e| !e.is_empty()) {
        return FrameParse::Event(StreamEvent::Error(error));
    }
    if let Some(content) = payload.content.filter(|c| !c.is_empty()) {
        return FrameParse::Event(StreamEvent::ContentDelta(content));
    }
    FrameParse::Ignored
}
