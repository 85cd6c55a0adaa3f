//! Per-request streaming state.

use super::decoder::{DecoderRemainder, FrameDecoder};
use super::event::StreamEvent;
use super::frame::FrameParse;

/// Lifecycle of one send/receive cycle.
///
/// ```text
/// Sending → StreamingSuccess
///         ↘ StreamingError
///         ↘ TransportFailed
/// ```
///
/// There is no idle phase: between sends no [`StreamSession`] exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Request issued, response headers not yet received.
    Sending,
    /// Body is streaming (or streamed) without an error frame.
    StreamingSuccess,
    /// An error frame arrived; the rest of the body is drained unprocessed.
    StreamingError,
    /// The request failed or the body could not be read.
    TransportFailed,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Sending => "sending",
            SessionPhase::StreamingSuccess => "streaming_success",
            SessionPhase::StreamingError => "streaming_error",
            SessionPhase::TransportFailed => "transport_failed",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something the caller must report after a chunk was ingested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// New content arrived. Carries the full accumulated text.
    Delta(String),
    /// The server reported an error mid-stream.
    StreamError(String),
    /// A data frame could not be decoded and was skipped.
    Discarded(String),
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub phase: SessionPhase,
    pub text: String,
    pub content_frames: usize,
    pub discarded_frames: usize,
    pub remainder: DecoderRemainder,
}

/// Transient state of one outstanding request (Entity)
///
/// Owns the frame decoder and the accumulated assistant text. Accumulated
/// text only ever grows: every [`SessionUpdate::Delta`] is a prefix-extension
/// of the previous one.
#[derive(Debug)]
pub struct StreamSession {
    decoder: FrameDecoder,
    accumulated: String,
    phase: SessionPhase,
    content_frames: usize,
    discarded_frames: usize,
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSession {
    pub fn new() -> Self {
        Self {
            decoder: FrameDecoder::new(),
            accumulated: String::new(),
            phase: SessionPhase::Sending,
            content_frames: 0,
            discarded_frames: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    /// Response headers arrived with a success status.
    pub fn begin_streaming(&mut self) {
        if self.phase == SessionPhase::Sending {
            self.phase = SessionPhase::StreamingSuccess;
        }
    }

    /// The request or a body read failed.
    pub fn fail_transport(&mut self) {
        self.phase = SessionPhase::TransportFailed;
    }

    /// Ingest one body chunk.
    ///
    /// After an error frame nothing more is processed: the remaining lines
    /// of the chunk and all later chunks are dropped.
    pub fn ingest(&mut self, chunk: &[u8]) -> Vec<SessionUpdate> {
        if self.phase != SessionPhase::StreamingSuccess {
            return Vec::new();
        }

        let mut updates = Vec::new();
        for frame in self.decoder.feed(chunk) {
            match frame {
                FrameParse::Event(StreamEvent::ContentDelta(delta)) => {
                    self.accumulated.push_str(&delta);
                    self.content_frames += 1;
                    updates.push(SessionUpdate::Delta(self.accumulated.clone()));
                }
                FrameParse::Event(StreamEvent::Error(message)) => {
                    self.phase = SessionPhase::StreamingError;
                    updates.push(SessionUpdate::StreamError(message));
                    break;
                }
                FrameParse::Event(StreamEvent::Done) | FrameParse::Ignored => {}
                FrameParse::Malformed(reason) => {
                    self.discarded_frames += 1;
                    updates.push(SessionUpdate::Discarded(reason));
                }
            }
        }
        updates
    }

    pub fn finish(self) -> SessionSummary {
        SessionSummary {
            phase: self.phase,
            text: self.accumulated,
            content_frames: self.content_frames,
            discarded_frames: self.discarded_frames,
            remainder: self.decoder.finish(),
        }
    }
}
