//! Stream Reply use case.
//!
//! Drives one request/response cycle against the chat endpoint and reports
//! progress through a [`StreamSink`]:
//!
//! ```text
//! open_stream ──► for each chunk: StreamSession::ingest ──► sink
//!      │                                   │
//!      └─ error ──► on_fatal_error         └─ end ──► on_complete (if text)
//! ```
//!
//! The loop suspends only while awaiting response headers and body chunks;
//! everything done with a chunk is synchronous. No retries are attempted.

use crate::ports::chat_transport::ChatTransport;
use crate::ports::stream_sink::StreamSink;
use futures::StreamExt;
use std::sync::Arc;
use streamchat_domain::{ChatRequest, SessionPhase, SessionSummary, SessionUpdate, StreamSession};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Outcome of one streamed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamReport {
    /// Phase the session ended in.
    pub outcome: SessionPhase,
    /// Accumulated assistant text (possibly partial).
    pub text: String,
    /// Error message reported to the sink, if any.
    pub error: Option<String>,
    /// Number of content frames received.
    pub content_frames: usize,
    /// Number of malformed frames that were skipped.
    pub discarded_frames: usize,
    /// The caller cancelled the send before the stream ended.
    pub cancelled: bool,
}

impl StreamReport {
    fn from_summary(summary: SessionSummary, error: Option<String>, cancelled: bool) -> Self {
        Self {
            outcome: summary.phase,
            text: summary.text,
            error,
            content_frames: summary.content_frames,
            discarded_frames: summary.discarded_frames,
            cancelled,
        }
    }

    /// Text that should be committed as the assistant turn.
    ///
    /// `None` when nothing accumulated or the transport failed.
    pub fn completed_text(&self) -> Option<&str> {
        if self.outcome == SessionPhase::TransportFailed || self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == SessionPhase::StreamingSuccess && !self.cancelled
    }
}

/// Use case for streaming one assistant reply.
pub struct StreamReplyUseCase {
    transport: Arc<dyn ChatTransport>,
}

impl Clone for StreamReplyUseCase {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
        }
    }
}

impl StreamReplyUseCase {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    /// Stream a reply to completion.
    pub async fn execute(&self, request: &ChatRequest, sink: &dyn StreamSink) -> StreamReport {
        self.execute_with_cancellation(request, sink, &CancellationToken::new())
            .await
    }

    /// Stream a reply, stopping early if `cancel` fires.
    ///
    /// The token is checked while awaiting headers and at every chunk
    /// boundary. On cancellation the body stream is dropped, and text
    /// accumulated so far is still reported through `on_complete`.
    pub async fn execute_with_cancellation(
        &self,
        request: &ChatRequest,
        sink: &dyn StreamSink,
        cancel: &CancellationToken,
    ) -> StreamReport {
        let mut session = StreamSession::new();
        info!(
            "Sending chat request ({} messages)",
            request.messages.len()
        );

        let opened = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Send cancelled before response headers");
                return StreamReport::from_summary(session.finish(), None, true);
            }
            opened = self.transport.open_stream(request) => opened,
        };

        let mut chunks = match opened {
            Ok(chunks) => chunks,
            Err(e) => {
                warn!("Chat request failed: {}", e);
                session.fail_transport();
                let message = e.to_string();
                sink.on_fatal_error(&message);
                return StreamReport::from_summary(session.finish(), Some(message), false);
            }
        };
        session.begin_streaming();

        let mut error = None;
        let mut cancelled = false;
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                next = chunks.next() => next,
            };

            let chunk = match next {
                Some(Ok(chunk)) => chunk,
                Some(Err(e)) if session.phase() == SessionPhase::StreamingError => {
                    debug!("Stream: read failed while draining after error frame: {}", e);
                    break;
                }
                Some(Err(e)) => {
                    warn!("Stream read failed: {}", e);
                    session.fail_transport();
                    let message = e.to_string();
                    sink.on_fatal_error(&message);
                    error = Some(message);
                    break;
                }
                None => break,
            };

            trace!("Stream: chunk ({} bytes)", chunk.len());
            for update in session.ingest(&chunk) {
                match update {
                    SessionUpdate::Delta(accumulated) => sink.on_delta(&accumulated),
                    SessionUpdate::StreamError(message) => {
                        warn!("Stream: error frame: {}", message);
                        sink.on_stream_error(&message);
                        error = Some(message);
                    }
                    SessionUpdate::Discarded(reason) => {
                        debug!("Stream: discarded malformed frame: {}", reason);
                    }
                }
            }
        }
        // Release the body before reporting completion.
        drop(chunks);

        let summary = session.finish();
        if !summary.remainder.is_empty() {
            debug!(
                "Stream: dropped unterminated tail ({} chars, {} pending bytes)",
                summary.remainder.fragment.len(),
                summary.remainder.pending_bytes
            );
        }

        let report = StreamReport::from_summary(summary, error, cancelled);
        if let Some(text) = report.completed_text() {
            sink.on_complete(text);
        }
        debug!(
            "Stream finished: {} ({} content frames, {} discarded, cancelled: {})",
            report.outcome, report.content_frames, report.discarded_frames, report.cancelled
        );
        report
    }
}
