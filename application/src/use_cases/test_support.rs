//! Test doubles shared by the use case tests.

use crate::ports::chat_transport::{ChatTransport, ChunkStream, TransportError};
use crate::ports::stream_sink::StreamSink;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::sync::Mutex;
use streamchat_domain::ChatRequest;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SinkEvent {
    Delta(String),
    StreamError(String),
    FatalError(String),
    Complete(String),
}

/// Sink that records every callback in order.
pub(crate) struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
    cancel_on_delta: Option<CancellationToken>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            cancel_on_delta: None,
        }
    }

    pub(crate) fn cancelling_on_delta(mut self, token: CancellationToken) -> Self {
        self.cancel_on_delta = Some(token);
        self
    }

    pub(crate) fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: SinkEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl StreamSink for RecordingSink {
    fn on_delta(&self, accumulated: &str) {
        self.push(SinkEvent::Delta(accumulated.to_string()));
        if let Some(token) = &self.cancel_on_delta {
            token.cancel();
        }
    }

    fn on_stream_error(&self, message: &str) {
        self.push(SinkEvent::StreamError(message.to_string()));
    }

    fn on_fatal_error(&self, message: &str) {
        self.push(SinkEvent::FatalError(message.to_string()));
    }

    fn on_complete(&self, final_text: &str) {
        self.push(SinkEvent::Complete(final_text.to_string()));
    }
}

/// Transport that replays a fixed response for every request.
pub(crate) struct ScriptedTransport {
    response: Result<Vec<Result<Bytes, TransportError>>, TransportError>,
    hang: bool,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn with_items(items: Vec<Result<Bytes, TransportError>>) -> Self {
        Self {
            response: Ok(items),
            hang: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_items(
            chunks
                .into_iter()
                .map(|c| Ok(Bytes::from(c.into())))
                .collect(),
        )
    }

    pub(crate) fn byte_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self::with_items(chunks.into_iter().map(|c| Ok(Bytes::from(c))).collect())
    }

    pub(crate) fn failing(error: TransportError) -> Self {
        Self {
            response: Err(error),
            hang: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Keep the body open after the scripted chunks instead of ending it.
    pub(crate) fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub(crate) fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn open_stream(&self, request: &ChatRequest) -> Result<ChunkStream, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let items = self.response.clone()?;
        let body = futures::stream::iter(items);
        if self.hang {
            let open = futures::stream::pending::<Result<Bytes, TransportError>>();
            Ok(body.chain(open).boxed())
        } else {
            Ok(body.boxed())
        }
    }
}
