//! Chat transport port
//!
//! Defines how the application layer opens a streamed chat response.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use streamchat_domain::ChatRequest;
use thiserror::Error;

/// Errors that can occur while talking to the chat endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Server error: {0}")]
    Status(u16),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout")]
    Timeout,

    #[error("Stream read error: {0}")]
    Read(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Response body as it arrives, one network chunk per item.
///
/// Chunk boundaries are arbitrary: lines and UTF-8 code points may be split
/// across items.
pub type ChunkStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// Transport for the chat endpoint
///
/// Implementations (adapters) live in the infrastructure layer. They issue
/// exactly one request per call and never retry.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send the request and return the body stream once a success status
    /// has been received.
    ///
    /// A non-success status is reported as [`TransportError::Status`].
    async fn open_stream(&self, request: &ChatRequest) -> Result<ChunkStream, TransportError>;
}
