//! HTTP adapter for the chat endpoint.
//!
//! Sends `POST {base_url}/chat` with a JSON body and hands the response body
//! back as a stream of raw byte chunks. Frame decoding happens upstream in
//! the application layer; this adapter never looks inside the body.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use streamchat_application::ports::chat_transport::{ChatTransport, ChunkStream, TransportError};
use streamchat_domain::ChatRequest;
use tracing::debug;

/// Path of the chat endpoint relative to the server base URL.
pub const DEFAULT_CHAT_PATH: &str = "/chat";

/// [`ChatTransport`] over HTTP using `reqwest`.
#[derive(Clone)]
pub struct HttpChatTransport {
    client: Client,
    endpoint: String,
}

impl HttpChatTransport {
    /// Transport for `{base_url}/chat` with default client settings.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_settings(base_url, DEFAULT_CHAT_PATH, None)
    }

    /// Transport with an explicit endpoint path and connect timeout.
    ///
    /// No overall request timeout is set: a streamed reply has no declared
    /// length and may legitimately stay open for a long time.
    pub fn with_settings(
        base_url: &str,
        chat_path: &str,
        connect_timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let endpoint = join_url(base_url, chat_path);
        reqwest::Url::parse(&endpoint)
            .map_err(|e| TransportError::RequestFailed(format!("invalid endpoint '{endpoint}': {e}")))?;

        let mut builder = Client::builder();
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn map_request_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connection(error.to_string())
    } else {
        TransportError::RequestFailed(error.to_string())
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn open_stream(&self, request: &ChatRequest) -> Result<ChunkStream, TransportError> {
        debug!("POST {} ({} messages)", self.endpoint, request.messages.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!("Chat endpoint returned {}", status);
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| TransportError::Read(e.to_string())));
        Ok(body.boxed())
    }
}
