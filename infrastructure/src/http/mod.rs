//! HTTP adapters.

pub mod transport;

pub use transport::{DEFAULT_CHAT_PATH, HttpChatTransport};
