//! Terminal output for streamed replies

pub mod terminal_sink;

pub use terminal_sink::TerminalSink;
