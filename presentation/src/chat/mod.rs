//! Interactive chat mode

mod command;
mod repl;

pub use command::{ReplCommand, SUGGESTIONS, suggestion};
pub use repl::{ChatRepl, send_interruptible};
