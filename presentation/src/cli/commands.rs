//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for streamchat
#[derive(Parser, Debug)]
#[command(name = "streamchat")]
#[command(author, version, about = "Terminal chat client for a streaming completion server")]
#[command(long_about = r#"
streamchat talks to a chat server that streams replies as `data:` lines.
Replies are printed as they arrive; press Ctrl-C to stop one early.

Without MESSAGE an interactive chat starts. With MESSAGE a single reply is
streamed to stdout and the program exits.

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./streamchat.toml        Project-level config
3. ~/.config/streamchat/config.toml   Global config

Example:
  streamchat
  streamchat --server http://localhost:5000 "Explain quantum computing simply"
  streamchat --system-prompt "Answer like a pirate."
"#)]
pub struct Cli {
    /// Send a single message and exit (interactive chat if omitted)
    pub message: Option<String>,

    /// Base URL of the chat server
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// System prompt sent with every request
    #[arg(long, value_name = "TEXT")]
    pub system_prompt: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the typing indicator
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
