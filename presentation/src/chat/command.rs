//! Slash command parsing for the chat REPL

/// Starter questions offered on the welcome screen.
pub const SUGGESTIONS: [&str; 4] = [
    "What can you help me with?",
    "Write a Python function to sort a list",
    "Explain quantum computing in simple terms",
    "Give me 5 creative startup ideas",
];

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    /// Start a new conversation
    Clear,
    /// Show the system prompt, or replace it
    System(Option<String>),
    History,
    Title,
    /// List suggestions, or send the n-th one (1-based)
    Suggest(Option<usize>),
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for ordinary messages.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (rest, None),
        };

        let command = match name {
            "help" | "h" | "?" => ReplCommand::Help,
            "clear" | "new" => ReplCommand::Clear,
            "system" => ReplCommand::System(arg.map(str::to_string)),
            "history" => ReplCommand::History,
            "title" => ReplCommand::Title,
            "suggest" => match arg {
                None => ReplCommand::Suggest(None),
                Some(n) => match n.parse::<usize>() {
                    Ok(n) => ReplCommand::Suggest(Some(n)),
                    Err(_) => ReplCommand::Unknown(line.to_string()),
                },
            },
            "quit" | "exit" | "q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// Look up a 1-based suggestion number.
pub fn suggestion(n: usize) -> Option<&'static str> {
    n.checked_sub(1).and_then(|i| SUGGESTIONS.get(i)).copied()
}
