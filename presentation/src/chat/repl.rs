//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::{ReplCommand, SUGGESTIONS, suggestion};
use crate::config::ReplConfig;
use crate::output::TerminalSink;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use streamchat_application::{ChatController, ChatError, StreamReport};
use streamchat_domain::Role;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What the loop should do after a command.
enum Flow {
    Continue,
    Send(String),
    Quit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: Arc<ChatController>,
    config: ReplConfig,
    server: String,
}

impl ChatRepl {
    pub fn new(controller: Arc<ChatController>, config: ReplConfig) -> Self {
        Self {
            controller,
            config,
            server: String::new(),
        }
    }

    /// Server address shown in the welcome banner
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let line = match rl.readline(&format!("{} ", "You>".cyan().bold())) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let _ = rl.add_history_entry(line);

            let message = match ReplCommand::parse(line) {
                Some(command) => match self.handle_command(command) {
                    Flow::Continue => continue,
                    Flow::Quit => break,
                    Flow::Send(message) => message,
                },
                None => line.to_string(),
            };

            self.process_message(&message).await;
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│               streamchat                    │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if !self.server.is_empty() {
            println!("Server: {}", self.server);
        }
        println!("Title:  {}", self.controller.title());
        println!();
        Self::print_suggestions();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?      - Show this help");
        println!("  /clear, /new       - Start a new chat");
        println!("  /system [text]     - Show or set the system prompt");
        println!("  /history           - Show the conversation so far");
        println!("  /title             - Show the conversation title");
        println!("  /suggest [n]       - List suggestions or send suggestion n");
        println!("  /quit, /exit, /q   - Exit chat");
        println!();
        println!("{}", "Press Ctrl-C while a reply streams to stop it.".dimmed());
        println!();
    }

    fn print_suggestions() {
        println!("Try asking:");
        for (i, question) in SUGGESTIONS.iter().enumerate() {
            println!("  {} {}", format!("[{}]", i + 1).yellow(), question);
        }
        println!();
    }

    fn handle_command(&self, command: ReplCommand) -> Flow {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return Flow::Quit;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Clear => match self.controller.reset() {
                Ok(()) => println!("{}", "Started a new chat.".green()),
                Err(e) => println!("{} {}", "Error:".red().bold(), e),
            },
            ReplCommand::System(None) => {
                println!("{} {}", "System prompt:".cyan().bold(), self.controller.system_prompt());
            }
            ReplCommand::System(Some(text)) => {
                self.controller.set_system_prompt(&text);
                println!("{}", "System prompt updated.".green());
            }
            ReplCommand::History => self.print_history(),
            ReplCommand::Title => println!("{}", self.controller.title()),
            ReplCommand::Suggest(None) => Self::print_suggestions(),
            ReplCommand::Suggest(Some(n)) => match suggestion(n) {
                Some(question) => {
                    println!("{} {}", "You>".cyan().bold(), question);
                    return Flow::Send(question.to_string());
                }
                None => println!("No suggestion #{} (1-{})", n, SUGGESTIONS.len()),
            },
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        Flow::Continue
    }

    fn print_history(&self) {
        let history = self.controller.history();
        if history.is_empty() {
            println!("{}", "No messages yet.".dimmed());
            return;
        }
        println!();
        for message in history {
            let label = match message.role {
                Role::User => "You".cyan().bold(),
                Role::Assistant => "Assistant".magenta().bold(),
            };
            println!("{}: {}", label, message.content);
        }
        println!();
    }

    async fn process_message(&self, message: &str) {
        println!();
        let result = send_interruptible(&self.controller, message, self.config.show_progress).await;

        match result {
            Ok(report) if report.cancelled => println!("{}", "[stopped]".dimmed()),
            Ok(_) => {}
            Err(ChatError::EmptyMessage) => {}
            Err(e) => println!("{} {}", "Error:".red().bold(), e),
        }
        println!();
    }
}

/// Send one message, streaming the reply to stdout.
///
/// Ctrl-C while the reply streams cancels the send; text received so far is
/// kept.
pub async fn send_interruptible(
    controller: &ChatController,
    message: &str,
    show_progress: bool,
) -> Result<StreamReport, ChatError> {
    let sink = TerminalSink::stdout(show_progress);
    let cancel = CancellationToken::new();
    sink.start();

    let send = controller.send(message, &sink, &cancel);
    tokio::pin!(send);
    let result = loop {
        tokio::select! {
            result = &mut send => break result,
            _ = tokio::signal::ctrl_c(), if !cancel.is_cancelled() => {
                debug!("Ctrl-C: cancelling in-flight send");
                cancel.cancel();
            }
        }
    };
    sink.finish();
    result
}
