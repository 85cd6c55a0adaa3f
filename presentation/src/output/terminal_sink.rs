//! Renders a streamed reply to the terminal.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use streamchat_application::StreamSink;

struct SinkState {
    out: Box<dyn Write + Send>,
    /// Bytes of the accumulated reply already written.
    printed: usize,
    spinner: Option<ProgressBar>,
}

impl SinkState {
    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Ends the current reply line if text was written on it.
    fn end_line(&mut self) {
        if self.printed > 0 {
            let _ = writeln!(self.out);
            self.printed = 0;
        }
    }

    fn write_error(&mut self, message: &str) {
        self.clear_spinner();
        self.end_line();
        let _ = writeln!(self.out, "{} {}", "Error:".red().bold(), message.red());
        let _ = self.out.flush();
    }
}

/// [`StreamSink`] that prints each delta's new suffix as it arrives.
///
/// While waiting for the first delta an optional spinner acts as the typing
/// indicator. Errors are printed inline in red.
pub struct TerminalSink {
    state: Mutex<SinkState>,
    show_progress: bool,
}

impl TerminalSink {
    /// Sink writing to stdout.
    pub fn stdout(show_progress: bool) -> Self {
        Self::with_writer(Box::new(io::stdout()), show_progress)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, show_progress: bool) -> Self {
        Self {
            state: Mutex::new(SinkState {
                out,
                printed: 0,
                spinner: None,
            }),
            show_progress,
        }
    }

    fn state(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Show the typing indicator until the first delta or error.
    pub fn start(&self) {
        if !self.show_progress {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_message("Thinking...".dimmed().to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        let mut state = self.state();
        state.clear_spinner();
        state.spinner = Some(spinner);
    }

    /// Tear down the indicator and terminate any partial line.
    ///
    /// Needed after a cancelled send, where no terminal callback fires.
    pub fn finish(&self) {
        let mut state = self.state();
        state.clear_spinner();
        state.end_line();
        let _ = state.out.flush();
    }
}

impl StreamSink for TerminalSink {
    fn on_delta(&self, accumulated: &str) {
        let mut state = self.state();
        state.clear_spinner();
        if let Some(suffix) = accumulated.get(state.printed..) {
            let _ = write!(state.out, "{suffix}");
            let _ = state.out.flush();
        }
        state.printed = accumulated.len();
    }

    fn on_stream_error(&self, message: &str) {
        self.state().write_error(message);
    }

    fn on_fatal_error(&self, message: &str) {
        self.state().write_error(message);
    }

    fn on_complete(&self, _final_text: &str) {
        let mut state = self.state();
        state.clear_spinner();
        state.end_line();
        let _ = state.out.flush();
    }
}
