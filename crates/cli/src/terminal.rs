use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::warn;

use kbsync_core::{IngestionStatus, SyncError};
use kbsync_sync::{BatchReport, Prompter, Reporter, SyncEvent};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const PROMPT: Color = Color::Green;
    const HEADER: Color = Color::Magenta;
    const KNOWLEDGE_BASE: Color = Color::Cyan;
    const DETAIL: Color = Color::DarkGrey;
    const DATA_SOURCE: Color = Color::Yellow;
    const SUCCESS: Color = Color::Green;
    const ERROR: Color = Color::Red;
    const TEXT: Color = Color::Reset;
}

fn event_color(event: &SyncEvent<'_>) -> Color {
    match event {
        SyncEvent::BatchStarted { .. } => Colors::HEADER,
        SyncEvent::KnowledgeBaseStarted { .. } => Colors::KNOWLEDGE_BASE,
        SyncEvent::KnowledgeBaseResolved { .. } | SyncEvent::DataSourcesFound { .. } => {
            Colors::DETAIL
        }
        SyncEvent::DataSourceStarted { .. } => Colors::DATA_SOURCE,
        SyncEvent::IngestionStarted { .. } | SyncEvent::StatusPolled { .. } => Colors::TEXT,
        SyncEvent::IngestionFinished { job } => match job.status {
            IngestionStatus::Complete => Colors::SUCCESS,
            _ => Colors::ERROR,
        },
        SyncEvent::KnowledgeBaseFailed { .. } => Colors::ERROR,
    }
}

/// Console I/O for a sync run: prompts on stdin, progress on stdout.
pub struct Terminal {
    color: bool,
}

impl Terminal {
    /// Colors are used only when stdout is a terminal and not disabled.
    pub fn new(no_color: bool) -> Self {
        Self {
            color: !no_color && io::stdout().is_terminal(),
        }
    }

    fn print_line(&self, color: Color, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        if self.color {
            execute!(
                stdout,
                SetForegroundColor(color),
                Print(text),
                ResetColor,
                Print("\n"),
            )?;
        } else {
            execute!(stdout, Print(text), Print("\n"))?;
        }
        stdout.flush()
    }

    fn write_event(&self, event: &SyncEvent<'_>) -> io::Result<()> {
        if matches!(event, SyncEvent::BatchStarted { .. }) {
            execute!(io::stdout(), Print("\n"))?;
        }
        self.print_line(event_color(event), &event.to_string())?;
        if event.ends_block() {
            execute!(io::stdout(), Print("\n"))?;
        }
        Ok(())
    }

    /// Print an informational message.
    pub fn print_info(&self, message: &str) -> Result<()> {
        self.print_line(Colors::TEXT, message)?;
        Ok(())
    }

    /// Print the end-of-run summary.
    pub fn print_summary(&self, report: &BatchReport) -> Result<()> {
        let color = if report.failed() == 0 {
            Colors::SUCCESS
        } else {
            Colors::ERROR
        };
        self.print_line(color, &report.summary_line())?;
        Ok(())
    }
}

impl Reporter for Terminal {
    fn report(&mut self, event: SyncEvent<'_>) {
        if let Err(e) = self.write_event(&event) {
            warn!(error = %e, "Failed to write progress line");
        }
    }
}

impl Prompter for Terminal {
    fn prompt(&mut self, message: &str) -> Result<Option<String>, SyncError> {
        let mut stdout = io::stdout();
        if self.color {
            execute!(stdout, SetForegroundColor(Colors::PROMPT), Print(message), ResetColor)?;
        } else {
            execute!(stdout, Print(message))?;
        }
        stdout.flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }
}
