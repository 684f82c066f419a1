//! Console Event Sink
//!
//! Human-readable progress lines, one per job transition.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{BuildEvent, BuildEventSink};

/// Writes progress to stderr (or any writer) so stdout stays clean for the summary
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    show_skipped: bool,
}

impl ConsoleEventSink {
    pub fn stderr() -> Self {
        Self::with_writer(io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            show_skipped: false,
        }
    }

    /// Also print a line for every up-to-date job
    pub fn show_skipped(mut self, enabled: bool) -> Self {
        self.show_skipped = enabled;
        self
    }

    fn render(&self, event: &BuildEvent) -> Option<String> {
        match event {
            BuildEvent::Started { job_count, force } => Some(if *force {
                format!("Building {} job(s) (forced)", job_count)
            } else {
                format!("Building {} job(s)", job_count)
            }),
            BuildEvent::Evaluating { .. } => None,
            BuildEvent::Skipped { name } if self.show_skipped => {
                Some(format!("  - {} up to date", name))
            }
            BuildEvent::Skipped { .. } => None,
            BuildEvent::Compiling {
                name,
                reason,
                style,
            } => Some(format!("  > {} ({}, {})", name, reason, style)),
            BuildEvent::Succeeded {
                name,
                output_path,
                compiler_output,
                ..
            } => {
                let mut line = format!("  ✓ {} -> {}", name, output_path.display());
                let trimmed = compiler_output.trim_end();
                if !trimmed.is_empty() {
                    line.push('\n');
                    line.push_str(&indent(trimmed));
                }
                Some(line)
            }
            BuildEvent::Failed { name, error, .. } => {
                Some(format!("  ✗ {}\n{}", name, indent(error.trim_end())))
            }
            BuildEvent::Completed { .. } => None,
        }
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("      {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

impl BuildEventSink for ConsoleEventSink {
    fn on_event(&self, event: BuildEvent) {
        let Some(line) = self.render(&event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}
