//! JSON Event Sink
//!
//! Outputs build events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{BuildEvent, BuildEventSink};

/// Event sink that writes one JSON object per line
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Write to a custom writer (used by tests)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of an event
pub fn event_to_json(event: &BuildEvent) -> serde_json::Value {
    match event {
        BuildEvent::Started { job_count, force } => serde_json::json!({
            "event": "start",
            "command": "build",
            "job_count": job_count,
            "force": force,
        }),

        BuildEvent::Evaluating { name } => serde_json::json!({
            "event": "job_evaluating",
            "command": "build",
            "name": name,
        }),

        BuildEvent::Skipped { name } => serde_json::json!({
            "event": "job_skipped",
            "command": "build",
            "name": name,
            "reason": "up to date",
        }),

        BuildEvent::Compiling {
            name,
            reason,
            style,
        } => serde_json::json!({
            "event": "job_compiling",
            "command": "build",
            "name": name,
            "reason": reason,
            "style": style.as_str(),
        }),

        BuildEvent::Succeeded {
            name,
            output_path,
            digest,
            compiler_output,
        } => serde_json::json!({
            "event": "job_succeeded",
            "command": "build",
            "name": name,
            "output_path": output_path.display().to_string(),
            "digest": digest.as_str(),
            "compiler_output": compiler_output,
        }),

        BuildEvent::Failed { name, kind, error } => serde_json::json!({
            "event": "job_failed",
            "command": "build",
            "name": name,
            "kind": kind,
            "error": error,
        }),

        BuildEvent::Completed {
            built,
            skipped,
            failed,
        } => serde_json::json!({
            "event": "complete",
            "command": "build",
            "status": if *failed == 0 { "success" } else { "partial" },
            "built": built,
            "skipped": skipped,
            "failed": failed,
        }),
    }
}

impl BuildEventSink for JsonEventSink {
    fn on_event(&self, event: BuildEvent) {
        self.write_event(event_to_json(&event));
    }
}
