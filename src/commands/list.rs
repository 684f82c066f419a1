//! List command handler

use anyhow::{Context, Result};

use stylesmith::application::{JobStatus, ListEntry};
use stylesmith::config::Config;
use stylesmith::domain::value_objects::Style;
use stylesmith::infrastructure::StateLock;

/// Execute the list command. Fails only for broken configuration entries.
pub fn cmd_list(config: &Config, style: Option<Style>, json: bool) -> Result<bool> {
    let state_dir = config.state_dir();
    let _lock = StateLock::shared(&state_dir)
        .with_context(|| format!("cannot lock build state in {}", state_dir.display()))?;

    let orchestrator = super::orchestrator(config, config.build_settings(style, None))?;
    let report = orchestrator.list();

    if json {
        let jobs: Vec<serde_json::Value> = report.entries.iter().map(entry_json).collect();
        println!(
            "{}",
            serde_json::json!({
                "command": "list",
                "jobs": jobs,
                "stale": report.stale(),
            })
        );
    } else if report.entries.is_empty() {
        println!("No jobs configured.");
    } else {
        let width = report
            .entries
            .iter()
            .map(|entry| entry.name.len())
            .max()
            .unwrap_or(0);
        for entry in &report.entries {
            let touched = if entry.touched { " (touched)" } else { "" };
            println!("{:<width$}  {}{}", entry.name, entry.status, touched);
        }
    }

    let valid = !report
        .entries
        .iter()
        .any(|entry| matches!(entry.status, JobStatus::Invalid(_)));
    Ok(valid)
}

fn entry_json(entry: &ListEntry) -> serde_json::Value {
    let mut value = serde_json::json!({
        "name": entry.name,
        "status": entry.status.label(),
        "style": entry.style.map(|s| s.as_str()),
        "output_path": entry.output_path.as_ref().map(|p| p.display().to_string()),
        "touched": entry.touched,
    });
    match &entry.status {
        JobStatus::SourceChanged { previous, current } => {
            value["previous_digest"] = previous.as_str().into();
            value["current_digest"] = current.as_str().into();
        }
        JobStatus::StyleChanged { previous, current } => {
            value["previous_style"] = previous.as_str().into();
            value["current_style"] = current.as_str().into();
        }
        JobStatus::Unreadable(err) => value["error"] = err.to_string().into(),
        JobStatus::Invalid(err) => value["error"] = err.to_string().into(),
        _ => {}
    }
    value
}
