//! Clean command handler
//!
//! Removes generated outputs tracked in the build state.

use anyhow::{Context, Result};

use stylesmith::application::{CleanAction, CleanOptions};
use stylesmith::config::Config;
use stylesmith::infrastructure::StateLock;

/// Execute the clean command
pub fn cmd_clean(config: &Config, dry_run: bool, json: bool) -> Result<bool> {
    let state_dir = config.state_dir();
    let _lock = StateLock::exclusive(&state_dir)
        .with_context(|| format!("cannot lock build state in {}", state_dir.display()))?;

    let orchestrator = super::orchestrator(config, config.build_settings(None, None))?;
    let report = orchestrator.clean(&CleanOptions::new().with_dry_run(dry_run))?;

    if json {
        let entries: Vec<serde_json::Value> = report
            .entries
            .iter()
            .map(|entry| {
                let (action, error) = match &entry.action {
                    CleanAction::Removed => ("removed", None),
                    CleanAction::AlreadyAbsent => ("already_absent", None),
                    CleanAction::WouldRemove => ("would_remove", None),
                    CleanAction::WouldForget => ("would_forget", None),
                    CleanAction::Failed(err) => ("failed", Some(err.to_string())),
                };
                serde_json::json!({
                    "name": entry.name,
                    "output_path": entry.output_path.display().to_string(),
                    "action": action,
                    "error": error,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "command": "clean",
                "dry_run": report.dry_run,
                "entries": entries,
                "removed": report.removed(),
                "failed": report.failed(),
            })
        );
        return Ok(!report.has_failures());
    }

    if report.is_empty() {
        println!("Nothing to clean.");
        return Ok(true);
    }

    for entry in &report.entries {
        let path = entry.output_path.display();
        match &entry.action {
            CleanAction::Removed => println!("removed {} ({})", entry.name, path),
            CleanAction::AlreadyAbsent => println!("forgot {} ({} already gone)", entry.name, path),
            CleanAction::WouldRemove => println!("would remove {} ({})", entry.name, path),
            CleanAction::WouldForget => {
                println!("would forget {} ({} already gone)", entry.name, path)
            }
            CleanAction::Failed(err) => eprintln!("failed {}: {}", entry.name, err),
        }
    }

    Ok(!report.has_failures())
}
