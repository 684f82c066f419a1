//! Build command handler

use std::sync::Arc;

use anyhow::{Context, Result};

use stylesmith::application::{BuildOptions, JobOutcome};
use stylesmith::config::Config;
use stylesmith::domain::ports::BuildEventSink;
use stylesmith::domain::value_objects::Style;
use stylesmith::infrastructure::{ConsoleEventSink, JsonEventSink, StateLock};

/// Execute the build command
pub fn cmd_build(
    config: &Config,
    names: Vec<String>,
    force: bool,
    style: Option<Style>,
    jobs: Option<u16>,
    json: bool,
    verbose: u8,
) -> Result<bool> {
    let state_dir = config.state_dir();
    let _lock = StateLock::exclusive(&state_dir)
        .with_context(|| format!("cannot lock build state in {}", state_dir.display()))?;

    let sink: Arc<dyn BuildEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stderr().show_skipped(verbose > 0))
    };

    let settings = config.build_settings(style, jobs.map(usize::from));
    let orchestrator = super::orchestrator(config, settings)?.with_event_sink(sink);
    let report = orchestrator.build(&BuildOptions::new().with_names(names).with_force(force));

    if !json {
        println!(
            "{} built, {} up to date, {} failed",
            report.built(),
            report.skipped(),
            report.failed()
        );
        for job in &report.jobs {
            if let JobOutcome::Failed(err) = &job.outcome {
                println!("  failed: {} ({})", job.name, err.kind());
            }
        }
    }

    Ok(!report.has_failures())
}
