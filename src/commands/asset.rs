//! Asset command handler

use anyhow::{Context, Result};

use stylesmith::config::Config;
use stylesmith::infrastructure::StateLock;

/// Print the public URL of a job's output with its cache-busting token
pub fn cmd_asset(config: &Config, name: &str, json: bool) -> Result<bool> {
    let state_dir = config.state_dir();
    let _lock = StateLock::shared(&state_dir)
        .with_context(|| format!("cannot lock build state in {}", state_dir.display()))?;

    let orchestrator = super::orchestrator(config, config.build_settings(None, None))?;
    let reference = orchestrator.asset_reference(name)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "command": "asset",
                "name": reference.name,
                "public_path": reference.public_path,
                "cache_token": reference.cache_token,
                "url": reference.url(),
            })
        );
    } else {
        println!("{}", reference.url());
    }

    Ok(true)
}
