//! Stylesmith CLI - incremental stylesheet builds
//!
//! Usage: stylesmith [--config PATH] [--json] [-v...] <COMMAND>
//!
//! Commands:
//!   build   Compile stale jobs
//!   list    Show job freshness
//!   clean   Delete generated outputs
//!   asset   Print a job's cache-busted public URL

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use stylesmith::presentation::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    stylesmith::logging::init(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Build {
            names,
            force,
            style,
            jobs,
        } => commands::cmd_build(&config, names, force, style, jobs, cli.json, cli.verbose),
        Commands::List { style } => commands::cmd_list(&config, style, cli.json),
        Commands::Clean { dry_run } => commands::cmd_clean(&config, dry_run, cli.json),
        Commands::Asset { name } => commands::cmd_asset(&config, &name, cli.json),
    }
}
