//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (`--config`, `--json`, `--verbose`) are inherited by all
//! subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::Style;

/// Stylesmith - incremental stylesheet builds
#[derive(Parser, Debug)]
#[command(name = "stylesmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./stylesmith.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output NDJSON events / JSON reports for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile stale jobs (all, or the named ones)
    Build {
        /// Job names; builds every configured job when omitted
        #[arg(value_name = "NAME")]
        names: Vec<String>,

        /// Rebuild even if up to date
        #[arg(short, long)]
        force: bool,

        /// Output style for every job, overriding configuration
        #[arg(short, long, value_enum)]
        style: Option<Style>,

        /// Number of jobs compiled in parallel
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
        jobs: Option<u16>,
    },

    /// Show which jobs are up to date, missing or changed
    List {
        /// Evaluate against this style instead of the configured one
        #[arg(short, long, value_enum)]
        style: Option<Style>,
    },

    /// Delete generated outputs and their build records
    Clean {
        /// Show what would be removed without removing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the cache-busted public URL of a job's output
    Asset {
        /// Job name
        name: String,
    },
}
