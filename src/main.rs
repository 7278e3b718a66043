//! # gitactivity
//!
//! **gitactivity** prints a digest of recent commits across a set of tracked
//! git repositories.
//!
//! Features:
//! - `gitactivity add <name> <url>` starts tracking a repository
//! - `gitactivity delete <name>` stops tracking it and removes its clone
//! - `gitactivity list` shows tracked repositories
//! - `gitactivity fetch` clones or updates every tracked repository
//! - `gitactivity summarize` prints commits from the last 8 days, oldest first
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use clap::{Parser, Subcommand};
use gitactivity::{
    Paths, cmd_add, cmd_delete, cmd_fetch, cmd_list, cmd_summarize, setup_logger,
};
use std::path::PathBuf;

/// Command-line interface definition.
#[derive(Parser, Debug)]
#[command(
    name = "gitactivity",
    version,
    about = "gitactivity - digest of recent commits across tracked repositories",
    arg_required_else_help = true
)]
struct Cli {
    /// Settings file [default: ./repos.json]
    #[arg(long, global = true, env = "GITACTIVITY_SETTINGS")]
    settings: Option<PathBuf>,

    /// Directory holding local clones [default: .repos next to the executable]
    #[arg(long, global = true, env = "GITACTIVITY_REPOS_DIR")]
    repos_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Cmd {
    /// Clone/update every tracked repository
    Fetch,
    /// List tracked repositories
    List,
    /// Track a repository
    Add { name: String, url: String },
    /// Stop tracking a repository and remove its clone
    Delete { name: String },
    /// Print commits authored in the last 8 days
    Summarize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger();

    let paths = Paths::resolve(cli.settings, cli.repos_dir)?;
    paths.ensure_layout()?;

    match cli.cmd {
        Cmd::Fetch => cmd_fetch(&paths),
        Cmd::List => cmd_list(&paths),
        Cmd::Add { name, url } => cmd_add(&paths, &name, &url),
        Cmd::Delete { name } => cmd_delete(&paths, &name),
        Cmd::Summarize => cmd_summarize(&paths),
    }
}
