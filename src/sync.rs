use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, info_span};
use tracing_indicatif::indicatif_eprintln;
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_indicatif::style::ProgressStyle;

use crate::git::ensure_repo;
use crate::paths::Paths;
use crate::settings::{TrackedRepo, load_settings};

const SPINNER_TEMPLATE: &str = "\x1b[33m{spinner}\x1b[0m {wide_msg}";
const SPINNER_TICKS: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Clone or update every tracked repository.
///
/// Expects the clone directory to exist already (see [`Paths::ensure_layout`]).
/// Nothing to do if no repository is tracked.
///
/// # Errors
/// Returns the first sync error; later repositories are not attempted.
pub fn cmd_fetch(paths: &Paths) -> Result<()> {
    let settings = load_settings(&paths.settings);
    if settings.repos.is_empty() {
        eprintln!("no repositories in {}", paths.settings.display());
        return Ok(());
    }

    sync_repos(&settings.repos)
}

/// Clone or fetch each repository in order.
///
/// While a repository syncs, its span shows a `syncing <name>` spinner. When
/// it finishes, a ✔ or ✘ line (see [`outcome_line`]) replaces the spinner.
/// The first failure stops the run.
pub fn sync_repos(repos: &[TrackedRepo]) -> Result<()> {
    for repo in repos {
        let span = info_span!("sync", repo = %repo.name);
        span.pb_set_style(&spinner_style());
        span.pb_set_message(&format!("syncing {}", repo.name));

        let res = span
            .in_scope(|| ensure_repo(&repo.url, Path::new(&repo.path)))
            .with_context(|| format!("failed to sync {}", repo.name));
        drop(span);

        indicatif_eprintln!("{}", outcome_line(&repo.name, &res));
        match res {
            Ok(()) => info!("synced {} from {}", repo.name, repo.url),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(SPINNER_TICKS)
}

/// Final line for a repository: a green check mark on success, or a red
/// cross with the full error chain.
fn outcome_line(name: &str, res: &Result<()>) -> String {
    match res {
        Ok(()) => format!("\x1b[32m✔\x1b[0m synced {}", name),
        Err(e) => format!("\x1b[31m✘\x1b[0m syncing {} (error: {:#})", name, e),
    }
}
