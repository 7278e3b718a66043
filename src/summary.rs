use anyhow::Result;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use std::collections::HashSet;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

use crate::git::{CommitInfo, collect_commits};
use crate::paths::Paths;
use crate::settings::{Settings, load_settings};

/// Length of the trailing window covered by the report.
pub const WINDOW_DAYS: i64 = 8;

/// `ctime(3)`-style layout, without the trailing newline.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// One line of the activity report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub repo: String,
    pub commit: CommitInfo,
}

/// CLI command: print recent commits across all tracked repositories,
/// oldest first, with times in the local timezone.
///
/// # Errors
/// Returns an error if any tracked repository cannot be opened or walked.
/// Nothing is printed in that case.
pub fn cmd_summarize(paths: &Paths) -> Result<()> {
    let settings = load_settings(&paths.settings);
    let entries = collect_activity(&settings, Utc::now())?;
    let mut out = io::stdout().lock();
    for entry in &entries {
        writeln!(out, "{}", render_line(entry, &Local))?;
    }
    Ok(())
}

/// Whether a commit authored at `authored` (Unix seconds) is less than
/// [`WINDOW_DAYS`] old at `now`. Commits dated after `now` count as recent.
pub fn in_window(authored: i64, now: DateTime<Utc>) -> bool {
    let cutoff = now
        .timestamp()
        .saturating_sub(TimeDelta::days(WINDOW_DAYS).num_seconds());
    authored > cutoff
}

/// Gather every commit inside the window from every tracked repository,
/// sorted by author time ascending.
///
/// Ties on author time are ordered by commit id, then repository name.
/// A `(repository, commit)` pair is reported at most once.
///
/// # Errors
/// Fails on the first repository that cannot be read.
pub fn collect_activity(settings: &Settings, now: DateTime<Utc>) -> Result<Vec<ActivityEntry>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for repo in &settings.repos {
        let commits = collect_commits(Path::new(&repo.path))?;
        let total = commits.len();
        let mut kept = 0;
        for commit in commits {
            if !in_window(commit.authored, now) {
                continue;
            }
            if seen.insert((repo.name.clone(), commit.id)) {
                kept += 1;
                entries.push(ActivityEntry {
                    repo: repo.name.clone(),
                    commit,
                });
            }
        }
        debug!("{}: {} of {} commits in window", repo.name, kept, total);
    }

    entries.sort_by(|a, b| {
        a.commit
            .authored
            .cmp(&b.commit.authored)
            .then_with(|| a.commit.id.cmp(&b.commit.id))
            .then_with(|| a.repo.cmp(&b.repo))
    });
    Ok(entries)
}

/// Format `<repo> | <ctime> | <summary>` with the author time shown in `tz`.
pub fn render_line<Tz>(entry: &ActivityEntry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} | {} | {}",
        entry.repo,
        format_ctime(entry.commit.authored, tz),
        entry.commit.summary
    )
}

fn format_ctime<Tz>(secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_opt(secs, 0).earliest() {
        Some(dt) => dt.format(CTIME_FORMAT).to_string(),
        None => secs.to_string(),
    }
}
