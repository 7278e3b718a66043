use anyhow::{Context, Result};
use git2::{Cred, FetchOptions, Oid, RemoteCallbacks, Repository, build::RepoBuilder};
use std::path::Path;
use tracing::{debug, info};

/// Build a `FetchOptions` with SSH-agent credentials enabled.
///
/// This allows Git operations to authenticate using the user's SSH agent.
/// If no SSH key is found, it falls back to default credentials.
fn fetch_opts_with_creds() -> FetchOptions<'static> {
    let mut cb = RemoteCallbacks::new();
    cb.credentials(|_url, username_from_url, _allowed| {
        Cred::ssh_key_from_agent(username_from_url.unwrap_or("git")).or_else(|_| Cred::default())
    });

    let mut fo = FetchOptions::new();
    fo.remote_callbacks(cb);
    fo
}

/// Ensure that a clone of `url` exists at `dest` and is up to date.
///
/// - If nothing exists at `dest`, clones `url` into it.
/// - Otherwise opens the existing clone.
/// - Then fetches every configured remote.
///
/// The working tree is never touched after the initial clone.
///
/// # Errors
/// Returns an error if cloning, opening, or any fetch fails.
pub fn ensure_repo(url: &str, dest: &Path) -> Result<()> {
    let repo = if dest.exists() {
        Repository::open(dest)
            .with_context(|| format!("cannot open repository at {}", dest.display()))?
    } else {
        info!("cloning {} into {}", url, dest.display());
        let mut builder = RepoBuilder::new();
        builder.fetch_options(fetch_opts_with_creds());
        builder
            .clone(url, dest)
            .with_context(|| format!("git clone {}", url))?
    };

    fetch_all(&repo)
}

/// Perform `git fetch <remote>` for every remote of `repo`, using each
/// remote's configured refspecs.
///
/// # Errors
/// Returns an error on the first remote that fails to fetch.
pub fn fetch_all(repo: &Repository) -> Result<()> {
    let remotes = repo.remotes()?;
    for name in remotes.iter().flatten() {
        debug!("fetching {}", name);
        let mut remote = repo.find_remote(name)?;
        let mut fo = fetch_opts_with_creds();
        remote
            .fetch::<&str>(&[], Some(&mut fo), None)
            .with_context(|| format!("git fetch {}", name))?;
    }
    Ok(())
}

/// A commit as seen by the activity report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: Oid,
    /// Author time, seconds since the Unix epoch.
    pub authored: i64,
    pub summary: String,
}

/// Collect every commit reachable from any reference of the repository at
/// `path`.
///
/// Each commit appears once, however many refs reach it. References that do
/// not peel to a commit (e.g. a tag pointing at a tree) are skipped.
///
/// # Errors
/// Returns an error if the repository cannot be opened or walked.
pub fn collect_commits(path: &Path) -> Result<Vec<CommitInfo>> {
    let repo = Repository::open(path)
        .with_context(|| format!("cannot open repository at {}", path.display()))?;

    let mut walk = repo.revwalk()?;
    for reference in repo.references()? {
        let reference = reference?;
        match reference.peel_to_commit() {
            Ok(commit) => walk.push(commit.id())?,
            Err(e) => debug!(
                "skipping {}: {}",
                reference.name().unwrap_or("<non-utf8 ref>"),
                e.message()
            ),
        }
    }

    let mut out = Vec::new();
    for oid in walk {
        let commit = repo.find_commit(oid?)?;
        let summary = String::from_utf8_lossy(commit.summary_bytes().unwrap_or(&[])).into_owned();
        out.push(CommitInfo {
            id: commit.id(),
            authored: commit.author().when().seconds(),
            summary,
        });
    }
    Ok(out)
}
