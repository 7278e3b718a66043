use anyhow::{Context, Result, bail};
use std::{
    env,
    ffi::OsStr,
    fs,
    path::{Component, Path, PathBuf},
};

/// File name of the settings file, resolved against the current directory.
pub const SETTINGS_FILE: &str = "repos.json";

/// Directory name holding the local clones, placed next to the executable.
pub const REPOS_DIR: &str = ".repos";

/// Locations the tool reads from and writes to.
///
/// Built once at startup and passed to every command; nothing else in the
/// crate resolves paths on its own.
#[derive(Clone, Debug)]
pub struct Paths {
    pub settings: PathBuf,
    pub repos: PathBuf,
}

impl Paths {
    pub fn new(settings: impl Into<PathBuf>, repos: impl Into<PathBuf>) -> Self {
        Self {
            settings: settings.into(),
            repos: repos.into(),
        }
    }

    /// Resolve the default locations, letting explicit overrides win.
    ///
    /// - settings: `<cwd>/repos.json`
    /// - clones: `<directory of the executable>/.repos`
    pub fn resolve(settings: Option<PathBuf>, repos: Option<PathBuf>) -> Result<Self> {
        let settings = match settings {
            Some(p) => p,
            None => env::current_dir()
                .context("cannot determine current directory")?
                .join(SETTINGS_FILE),
        };
        let repos = match repos {
            Some(p) => p,
            None => default_repos_dir()?,
        };
        Ok(Self::new(settings, repos))
    }

    /// Local clone path for a repository called `name`.
    ///
    /// Only meaningful for names accepted by [`validate_repo_name`].
    pub fn repo_path(&self, name: &str) -> PathBuf {
        self.repos.join(name)
    }

    /// Whether `path` is exactly one directory level below the clone
    /// directory, i.e. something this tool may remove.
    pub fn owns_clone(&self, path: &Path) -> bool {
        match path.strip_prefix(&self.repos) {
            Ok(rest) => is_single_dir(rest),
            Err(_) => false,
        }
    }

    /// Create the clone directory if it does not exist yet.
    pub fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(&self.repos)
            .with_context(|| format!("cannot create {}", self.repos.display()))
    }
}

/// Reject names that would not map to a single directory inside the clone
/// directory: empty, absolute, `.`/`..`, or containing separators.
pub fn validate_repo_name(name: &str) -> Result<()> {
    let mut comps = Path::new(name).components();
    match (comps.next(), comps.next()) {
        (Some(Component::Normal(c)), None) if c == OsStr::new(name) => Ok(()),
        _ => bail!("invalid repository name {:?}: must be a plain directory name", name),
    }
}

fn is_single_dir(path: &Path) -> bool {
    let mut comps = path.components();
    matches!((comps.next(), comps.next()), (Some(Component::Normal(_)), None))
}

fn default_repos_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("cannot locate executable")?;
    let base = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(base.join(REPOS_DIR))
}
