use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Top-level settings structure persisted in `repos.json`.
///
/// Example:
/// ```json
/// {"repos": [{"name": "tokio", "path": "/opt/gitactivity/.repos/tokio", "url": "https://github.com/tokio-rs/tokio.git"}]}
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub repos: Vec<TrackedRepo>,
}

/// A single tracked repository.
///
/// `path` is derived from `name` when the entry is added and never changes
/// afterwards. Extra keys in the file are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedRepo {
    pub name: String,
    pub path: String,
    pub url: String,
}

impl Settings {
    pub fn add(&mut self, repo: TrackedRepo) {
        self.repos.push(repo);
    }

    /// Index of the first repository named exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.repos.iter().position(|r| r.name == name)
    }

    /// Remove and return the first repository named exactly `name`.
    pub fn remove(&mut self, name: &str) -> Option<TrackedRepo> {
        self.position(name).map(|idx| self.repos.remove(idx))
    }
}

/// Load settings from `path`.
///
/// Never fails: a missing file yields empty settings silently, and a file
/// that cannot be read or parsed yields empty settings with a warning.
pub fn load_settings(path: &Path) -> Settings {
    let txt = match fs::read_to_string(path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("no settings at {}, starting empty", path.display());
            return Settings::default();
        }
        Err(e) => {
            warn!("cannot read {}: {}; using empty settings", path.display(), e);
            return Settings::default();
        }
    };

    match serde_json::from_str(&txt) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("cannot parse {}: {}; using empty settings", path.display(), e);
            Settings::default()
        }
    }
}

/// Serialize `settings` and overwrite the file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let txt = serde_json::to_string(settings).context("failed to serialize settings")?;
    fs::write(path, txt).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}
