use anyhow::{Context, Result, bail};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use crate::paths::{Paths, validate_repo_name};
use crate::settings::{TrackedRepo, load_settings, save_settings};

/// CLI command: start tracking `url` under `name`.
///
/// The clone path is derived from `name` inside the clone directory. Names
/// are not checked for uniqueness.
///
/// # Errors
/// - Returns an error, leaving settings untouched, if `name` is not a plain
///   directory name (see [`validate_repo_name`]).
/// - Returns an error if the settings file cannot be written.
pub fn cmd_add(paths: &Paths, name: &str, url: &str) -> Result<()> {
    validate_repo_name(name)?;
    let mut settings = load_settings(&paths.settings);
    let repo = TrackedRepo {
        name: name.to_string(),
        path: paths.repo_path(name).to_string_lossy().into_owned(),
        url: url.to_string(),
    };
    info!("tracking {} at {}", repo.name, repo.path);
    settings.add(repo);
    save_settings(&paths.settings, &settings)
}

/// CLI command: stop tracking `name` and remove its local clone.
///
/// Settings are persisted before the clone directory is removed. A clone
/// that was never fetched is not an error. A stored path that is not a
/// direct child of the clone directory is left on disk.
///
/// # Errors
/// - Returns an error naming the repository if no entry matches `name`.
/// - Returns an error if the settings file or the clone cannot be removed.
pub fn cmd_delete(paths: &Paths, name: &str) -> Result<()> {
    let mut settings = load_settings(&paths.settings);
    let Some(repo) = settings.remove(name) else {
        bail!("cannot delete repo with name {}", name);
    };
    save_settings(&paths.settings, &settings)?;

    let clone = Path::new(&repo.path);
    if paths.owns_clone(clone) {
        remove_clone(clone)?;
    } else {
        warn!(
            "not removing {}: outside {}",
            clone.display(),
            paths.repos.display()
        );
    }
    info!("deleted {}", repo.name);
    Ok(())
}

fn remove_clone(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("cannot remove {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::write_list;
    use crate::settings::Settings;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, Paths) {
        let td = tempdir().unwrap();
        let paths = Paths::new(td.path().join("repos.json"), td.path().join(".repos"));
        paths.ensure_layout().unwrap();
        (td, paths)
    }

    fn listed(paths: &Paths) -> String {
        let mut out = Vec::new();
        write_list(&load_settings(&paths.settings), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_then_list_shows_entry() {
        let (_td, paths) = setup();
        cmd_add(&paths, "serde", "https://github.com/serde-rs/serde.git").unwrap();
        assert_eq!(
            listed(&paths),
            "serde from https://github.com/serde-rs/serde.git\n"
        );

        let s = load_settings(&paths.settings);
        assert_eq!(Path::new(&s.repos[0].path), paths.repo_path("serde"));
    }

    #[test]
    fn add_then_delete_removes_entry_and_clone() {
        let (_td, paths) = setup();
        cmd_add(&paths, "serde", "https://example.com/serde.git").unwrap();
        cmd_add(&paths, "tokio", "https://example.com/tokio.git").unwrap();

        let clone = paths.repo_path("serde");
        fs::create_dir_all(clone.join(".git").join("objects")).unwrap();
        fs::write(clone.join("README"), "x").unwrap();

        cmd_delete(&paths, "serde").unwrap();
        assert_eq!(listed(&paths), "tokio from https://example.com/tokio.git\n");
        assert!(!clone.exists());
    }

    #[test]
    fn add_rejects_names_outside_clone_dir() {
        let (td, paths) = setup();
        let abs = td.path().join("abs");
        for name in ["../x", abs.to_str().unwrap(), "", ".."] {
            let err = cmd_add(&paths, name, "https://example.com/x.git").unwrap_err();
            assert!(err.to_string().contains("invalid repository name"));
        }
        assert!(!paths.settings.exists());
    }

    #[test]
    fn delete_keeps_directories_outside_clone_dir() {
        let (td, paths) = setup();
        let precious = td.path().join("precious");
        fs::create_dir_all(&precious).unwrap();
        fs::write(precious.join("data"), "keep me").unwrap();

        let mut s = Settings::default();
        for (name, path) in [
            ("sneaky", paths.repos.join("..").join("precious")),
            ("root", paths.repos.clone()),
        ] {
            s.add(TrackedRepo {
                name: name.into(),
                path: path.to_string_lossy().into_owned(),
                url: "https://example.com/x.git".into(),
            });
        }
        save_settings(&paths.settings, &s).unwrap();

        cmd_delete(&paths, "sneaky").unwrap();
        cmd_delete(&paths, "root").unwrap();
        assert!(precious.join("data").is_file());
        assert!(paths.repos.is_dir());
        assert!(load_settings(&paths.settings).repos.is_empty());
    }

    #[test]
    fn delete_without_clone_succeeds() {
        let (_td, paths) = setup();
        cmd_add(&paths, "never-fetched", "https://example.com/x.git").unwrap();
        cmd_delete(&paths, "never-fetched").unwrap();
        assert!(load_settings(&paths.settings).repos.is_empty());
    }

    #[test]
    fn delete_unknown_name_fails_and_keeps_settings() {
        let (_td, paths) = setup();
        cmd_add(&paths, "kept", "https://example.com/kept.git").unwrap();
        let before = fs::read_to_string(&paths.settings).unwrap();

        let err = cmd_delete(&paths, "ghost").unwrap_err();
        assert!(err.to_string().contains("ghost"));
        assert_eq!(fs::read_to_string(&paths.settings).unwrap(), before);
    }

    #[test]
    fn delete_with_no_settings_file_fails() {
        let (_td, paths) = setup();
        assert!(cmd_delete(&paths, "x").is_err());
        assert!(!paths.settings.exists());
        assert_eq!(load_settings(&paths.settings), Settings::default());
    }
}
