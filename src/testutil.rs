//! Helpers for building throwaway git repositories in tests.

use git2::{Commit, Oid, Repository, Signature, Time};
use std::path::Path;

/// Create a repository at `path` whose HEAD points at `refs/heads/main`.
pub fn init_repo(path: &Path) -> Repository {
    let repo = Repository::init(path).unwrap();
    repo.set_head("refs/heads/main").unwrap();
    repo
}

/// Commit an empty tree on top of `update_ref`, authored at `when` (Unix
/// seconds, UTC).
pub fn commit_at(repo: &Repository, update_ref: &str, when: i64, message: &str) -> Oid {
    let sig = Signature::new("Test", "test@example.com", &Time::new(when, 0)).unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo
        .find_reference(update_ref)
        .ok()
        .and_then(|r| r.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();
    repo.commit(Some(update_ref), &sig, &sig, message, &tree, &parents)
        .unwrap()
}
