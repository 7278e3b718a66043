//! Git integration layer.
//!
//! This module wraps the actual backend implementation (`git2_backend`)
//! and re-exports only what the commands need: bringing a clone up to date
//! and reading the commits reachable from its refs.
//!
//! Other modules should use these instead of depending directly on `git2_backend`.

mod git2_backend;

pub use git2_backend::{CommitInfo, collect_commits, ensure_repo};
