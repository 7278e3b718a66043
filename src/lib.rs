//! Crate entry point for **gitactivity**.
//!
//! This library provides the implementation behind the `gitactivity` CLI.
//! Each submodule encapsulates one responsibility (settings, git operations, sync, report, etc.).
//! The `pub use` re-exports make the commands accessible directly from the crate root.

mod git;
mod list;
mod logging;
mod manage;
mod paths;
mod settings;
mod summary;
mod sync;

#[cfg(test)]
mod testutil;

pub use list::cmd_list;
pub use logging::setup_logger;
pub use manage::{cmd_add, cmd_delete};
pub use paths::Paths;
pub use summary::cmd_summarize;
pub use sync::cmd_fetch;
