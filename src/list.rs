use anyhow::Result;
use std::io::{self, Write};

use crate::paths::Paths;
use crate::settings::{Settings, load_settings};

/// CLI command: print every tracked repository in stored order.
///
/// Example output:
/// ```text
/// tokio from https://github.com/tokio-rs/tokio.git
/// serde from https://github.com/serde-rs/serde.git
/// ```
///
/// # Errors
/// Returns an error if writing to `stdout` fails.
pub fn cmd_list(paths: &Paths) -> Result<()> {
    let settings = load_settings(&paths.settings);
    write_list(&settings, &mut io::stdout().lock())
}

pub fn write_list(settings: &Settings, out: &mut impl Write) -> Result<()> {
    for repo in &settings.repos {
        writeln!(out, "{} from {}", repo.name, repo.url)?;
    }
    Ok(())
}
