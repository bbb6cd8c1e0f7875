//! Completions command.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::cli::Cli;
use crate::error::Result;

/// Write the completion script for `shell` to stdout.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    debug!(%shell, "generating completions");
    generate(shell, &mut cmd, bin, &mut io::stdout());
    Ok(())
}
