//! External tool presence checks.

use std::path::PathBuf;

use tracing::debug;

use crate::core::constants;
use crate::error::{Error, Result};

/// Locate each tool on `PATH`.
///
/// # Errors
///
/// Returns `Error::ToolMissing` for the first tool that cannot be found.
pub fn locate(tools: &[&str]) -> Result<Vec<(String, PathBuf)>> {
    tools
        .iter()
        .map(|tool| match which::which(tool) {
            Ok(path) => {
                debug!(tool, path = %path.display(), "found tool");
                Ok((tool.to_string(), path))
            }
            Err(_) => Err(Error::ToolMissing(tool.to_string())),
        })
        .collect()
}

/// Verify `kubectl` and `kubeseal` are installed.
pub fn check_required() -> Result<Vec<(String, PathBuf)>> {
    locate(constants::REQUIRED_TOOLS)
}
