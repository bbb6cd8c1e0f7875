//! Apply command.

use std::path::Path;

use crate::cli::{output, Context};
use crate::error::Result;

/// Apply a sealed manifest file to the cluster.
pub fn execute(ctx: &Context, file: &Path) -> Result<()> {
    output::progress(&format!("applying {}", file.display()));
    match ctx.manager().apply(file) {
        Ok(result) => {
            output::progress_done(true);
            output::success(&format!("applied: {}", result.message));
            Ok(())
        }
        Err(e) => {
            output::progress_done(false);
            Err(e)
        }
    }
}
