//! Decrypt command - show the live values behind a sealed secret.

use crate::cli::{output, Context};
use crate::core::inspect::{Inspection, Target};
use crate::core::prompt::Prompter;
use crate::error::Result;

fn print_entries(inspection: &Inspection, reveal: bool) {
    for (key, value) in inspection.rendered(reveal) {
        println!("  {}: {}", output::key(key), value);
    }
}

/// Decrypt from a sealed manifest file or a secret name.
///
/// A file is applied first so the live secret exists before it is read.
pub fn execute(ctx: &Context, token: &str, namespace: Option<&str>) -> Result<()> {
    let target = Target::resolve(token, &ctx.namespace(namespace))?;

    match &target {
        Target::File { path, .. } => {
            output::header(&format!("Decrypting from file {}", path.display()));
            match ctx.manager().apply(path) {
                Ok(result) => output::success(&format!("applied: {}", result.message)),
                Err(e) => output::warn(&format!("apply failed: {}", e)),
            }
        }
        Target::Name(object) => {
            output::header(&format!("Decrypting from cluster {}", object));
        }
    }

    let inspection = Inspection::fetch(&ctx.cluster, target.object())?;
    if !inspection.has_data() {
        output::warn("no data found");
        return Ok(());
    }

    output::section(&format!("Secret data for '{}'", inspection.object.name));
    print_entries(&inspection, false);
    output::rule();

    println!();
    if ctx.prompter.confirm("Show full values?")? {
        output::section(&format!("Full values for '{}'", inspection.object.name));
        print_entries(&inspection, true);
        output::rule();
    }
    Ok(())
}
