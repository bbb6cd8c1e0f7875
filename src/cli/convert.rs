//! Convert command - seal an existing cluster secret.

use std::path::Path;

use crate::cli::{output, Context};
use crate::core::manifest::ObjectRef;
use crate::error::Result;

/// Read a live secret, seal its values, and write the sealed manifest.
pub fn execute(
    ctx: &Context,
    name: &str,
    namespace: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let target = ObjectRef::new(name, &ctx.namespace(namespace));
    output::header(&format!("Converting secret {} to a SealedSecret", target));

    let converted = ctx.manager().convert(&target, out)?;

    output::dimmed(&format!("found {}", output::count(converted.found, "data field")));
    for (key, e) in &converted.skipped {
        output::warn(&format!("could not decode key '{}': {}", key, e));
    }
    output::success(&format!(
        "created {}",
        output::path(&converted.path.display().to_string())
    ));

    output::section("Generated SealedSecret");
    print!("{}", converted.sealed.text);
    if !converted.sealed.text.ends_with('\n') {
        println!();
    }
    output::rule();

    ctx.offer_apply(&converted.path)
}
