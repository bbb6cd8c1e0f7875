//! Create command - seal a new secret from prompted pairs.

use tracing::info;

use crate::cli::{output, Context};
use crate::core::manifest::ObjectRef;
use crate::core::reconcile;
use crate::error::Result;

/// Prompt for key/value pairs, seal them, and write `<dir>/<name>.yaml`.
pub fn execute(ctx: &Context, name: &str, namespace: Option<&str>) -> Result<()> {
    let target = ObjectRef::new(name, &ctx.namespace(namespace));
    info!(target = %target, "creating sealed secret");

    output::header(&format!("Creating sealed secret {}", target));
    output::dimmed("enter key/value pairs, an empty key finishes");
    println!();

    let data = reconcile::collect_pairs(&ctx.prompter)?;
    let created = ctx.manager().create(&target, data)?;

    output::success(&format!(
        "created {} ({} keys)",
        output::path(&created.path.display().to_string()),
        created.sealed.manifest.spec.encrypted_data.len()
    ));
    ctx.offer_apply(&created.path)
}
