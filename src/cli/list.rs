//! List command.

use crate::cli::{output, Context};
use crate::core::listing::{self, Listing};
use crate::error::Result;

/// Show sealed manifests in `--dir` and sealed secrets in the cluster.
pub fn execute(ctx: &Context, namespace: Option<&str>, json: bool) -> Result<()> {
    let local = listing::local(&ctx.config.directory, namespace)?;

    if json {
        let cluster = listing::cluster(&ctx.cluster, namespace)?;
        let listing = Listing { local, cluster };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    output::header("Local files");
    if local.is_empty() {
        output::dimmed("  no matching SealedSecret files found locally");
    } else {
        for (i, entry) in local.iter().enumerate() {
            println!("  {}. {}", i + 1, entry.file);
        }
    }

    output::section(&match namespace {
        Some(ns) => format!("Cluster SealedSecrets in {}", ns),
        None => "Cluster SealedSecrets".to_string(),
    });
    let cluster = listing::cluster(&ctx.cluster, namespace)?;
    if cluster.is_empty() {
        output::dimmed("  none");
    }
    for entry in &cluster {
        println!(
            "  {}/{}  {}",
            entry.namespace,
            output::key(&entry.name),
            output::count(entry.keys, "key")
        );
    }
    Ok(())
}
