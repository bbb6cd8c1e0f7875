//! Update command - edit the keys of an existing sealed manifest.

use std::path::Path;

use crate::cli::{output, Context};
use crate::core::prompt::Prompter;
use crate::core::reconcile::{self, Mode};
use crate::error::Result;

/// Merge new or changed values into a sealed manifest, keeping a backup of
/// the previous file.
pub fn execute(ctx: &Context, file: &Path) -> Result<()> {
    let manager = ctx.manager();
    let plan = manager.prepare_update(file)?;

    output::header(&format!("Updating {}", plan.target));
    output::kv("file:", file.display());
    output::section("Existing keys");
    if plan.existing_keys.is_empty() {
        output::dimmed("  (none)");
    }
    for key in &plan.existing_keys {
        output::list_item(key);
    }

    if let Some(e) = &plan.baseline_error {
        println!();
        output::warn(&format!("could not read live secret: {}", e));
        output::dimmed("  continuing with an empty baseline");
    }
    for key in &plan.undecodable {
        output::warn(&format!("skipping live value for '{}': not decodable", key));
    }

    println!();
    for (i, label) in Mode::MENU.iter().enumerate() {
        println!("  {}. {}", i + 1, label);
    }
    let choice = ctx.prompter.prompt("Choice", false)?;
    let mode = Mode::from_choice(&choice)?;

    if mode == Mode::UpdateSelected {
        println!();
        for (i, key) in plan.existing_keys.iter().enumerate() {
            println!("  {}. {}", i + 1, output::key(key));
        }
        output::dimmed("select keys as '1,3', '1-3' or 'all'");
    } else {
        output::dimmed("enter key/value pairs, an empty key finishes");
    }

    let merged = reconcile::reconcile(mode, &plan.existing_keys, &plan.baseline, &ctx.prompter)?;
    let updated = manager.commit_update(&plan, merged)?;

    output::kv("backup:", updated.backup.display());
    output::success(&format!(
        "updated {}",
        output::path(&updated.path.display().to_string())
    ));
    ctx.offer_apply(&updated.path)
}
