//! `connvault tag`: list, add, remove and rename tags.

use crate::cli::output;
use crate::cli::{unlock, Cli, TagAction};
use crate::errors::Result;

/// Execute a `tag` subcommand.
pub fn execute(cli: &Cli, action: &TagAction) -> Result<()> {
    let mut vault = unlock(cli)?;

    match action {
        TagAction::List => {
            if vault.dataset.tags.is_empty() {
                output::info("No tags yet.");
            }
            for tag in &vault.dataset.tags {
                println!("{tag}");
            }
        }
        TagAction::Add { tag } => {
            if vault.dataset.add_tag(tag) {
                vault.save()?;
                output::success(&format!("Tag '{tag}' added"));
            } else {
                output::info(&format!("Tag '{tag}' already exists"));
            }
        }
        TagAction::Remove { tag } => {
            if vault.dataset.remove_tag(tag) {
                vault.save()?;
                output::success(&format!("Tag '{tag}' removed"));
            } else {
                output::warning(&format!("Tag '{tag}' not found"));
            }
        }
        TagAction::Rename { old, new } => {
            if vault.dataset.rename_tag(old, new) {
                vault.save()?;
                output::success(&format!("Tag '{old}' renamed to '{new}'"));
            } else {
                output::warning(&format!("Tag '{old}' not found"));
            }
        }
    }

    Ok(())
}
