//! `connvault remove`: delete a connection from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, target: &str, force: bool) -> Result<()> {
    let mut vault = unlock(cli)?;

    let name = vault
        .dataset
        .find_connection(target)
        .map(|c| c.name.clone())
        .ok_or_else(|| VaultError::ConnectionNotFound(target.to_string()))?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove connection '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.dataset.delete_connection(target)?;
    vault.save()?;

    output::success(&format!("Removed connection '{name}'"));
    Ok(())
}
