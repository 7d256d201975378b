//! `connvault init`: set the master password for a new vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{prompt_new_password, vault_manager, Cli, PASSWORD_ENV};
use crate::errors::{Result, VaultError};

/// Execute the `init` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let manager = vault_manager(cli)?;

    // 1. Refuse to silently replace an existing master password.
    if manager.has_master_password() {
        if !force {
            output::tip("Use `connvault passwd` to change the master password.");
            return Err(VaultError::CommandFailed(format!(
                "a vault already exists at {}",
                manager.data_dir().display()
            )));
        }

        if manager.data_path().exists() && std::env::var(PASSWORD_ENV).is_err() {
            let confirmed = Confirm::new()
                .with_prompt(
                    "Existing data stays encrypted under the OLD password and will be unreadable \
                     with the new one. Continue?",
                )
                .default(false)
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;
            if !confirmed {
                output::info("Cancelled.");
                return Ok(());
            }
        }
    }

    // 2. Prompt for a new password (with confirmation).
    let password = prompt_new_password(PASSWORD_ENV)?;

    // 3. Write the verification hash.
    manager.set_master_password(&password)?;

    output::success(&format!(
        "Vault initialized at {}",
        manager.data_dir().display()
    ));
    output::tip("Run `connvault add --name <NAME> --type ssh --host <HOST>` to add a connection.");
    output::tip("Run `connvault list` to see all connections.");

    Ok(())
}
