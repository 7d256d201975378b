//! `connvault passwd`: change the master password.
//!
//! Decrypts the dataset with the old password, re-encrypts it under a
//! fresh salt and a key derived from the new password, then rewrites
//! the verification hash.

use crate::cli::output;
use crate::cli::{prompt_new_password, prompt_password, vault_manager, Cli, NEW_PASSWORD_ENV};
use crate::errors::{Result, VaultError};

/// Execute the `passwd` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let manager = vault_manager(cli)?;
    if !manager.has_master_password() {
        return Err(VaultError::NotInitialized);
    }

    // 1. Verify the current password before asking for a new one.
    output::info("Enter your current master password.");
    let old_password = prompt_password()?;
    if !manager.verify_master_password(&old_password) {
        return Err(VaultError::InvalidPassword);
    }

    // 2. Prompt for the new password.
    output::info("Choose your new master password.");
    let new_password = prompt_new_password(NEW_PASSWORD_ENV)?;

    // 3. Re-encrypt and swap the verification hash.
    manager.change_master_password(&old_password, &new_password)?;

    output::success("Master password changed — all data re-encrypted");
    Ok(())
}
