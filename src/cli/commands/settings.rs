//! `connvault settings`: view or change plaintext settings.
//!
//! Settings are not encrypted, so no password is needed.

use crate::cli::output;
use crate::cli::{vault_manager, Cli, SettingsAction};
use crate::errors::{Result, VaultError};

/// Execute a `settings` subcommand.
pub fn execute(cli: &Cli, action: &SettingsAction) -> Result<()> {
    let manager = vault_manager(cli)?;
    let mut settings = manager.load_settings()?;

    match action {
        SettingsAction::Show => {
            let json = serde_json::to_string_pretty(&settings)
                .map_err(|e| VaultError::SerializationError(format!("settings: {e}")))?;
            println!("{json}");
        }
        SettingsAction::Set { key, value } => {
            settings.set(key, value)?;
            manager.save_settings(&settings)?;
            output::success(&format!("{key} = {value}"));
            if key == "kdfIterations" {
                output::tip("The new round count applies the next time the vault is saved.");
            }
        }
    }

    Ok(())
}
