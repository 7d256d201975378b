//! `connvault favorite` / `connvault touch`: small per-connection flags.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `favorite` command.
pub fn execute(cli: &Cli, target: &str) -> Result<()> {
    let mut vault = unlock(cli)?;
    let now_favorite = vault.dataset.toggle_favorite(target)?;
    vault.save()?;

    if now_favorite {
        output::success(&format!("'{target}' marked as favorite"));
    } else {
        output::success(&format!("'{target}' is no longer a favorite"));
    }
    Ok(())
}

/// Execute the `touch` command.
pub fn execute_touch(cli: &Cli, target: &str) -> Result<()> {
    let mut vault = unlock(cli)?;
    let at = vault.dataset.touch_last_used(target)?;
    vault.save()?;

    output::success(&format!(
        "'{target}' last used at {}",
        at.format("%Y-%m-%d %H:%M:%S")
    ));
    Ok(())
}
